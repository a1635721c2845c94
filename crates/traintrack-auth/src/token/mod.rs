//! Signed token issuance and validation.

pub mod claims;
pub mod codec;

pub use claims::{Claims, TokenType};
pub use codec::TokenCodec;
