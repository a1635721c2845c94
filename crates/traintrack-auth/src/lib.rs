//! # traintrack-auth
//!
//! Authentication for the TrainTrack backend.
//!
//! ## Modules
//!
//! - `password` — bcrypt password hashing and verification
//! - `token` — signed access/refresh token issuance and validation
//! - `session` — the refresh-token registry (authorization by presence)
//! - `store` — the credential-store abstraction over the user table
//! - `service` — the auth service orchestrating register/login/refresh/logout

pub mod password;
pub mod service;
pub mod session;
pub mod store;
pub mod token;

pub use password::PasswordHasher;
pub use service::{AuthService, LoginOutcome, RegisterInput};
pub use session::{MemorySessionRegistry, SessionRegistry};
pub use store::UserStore;
pub use token::{Claims, TokenCodec, TokenType};
