pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use models::{Claims, Credentials, Identity, UserSeed};
pub use roster::Roster;
pub use token::{TOKEN_TTL_SECS, TokenService};
