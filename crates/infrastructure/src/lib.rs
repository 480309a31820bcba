pub mod credentials;
pub mod database;

pub use credentials::PasswordHasher;
pub use database::*;
