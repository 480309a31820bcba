pub mod auth;
pub mod executors;
pub mod fallback;
pub mod health;
pub mod tasks;
pub mod users;
