pub mod entities;
pub mod repositories;
pub mod services;
pub mod sqlx_impls;

pub use entities::*;
pub use repositories::*;
pub use services::*;
pub use taskboard_core::{TaskboardError, TaskboardResult};
