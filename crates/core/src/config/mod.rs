//! Configuration models and loading.
//!
//! Sources are layered in this order, later ones winning:
//! built-in defaults, an optional TOML file, then `TASKBOARD_*` environment
//! variables (`__` separates nested keys, e.g. `TASKBOARD_DATABASE__URL`).

pub mod models;

pub use models::*;
