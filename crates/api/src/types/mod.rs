//! Lenient request field formats
//!
//! Clients send ratings as numbers or numeric strings and deadlines as either
//! plain dates or full timestamps; these deserializers normalize both.

pub mod fields;

pub use fields::{optional_deadline, optional_trimmed, rating, trimmed};
