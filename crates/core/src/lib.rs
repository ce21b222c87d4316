//! Domain logic for the CookOrder dish catalog.
//!
//! Pure functions only: validation, photo naming rules and search pattern
//! building. Nothing in this crate performs I/O.

pub mod dish;
pub mod error;
pub mod photo;
pub mod search;
pub mod types;
