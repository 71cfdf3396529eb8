//! Wire contract of the task API: paths, request forms and response shapes.

pub mod routes;
mod types;

pub use types::*;
