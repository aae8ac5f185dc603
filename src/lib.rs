//! Schema provisioning for the MileApp task backend.
//!
//! Ensures the `users` and `tasks` collections exist in the configured
//! database and carry the indexes the application queries against. This
//! is a one-shot utility: it mutates schema only, never documents.

pub mod conf;
pub mod db;
pub mod models;
pub mod o11y;
pub mod provision;
