#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session coordination for the Risk Rush command-line adapter.
//!
//! The binary owns a [`Supervisor`], which owns the current [`Session`]. Each
//! frame the backend hands over input, the supervisor advances the session,
//! and [`scene::populate`] projects the result into a backend-agnostic scene.

/// Loading of tuning configuration files.
pub mod config;
pub mod scene;
mod session;

pub use session::{Control, Session, Supervisor};
