//! Shared utilities for the wordswap crate.
//!
//! - `runtime`: async-to-sync bridge for hosts without a Tokio context
//! - `settings`: file-backed library configuration

mod runtime;
mod settings;

pub use runtime::block_on;
pub use settings::Settings;
