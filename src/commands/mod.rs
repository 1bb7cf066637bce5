//! Command implementations for the clerk CLI

pub mod bundle;
pub mod completions;
pub mod db;
pub mod helpers;
pub mod request;
pub mod search;
pub mod session;
pub mod show;
pub mod version;

pub use helpers::Context;
