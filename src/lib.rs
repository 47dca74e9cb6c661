pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod manager;
pub mod scheme;
pub mod ui;

pub use error::{ReleaseError, Result};
pub use manager::ReleaseManager;
