//! WEAO cache refresher
//!
//! Mirrors the WEAO version and executor status endpoints into
//! `.well-known/weao` so a static site can serve them without hitting the API
//! from the browser.

pub mod cache;
pub mod cli;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod refresh;

pub use error::RefreshError;
pub use refresh::{RefreshReport, Refresher};
