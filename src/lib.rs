//! Student roster service library
//!
//! HTTP API for bulk-loading students from spreadsheet uploads and listing
//! them per class.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
