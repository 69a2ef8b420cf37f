//! Core error handling and configuration for myt-tools.
//!
//! This crate provides the foundational pieces shared by the workflow engine,
//! the MCP server and the CLI.

pub mod config;
pub mod error;

pub use config::{Config, JiraConfig, LoggingConfig};
pub use error::{Error, Result};
