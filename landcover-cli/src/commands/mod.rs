//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`init`] - Create a config file
//! - [`config`] - Show the resolved configuration
//! - [`sample`] - Category at one world coordinate
//! - [`fetch`] - Load one tile into the local cache
//! - [`summary`] - Category histogram over an area

pub mod common;
pub mod config;
pub mod fetch;
pub mod init;
pub mod sample;
pub mod summary;
