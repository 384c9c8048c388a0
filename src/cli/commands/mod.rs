//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod codes;
pub mod init;
pub mod prepare;
pub mod validate;
