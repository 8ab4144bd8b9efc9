//! # Veclane Core
//!
//! Types shared by the kernel crate and the `veclane` binary:
//! the workspace error type and the TOML configuration file.

pub mod config;
pub mod error;

pub use config::{VeclaneConfig, VerifyConfig};
pub use error::{Result, VeclaneError};
