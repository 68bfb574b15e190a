//! Configuration module
//!
//! Handles ccbuild.toml parsing and validation.

mod ccbuild_toml;
pub mod validation;

pub use ccbuild_toml::CcbuildConfig;
