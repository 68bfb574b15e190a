//! Configuration validation with helpful error messages

use anyhow::Result;

use super::CcbuildConfig;
use crate::error::BuildError;

/// Validate a parsed ccbuild.toml
pub fn validate_config(config: &CcbuildConfig) -> Result<()> {
    if config.parallel == Some(0) {
        return Err(BuildError::config_error_with_hint(
            "parallel must be at least 1",
            None,
            "Remove the key to build with a single job, or set it to the desired job count.",
        )
        .into());
    }

    let named_paths = [
        ("build_dir", config.build_dir.as_deref()),
        ("source_dir", config.source_dir.as_deref()),
    ];
    for (key, value) in named_paths {
        if value.is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(BuildError::config_error(format!("{} must not be empty", key)).into());
        }
    }

    let named_values = [
        ("profile", config.profile.as_deref()),
        ("build_profile", config.build_profile.as_deref()),
        ("tools.conan", config.tools.conan.as_deref()),
        ("tools.cmake", config.tools.cmake.as_deref()),
    ];
    for (key, value) in named_values {
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(BuildError::config_error(format!("{} must not be empty", key)).into());
        }
    }

    for name in config.defines.keys() {
        validate_define_name(name)?;
    }

    Ok(())
}

/// A CMake cache variable name as passed to `-D NAME=VALUE`
fn validate_define_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));

    if !valid {
        return Err(BuildError::config_error_with_hint(
            format!("Invalid CMake variable name in [defines]: '{}'", name),
            None,
            "Variable names may contain letters, digits, '_', '-', '.' and ':' (for typed cache entries).",
        )
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CcbuildConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_tool_is_rejected() {
        let mut config = CcbuildConfig::default();
        config.tools.cmake = Some("  ".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("tools.cmake"));
    }

    #[test]
    fn test_empty_directories_are_rejected() {
        let mut config = CcbuildConfig::default();
        config.build_dir = Some(std::path::PathBuf::new());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("build_dir must not be empty"));

        let err = CcbuildConfig::parse("source_dir = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("source_dir must not be empty"));
    }

    #[test]
    fn test_define_names() {
        assert!(validate_define_name("CMAKE_EXPORT_COMPILE_COMMANDS").is_ok());
        assert!(validate_define_name("ENABLE_FOO:BOOL").is_ok());
        assert!(validate_define_name("").is_err());
        assert!(validate_define_name("A=B").is_err());
        assert!(validate_define_name("HAS SPACE").is_err());
    }
}
