//! ccbuild.toml configuration parsing
//!
//! Every key is optional; anything left out falls back to the CLI defaults.
//!
//! ```toml
//! build_dir = "build"
//! source_dir = "."
//! profile = "./conanprofile"
//! build_profile = "./conanprofile"
//! parallel = 8
//!
//! [tools]
//! conan = "conan"
//! cmake = "/opt/cmake/bin/cmake"
//!
//! [defines]
//! CMAKE_EXPORT_COMPILE_COMMANDS = "ON"
//! ```
//!
//! Relative `build_dir` and `source_dir` are relative to the file's own
//! directory, so `--config other/ccbuild.toml` with `build_dir = "out"`
//! builds into `other/out`. `profile`, `build_profile` and `[tools]` are
//! handed to conan/cmake unchanged and resolve against the working directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::validation::validate_config;
use crate::error::{hints, BuildError};

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "ccbuild.toml";

/// Root configuration from ccbuild.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CcbuildConfig {
    /// Shared output directory
    pub build_dir: Option<PathBuf>,

    /// Project source directory
    pub source_dir: Option<PathBuf>,

    /// Conan host profile
    pub profile: Option<String>,

    /// Conan build profile, defaults to `profile`
    pub build_profile: Option<String>,

    /// Default job count for `cmake --build`
    pub parallel: Option<u32>,

    /// Tool locations
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Extra `-D` definitions for the configure step
    #[serde(default)]
    pub defines: BTreeMap<String, String>,
}

/// `[tools]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    pub conan: Option<String>,
    pub cmake: Option<String>,
}

impl CcbuildConfig {
    /// Load configuration from a specific path, anchoring relative
    /// directories at the file's parent
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::read(path)?;
        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Prefix relative `build_dir`/`source_dir` with `base`
    fn relative_to(mut self, base: &Path) -> Self {
        for dir in [&mut self.build_dir, &mut self.source_dir].into_iter().flatten() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        self
    }

    /// Load `explicit` if given, otherwise `ccbuild.toml` in `dir` when it exists.
    ///
    /// A missing implicit file yields the empty configuration; a missing
    /// explicit one is an error.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let implicit = dir.join(DEFAULT_CONFIG_FILE);
                // `dir` is the working directory, so relative paths already
                // point where the file means them to
                if implicit.is_file() {
                    Self::read(&implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            BuildError::config_error_with_hint(
                "Failed to parse ccbuild.toml",
                Some(e.into()),
                hints::invalid_config(),
            )
        })?;

        validate_config(&config)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = CcbuildConfig::parse("").unwrap();
        assert_eq!(config, CcbuildConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
build_dir = "out"
source_dir = "engine"
profile = "profiles/linux"
build_profile = "profiles/host"
parallel = 8

[tools]
conan = "/opt/conan/bin/conan"
cmake = "cmake3"

[defines]
CMAKE_EXPORT_COMPILE_COMMANDS = "ON"
"#;

        let config = CcbuildConfig::parse(toml).unwrap();
        assert_eq!(config.build_dir, Some(PathBuf::from("out")));
        assert_eq!(config.source_dir, Some(PathBuf::from("engine")));
        assert_eq!(config.profile.as_deref(), Some("profiles/linux"));
        assert_eq!(config.build_profile.as_deref(), Some("profiles/host"));
        assert_eq!(config.parallel, Some(8));
        assert_eq!(config.tools.conan.as_deref(), Some("/opt/conan/bin/conan"));
        assert_eq!(config.tools.cmake.as_deref(), Some("cmake3"));
        assert_eq!(
            config.defines.get("CMAKE_EXPORT_COMPILE_COMMANDS").map(String::as_str),
            Some("ON")
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = CcbuildConfig::parse("jobs = 4\n").unwrap_err();
        let build_err = err.downcast_ref::<BuildError>().unwrap();
        assert!(matches!(build_err, BuildError::Config { hint: Some(_), .. }));
    }

    #[test]
    fn test_zero_parallel_is_rejected() {
        let err = CcbuildConfig::parse("parallel = 0\n").unwrap_err();
        assert!(err.to_string().contains("parallel"));
    }

    #[test]
    fn test_discover_without_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CcbuildConfig::discover(None, temp_dir.path()).unwrap();
        assert_eq!(config, CcbuildConfig::default());
    }

    #[test]
    fn test_discover_implicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILE), "build_dir = \"out\"\n").unwrap();

        let config = CcbuildConfig::discover(None, temp_dir.path()).unwrap();
        assert_eq!(config.build_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_explicit_file_anchors_relative_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let project = temp_dir.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        let file = project.join("ccbuild.toml");
        let sources = temp_dir.path().join("src");
        std::fs::write(
            &file,
            format!("build_dir = \"out\"\nsource_dir = '{}'\n", sources.display()),
        )
        .unwrap();

        let config = CcbuildConfig::discover(Some(&file), temp_dir.path()).unwrap();
        assert_eq!(config.build_dir, Some(project.join("out")));
        assert_eq!(config.source_dir, Some(sources));
    }

    #[test]
    fn test_bare_file_name_keeps_relative_dirs() {
        let config = CcbuildConfig::parse("build_dir = \"out\"\n")
            .unwrap()
            .relative_to(Path::new(""));
        assert_eq!(config.build_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_discover_missing_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("other.toml");
        assert!(CcbuildConfig::discover(Some(&missing), temp_dir.path()).is_err());
    }
}
