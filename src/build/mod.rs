//! Build orchestration
//!
//! ## Architecture
//!
//! ```text
//! cli.rs → BuildOptions + BuildLayout → pipeline.rs → conan install / cmake / cmake --build
//! ```
//!
//! ## Modules
//!
//! - `conan` - Conan dependency install command
//! - `cmake` - CMake configure and build commands
//! - `pipeline` - Ordered, fail-fast execution of the steps

pub mod cmake;
pub mod conan;
pub mod pipeline;

use std::num::NonZeroU32;
use std::path::PathBuf;

/// CMake/Conan build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl BuildType {
    pub fn from_release(release: bool) -> Self {
        if release {
            BuildType::Release
        } else {
            BuildType::Debug
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
        }
    }
}

/// Options parsed from the command line, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Remove the build directory first
    pub clean: bool,
    /// Debug or Release
    pub build_type: BuildType,
    /// Keep the clang-tidy integration enabled during configure
    pub clang_tidy: bool,
    /// Job count forwarded to `cmake --build`
    pub jobs: NonZeroU32,
    /// Print extra diagnostics
    pub verbose: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            clean: false,
            build_type: BuildType::Debug,
            clang_tidy: true,
            jobs: NonZeroU32::MIN,
            verbose: false,
        }
    }
}

/// Where things live and which programs to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Project sources (where CMakeLists.txt and conanfile live)
    pub source_dir: PathBuf,
    /// Shared output directory for conan, cmake and the compiler
    pub build_dir: PathBuf,
    /// Conan host profile
    pub profile: String,
    /// Conan build profile
    pub build_profile: String,
    /// Conan executable
    pub conan: String,
    /// CMake executable
    pub cmake: String,
}

impl Default for BuildLayout {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            profile: "./conanprofile".to_string(),
            build_profile: "./conanprofile".to_string(),
            conan: "conan".to_string(),
            cmake: "cmake".to_string(),
        }
    }
}
