//! Error types and helpers for user-friendly error messages
//!
//! Every failure the orchestrator can surface maps onto one of these
//! variants, each carrying enough context (path, step, tool) plus an
//! optional hint for the user.

use std::path::PathBuf;

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum BuildError {
    /// Configuration file or option errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Creating or removing a directory failed
    #[error("Failed to {operation} {}: {source}", path.display())]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tool/executable not found
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// An external command ran but did not succeed
    #[error("{step} step failed ({})", describe_status(*code))]
    StepFailed {
        step: String,
        code: Option<i32>,
        hint: Option<String>,
    },
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl BuildError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a filesystem error for `operation` on `path`
    pub fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a step failure from a child's exit code
    pub fn step_failed(step: impl Into<String>, code: Option<i32>) -> Self {
        let step = step.into();
        let hint = hints::step_failed(&step).map(str::to_string);
        Self::StepFailed { step, code, hint }
    }

    /// Process exit code this error should terminate with.
    ///
    /// A failed step mirrors the tool's own code when it fits in a process
    /// exit status; everything else exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            BuildError::StepFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            BuildError::Config { source, hint, .. } => {
                if let Some(cause) = source {
                    eprintln!("  caused by: {}", cause);
                }
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            BuildError::StepFailed { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            BuildError::MissingTool {
                required_for, hint, ..
            } => {
                eprintln!("  required for: {}", required_for);
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            BuildError::Filesystem { .. } => {}
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing CMake
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake\n\
         \n\
         Or point --cmake (CCBUILD_CMAKE) at an existing cmake binary."
    }

    /// Get hint for missing Conan
    pub fn conan() -> &'static str {
        "Install Conan 2.x:\n\
         • pip install conan\n\
         • Then run: conan profile detect\n\
         \n\
         Or point --conan (CCBUILD_CONAN) at an existing conan binary."
    }

    /// Get hint for an invalid ccbuild.toml
    pub fn invalid_config() -> &'static str {
        "ccbuild.toml is invalid. Common issues:\n\
         • Unknown key (allowed: build_dir, source_dir, profile, build_profile, parallel, [tools], [defines])\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • parallel must be at least 1"
    }

    /// Hint printed when a given build step fails
    pub fn step_failed(step: &str) -> Option<&'static str> {
        match step {
            "install" => Some(
                "Conan could not install the dependencies. Check that the profile exists \
                 and that the remotes are reachable.",
            ),
            "configure" => Some(
                "CMake configuration failed. Re-run with --clean if the build directory \
                 holds a stale cache.",
            ),
            _ => None,
        }
    }
}
