//! Tool detection
//!
//! Bare program names (`cmake`) are looked up on `PATH`; anything that
//! looks like a path (`./bin/cmake`, `/opt/conan/bin/conan`) is taken as
//! given and only checked for existence.

use std::path::{Path, PathBuf};

use which::which;

use crate::error::{hints, BuildError};

/// Resolve `program` to an executable path.
///
/// `required_for` names the build step that needs the tool and ends up in
/// the error message when the tool is missing.
pub fn resolve_tool(program: &str, required_for: &str) -> Result<PathBuf, BuildError> {
    let candidate = Path::new(program);
    let resolved = if candidate.components().count() > 1 || candidate.is_absolute() {
        candidate.is_file().then(|| candidate.to_path_buf())
    } else {
        which(program).ok()
    };

    resolved.ok_or_else(|| BuildError::missing_tool(program, required_for, tool_hint(program)))
}

/// Get installation hint for a tool
fn tool_hint(program: &str) -> &'static str {
    let name = Path::new(program)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(program);
    match name {
        "cmake" => hints::cmake(),
        "conan" => hints::conan(),
        _ => "Install this tool and ensure it's in your PATH",
    }
}
