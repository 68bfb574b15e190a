//! Conan dependency install
//!
//! Produces `conan install <source> --build=missing --profile <host>
//! --profile:build <build> --output-folder=<build_dir>`, adding
//! `-s build_type=Debug` for debug builds. Release builds rely on the
//! profile's own build type.

use std::path::PathBuf;

use super::{BuildLayout, BuildType};
use crate::exec::subprocess::ToolCommand;

/// Builder for a `conan install` invocation
#[derive(Debug, Clone)]
pub struct ConanInstall {
    program: String,
    source_dir: PathBuf,
    output_folder: PathBuf,
    host_profile: String,
    build_profile: String,
    build_type: BuildType,
}

impl ConanInstall {
    /// Create an install command for the sources and build directory in `layout`
    pub fn new(layout: &BuildLayout) -> Self {
        Self {
            program: layout.conan.clone(),
            source_dir: layout.source_dir.clone(),
            output_folder: layout.build_dir.clone(),
            host_profile: layout.profile.clone(),
            build_profile: layout.build_profile.clone(),
            build_type: BuildType::default(),
        }
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Assemble the command
    pub fn command(&self) -> ToolCommand {
        let cmd = ToolCommand::new(&self.program)
            .arg("install")
            .arg(self.source_dir.display().to_string())
            .arg("--build=missing")
            .args(["--profile", self.host_profile.as_str()])
            .args(["--profile:build", self.build_profile.as_str()])
            .arg(format!("--output-folder={}", self.output_folder.display()));

        match self.build_type {
            BuildType::Debug => cmd.args(["-s", "build_type=Debug"]),
            BuildType::Release => cmd,
        }
    }
}
