//! CMake configuration and build commands

use std::num::NonZeroU32;
use std::path::PathBuf;

use super::{BuildLayout, BuildType};
use crate::exec::subprocess::ToolCommand;

/// CMake configure step (`cmake -D ... -S <src> -B <build>`)
#[derive(Debug, Clone)]
pub struct CMakeConfigure {
    program: String,
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build directory
    build_dir: PathBuf,
    build_type: BuildType,
    clang_tidy: bool,
    /// Extra CMake variables (-D options)
    variables: Vec<(String, String)>,
}

impl CMakeConfigure {
    pub fn new(layout: &BuildLayout) -> Self {
        Self {
            program: layout.cmake.clone(),
            source_dir: layout.source_dir.clone(),
            build_dir: layout.build_dir.clone(),
            build_type: BuildType::default(),
            clang_tidy: true,
            variables: Vec::new(),
        }
    }

    /// Set the build type
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Toggle the project's clang-tidy integration
    pub fn clang_tidy(mut self, enabled: bool) -> Self {
        self.clang_tidy = enabled;
        self
    }

    /// Set a CMake variable
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((name.into(), value.into()));
        self
    }

    /// Assemble the command.
    ///
    /// clang-tidy is on by default in the project, so only the opt-out is
    /// passed explicitly.
    pub fn command(&self) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.program);

        if !self.clang_tidy {
            cmd = cmd.args(["-D", "BUILD_WITH_CLANG_TIDY=OFF"]);
        }
        cmd = cmd.args(["-D".to_string(), format!("CMAKE_BUILD_TYPE={}", self.build_type)]);

        for (name, value) in &self.variables {
            cmd = cmd.args(["-D".to_string(), format!("{}={}", name, value)]);
        }

        cmd.arg("-S")
            .arg(self.source_dir.display().to_string())
            .arg("-B")
            .arg(self.build_dir.display().to_string())
    }
}

/// CMake build step (`cmake --build <build> --parallel <N>`)
#[derive(Debug, Clone)]
pub struct CMakeBuild {
    program: String,
    build_dir: PathBuf,
    /// Number of parallel jobs
    jobs: NonZeroU32,
}

impl CMakeBuild {
    pub fn new(layout: &BuildLayout) -> Self {
        Self {
            program: layout.cmake.clone(),
            build_dir: layout.build_dir.clone(),
            jobs: NonZeroU32::MIN,
        }
    }

    /// Set number of parallel jobs
    pub fn jobs(mut self, jobs: NonZeroU32) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn command(&self) -> ToolCommand {
        ToolCommand::new(&self.program)
            .arg("--build")
            .arg(self.build_dir.display().to_string())
            .arg("--parallel")
            .arg(self.jobs.to_string())
    }
}
