//! Ordered build steps
//!
//! clean (optional) → ensure build dir → conan install → cmake configure →
//! cmake --build. Each command is echoed before it runs and the first
//! failing step stops the pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use anyhow::Result;

use super::cmake::{CMakeBuild, CMakeConfigure};
use super::conan::ConanInstall;
use super::{BuildLayout, BuildOptions};
use crate::error::BuildError;
use crate::exec::subprocess::{CommandResult, CommandRunner, ToolCommand};
use crate::utils::paths::{ensure_dir, remove_dir};
use crate::utils::terminal::{format_size, print_banner, print_info, print_verbose};

/// External command steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Install,
    Configure,
    Compile,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Install => "install",
            Step::Configure => "configure",
            Step::Compile => "compile",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the clean step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The directory existed and was removed
    Removed { bytes: u64 },
    /// There was nothing to remove
    NotPresent,
    /// Dry run, nothing touched
    Skipped,
}

/// One executed command
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub command: ToolCommand,
    pub result: CommandResult,
}

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// `None` when no clean was requested
    pub cleaned: Option<CleanOutcome>,
    pub steps: Vec<StepReport>,
    pub duration: Duration,
}

/// The build pipeline for one invocation
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: BuildOptions,
    layout: BuildLayout,
    defines: BTreeMap<String, String>,
    dry_run: bool,
}

impl Pipeline {
    pub fn new(options: BuildOptions, layout: BuildLayout) -> Self {
        Self {
            options,
            layout,
            defines: BTreeMap::new(),
            dry_run: false,
        }
    }

    /// Extra `-D` definitions for the configure step
    pub fn defines(mut self, defines: BTreeMap<String, String>) -> Self {
        self.defines = defines;
        self
    }

    /// Echo everything but touch neither the filesystem nor any tool
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// The three external commands, in execution order
    pub fn plan(&self) -> Vec<(Step, ToolCommand)> {
        let build_type = self.options.build_type;

        let install = ConanInstall::new(&self.layout).build_type(build_type).command();

        let configure = self
            .defines
            .iter()
            .fold(
                CMakeConfigure::new(&self.layout)
                    .build_type(build_type)
                    .clang_tidy(self.options.clang_tidy),
                |cfg, (name, value)| cfg.variable(name, value),
            )
            .command();

        let compile = CMakeBuild::new(&self.layout).jobs(self.options.jobs).command();

        vec![
            (Step::Install, install),
            (Step::Configure, configure),
            (Step::Compile, compile),
        ]
    }

    /// Remove the build directory
    pub fn clean(&self) -> Result<CleanOutcome, BuildError> {
        print_banner("cleaning build directory...");

        let build_dir = &self.layout.build_dir;
        self.guard_clean_target()?;
        if self.dry_run {
            print_info(&format!("[DRY RUN] Would remove: {}", build_dir.display()));
            return Ok(CleanOutcome::Skipped);
        }

        match remove_dir(build_dir)? {
            Some(bytes) => {
                print_info(&format!(
                    "Removed {} ({})",
                    build_dir.display(),
                    format_size(bytes)
                ));
                Ok(CleanOutcome::Removed { bytes })
            }
            None => {
                print_verbose(
                    self.options.verbose,
                    &format!("{} does not exist, nothing to clean", build_dir.display()),
                );
                Ok(CleanOutcome::NotPresent)
            }
        }
    }

    /// Refuse to delete a build directory that contains the sources
    fn guard_clean_target(&self) -> Result<(), BuildError> {
        let Ok(build_dir) = std::fs::canonicalize(&self.layout.build_dir) else {
            return Ok(());
        };
        let source_dir = std::fs::canonicalize(&self.layout.source_dir)
            .unwrap_or_else(|_| self.layout.source_dir.clone());

        if source_dir.starts_with(&build_dir) {
            return Err(BuildError::config_error_with_hint(
                format!(
                    "Refusing to clean {}: it contains the source directory {}",
                    build_dir.display(),
                    source_dir.display()
                ),
                None,
                "Point --build-dir at a dedicated output directory.",
            ));
        }

        Ok(())
    }

    /// Create the build directory if it is missing
    pub fn ensure_build_dir(&self) -> Result<(), BuildError> {
        let build_dir = &self.layout.build_dir;
        if self.dry_run {
            print_info(&format!("[DRY RUN] Would create: {}", build_dir.display()));
            return Ok(());
        }

        print_verbose(
            self.options.verbose,
            &format!("ensuring {} exists", build_dir.display()),
        );
        ensure_dir(build_dir)
    }

    /// Run every step, stopping at the first failure
    pub fn run<R: CommandRunner>(&self, runner: &mut R) -> Result<BuildReport> {
        let start = Instant::now();

        let cleaned = if self.options.clean {
            Some(self.clean()?)
        } else {
            None
        };

        self.ensure_build_dir()?;

        let mut steps = Vec::new();
        for (step, command) in self.plan() {
            print_banner(&command.to_string());

            let result = runner.run(step.name(), &command)?;
            if !result.success {
                return Err(BuildError::step_failed(step.name(), result.exit_code).into());
            }

            steps.push(StepReport {
                step,
                command,
                result,
            });
        }

        Ok(BuildReport {
            cleaned,
            steps,
            duration: start.elapsed(),
        })
    }
}
