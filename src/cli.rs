//! CLI argument parsing using clap derive macros

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::build::pipeline::{CleanOutcome, Pipeline};
use crate::build::{BuildLayout, BuildOptions, BuildType};
use crate::config::CcbuildConfig;
use crate::exec::subprocess::{DryRunner, SystemRunner};
use crate::utils::terminal::{format_size, print_success, print_verbose};

/// ccbuild - Conan + CMake build driver
///
/// Installs dependencies with Conan, configures with CMake and compiles,
/// echoing each command before it runs and stopping at the first failure.
#[derive(Parser, Debug)]
#[command(name = "ccbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Clean build directory before building
    #[arg(long)]
    pub clean: bool,

    /// Trigger RELEASE build
    #[arg(long)]
    pub release: bool,

    /// Build without clang-tidy
    #[arg(long = "build_without_clang_tidy", alias = "build-without-clang-tidy")]
    pub build_without_clang_tidy: bool,

    /// Number of parallel jobs [default: 1]
    #[arg(long, value_name = "N")]
    pub parallel: Option<NonZeroU32>,

    /// Build directory shared by conan and cmake [default: build]
    #[arg(long, env = "CCBUILD_BUILD_DIR", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Project source directory [default: .]
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Conan host profile [default: ./conanprofile]
    #[arg(long, env = "CCBUILD_PROFILE")]
    pub profile: Option<String>,

    /// Conan build profile [default: same as --profile]
    #[arg(long)]
    pub build_profile: Option<String>,

    /// Conan executable [default: conan]
    #[arg(long, env = "CCBUILD_CONAN", value_name = "PROGRAM")]
    pub conan: Option<String>,

    /// CMake executable [default: cmake]
    #[arg(long, env = "CCBUILD_CMAKE", value_name = "PROGRAM")]
    pub cmake: Option<String>,

    /// Configuration file [default: ./ccbuild.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Merge flags over the configuration file and built-in defaults
    pub fn resolve(&self, config: &CcbuildConfig) -> (BuildOptions, BuildLayout) {
        let jobs = self
            .parallel
            .or_else(|| config.parallel.and_then(NonZeroU32::new))
            .unwrap_or(NonZeroU32::MIN);

        let options = BuildOptions {
            clean: self.clean,
            build_type: BuildType::from_release(self.release),
            clang_tidy: !self.build_without_clang_tidy,
            jobs,
            verbose: self.verbose,
        };

        let defaults = BuildLayout::default();
        let profile = self
            .profile
            .clone()
            .or_else(|| config.profile.clone())
            .unwrap_or(defaults.profile);
        let build_profile = self
            .build_profile
            .clone()
            .or_else(|| config.build_profile.clone())
            .unwrap_or_else(|| profile.clone());

        let layout = BuildLayout {
            source_dir: self
                .source_dir
                .clone()
                .or_else(|| config.source_dir.clone())
                .unwrap_or(defaults.source_dir),
            build_dir: self
                .build_dir
                .clone()
                .or_else(|| config.build_dir.clone())
                .unwrap_or(defaults.build_dir),
            profile,
            build_profile,
            conan: self
                .conan
                .clone()
                .or_else(|| config.tools.conan.clone())
                .unwrap_or(defaults.conan),
            cmake: self
                .cmake
                .clone()
                .or_else(|| config.tools.cmake.clone())
                .unwrap_or(defaults.cmake),
        };

        (options, layout)
    }

    /// Execute the build
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config = CcbuildConfig::discover(self.config.as_deref(), &cwd)?;
        let (options, layout) = self.resolve(&config);

        print_verbose(self.verbose, &format!("working directory: {}", cwd.display()));
        print_verbose(self.verbose, &format!("{:?}", options));
        print_verbose(self.verbose, &format!("{:?}", layout));

        let pipeline = Pipeline::new(options, layout)
            .defines(config.defines)
            .dry_run(self.dry_run);

        let report = if self.dry_run {
            pipeline.run(&mut DryRunner)?
        } else {
            pipeline.run(&mut SystemRunner::new(self.verbose))?
        };

        if let Some(CleanOutcome::Removed { bytes }) = report.cleaned {
            print_verbose(self.verbose, &format!("freed {}", format_size(bytes)));
        }
        for step in &report.steps {
            print_verbose(
                self.verbose,
                &format!(
                    "{} ({:.2}s): {}",
                    step.step,
                    step.result.duration.as_secs_f64(),
                    step.command
                ),
            );
        }

        if !self.dry_run {
            print_success(&format!(
                "{} build finished in {:.2}s",
                pipeline.options().build_type,
                report.duration.as_secs_f64()
            ));
        }

        Ok(())
    }
}
