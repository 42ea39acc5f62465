use std::env;
use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use xmark_core::config::{CONFIG_ENV, TEXT_ENV};

use crate::{absolutize, locate_library, preload_value, BACKEND_ENV, PRELOAD_ENV};

/// How the target program should be prepared.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Explicit preload module path; located automatically when `None`.
    pub library: Option<String>,
    /// Watermark text override.
    pub text: Option<String>,
    /// Watermark config file (JSON or YAML).
    pub config: Option<String>,
    /// Windowing backend forced on the target.
    pub backend: String,
}

impl LaunchOptions {
    pub fn new(backend: impl Into<String>) -> Self {
        Self { backend: backend.into(), ..Default::default() }
    }
}

/// Environment assignments applied to the target program, in order.
pub fn launch_env(
    opts: &LaunchOptions,
    existing_preload: Option<OsString>,
) -> Result<Vec<(&'static str, OsString)>> {
    let library = locate_library(opts.library.as_deref())?;
    let mut vars = vec![
        (BACKEND_ENV, OsString::from(&opts.backend)),
        (PRELOAD_ENV, preload_value(&library, existing_preload.as_deref())),
    ];

    if let Some(text) = &opts.text {
        if text.is_empty() {
            return Err(anyhow!("--text must not be empty"));
        }
        vars.push((TEXT_ENV, OsString::from(text)));
    }

    if let Some(config) = &opts.config {
        let path = absolutize(config)?;
        if !path.is_file() {
            return Err(anyhow!("Config file does not exist: {}", path.display()));
        }
        xmark_core::WatermarkConfig::load_file(&path)
            .with_context(|| format!("Failed to load watermark config {}", path.display()))?;
        vars.push((CONFIG_ENV, path.into_os_string()));
    }

    Ok(vars)
}

/// Print the assignments `launch_command` would apply, one per line.
pub fn print_env_command(opts: &LaunchOptions) -> Result<()> {
    for (key, value) in launch_env(opts, env::var_os(PRELOAD_ENV))? {
        println!("{}={}", key, value.to_string_lossy());
    }
    Ok(())
}

/// Replace this process with `command[0]`, run with the watermark preloaded.
///
/// Only returns on failure.
pub fn launch_command(opts: &LaunchOptions, command: &[OsString]) -> Result<()> {
    let (program, args) =
        command.split_first().ok_or_else(|| anyhow!("No program given to launch"))?;
    let vars = launch_env(opts, env::var_os(PRELOAD_ENV))?;

    let err = Command::new(program).args(args).envs(vars).exec();
    Err(err).with_context(|| format!("Failed to execute {}", program.to_string_lossy()))
}
