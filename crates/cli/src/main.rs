use std::ffi::OsString;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use xmark::commands::{launch_command, print_env_command, LaunchOptions};

/// Run an X11/cairo application with a tiled watermark over its windows.
///
/// The launcher forces the X11 windowing backend, puts the xmark preload
/// module in front of the dynamic loader search order, and then replaces
/// itself with the target program.
#[derive(Parser, Debug)]
#[command(name = "xmark", version, about = "Run an application with a watermark overlay", long_about = None)]
struct Cli {
    /// Path to libxmark_preload.so. Defaults to the copy next to this executable.
    #[arg(long)]
    library: Option<String>,

    /// Watermark text (overrides the config file).
    #[arg(long)]
    text: Option<String>,

    /// Watermark config file (.json, .yaml or .yml).
    #[arg(long)]
    config: Option<String>,

    /// Windowing backend forced on the target through GDK_BACKEND.
    #[arg(long, default_value = "x11")]
    backend: String,

    /// Print the environment that would be applied and exit.
    #[arg(long, default_value_t = false)]
    print_env: bool,

    /// Program to run, followed by its arguments.
    #[arg(value_name = "PROGRAM", trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<OsString>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = LaunchOptions {
        library: cli.library,
        text: cli.text,
        config: cli.config,
        backend: cli.backend,
    };

    if cli.print_env {
        return print_env_command(&opts);
    }

    if cli.command.is_empty() {
        eprintln!("{}", Cli::command().render_usage());
        return Ok(());
    }

    launch_command(&opts, &cli.command)
}
