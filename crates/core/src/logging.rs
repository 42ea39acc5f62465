//! Diagnostic stream setup.
//!
//! Lines go to stderr as `<context>: <message>`, where the context is the
//! log target. Hooks log with their own symbol name as target.

use std::io::{self, Write};

use env_logger::{Builder, Env, Target};
use log::Record;

use crate::config::LOG_ENV;

/// Install the stderr logger, filtered by `XMARK_LOG` (default `info`).
///
/// Does nothing if the host process already installed a logger.
pub fn init() {
    let mut builder = Builder::from_env(Env::new().filter_or(LOG_ENV, "info"));
    builder.target(Target::Stderr).format(|buf, record| write_line(buf, record));
    let _ = builder.try_init();
}

/// Write one `<context>: <message>` line for `record`.
pub fn write_line<W: Write + ?Sized>(out: &mut W, record: &Record<'_>) -> io::Result<()> {
    writeln!(out, "{}: {}", record.target(), record.args())
}
