use std::{
  path::Path,
  process::{Command, Stdio},
  time::{Duration, Instant},
};

use anyhow::{Context, Result};

use crate::ext::ChildExt;

/// How a single interpreter invocation is launched and awaited.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
  pub timeout: Option<Duration>,
  pub quiet: bool,
}

/// Runs `command source` to completion and returns its wall-clock duration,
/// measured from just before spawning until the child has been reaped. This
/// includes interpreter startup and teardown.
///
/// Blocks the calling thread. Callers measure one invocation at a time so that
/// runs never contend with each other.
///
/// # Errors
///
/// This will return an error if:
/// - `command` cannot be spawned.
/// - the exit status is non-zero.
/// - `options.timeout` is set and elapses first.
pub fn measure<P: AsRef<Path>>(command: &str, source: P, options: RunOptions) -> Result<Duration> {
  let source = source.as_ref();

  let mut cmd = Command::new(command);
  cmd.arg(source).stdin(Stdio::null());

  if options.quiet {
    cmd.stdout(Stdio::null()).stderr(Stdio::null());
  }

  let start = Instant::now();

  let mut child = cmd.spawn().with_context(|| format!("spawn {command:?}"))?;

  let status = match options.timeout {
    Some(timeout) => child.check_success_timeout(timeout),
    None => child.check_success(),
  };
  status.with_context(|| format!("{command:?} {source:?}"))?;

  Ok(start.elapsed())
}
