use std::{
  process::{Child, ExitStatus},
  time::Duration,
};

use anyhow::{Context, Result};
use wait_timeout::ChildExt as WaitExt;

#[extend::ext]
pub impl ExitStatus {
  fn check_success(&self) -> Result<()> {
    if !self.success() {
      anyhow::bail!("exited with non-zero status {self}");
    }

    Ok(())
  }
}

#[extend::ext]
pub impl Child {
  /// Returns an error if the exit status was non-zero.
  fn check_success(&mut self) -> Result<()> {
    self.wait().context("wait")?.check_success()
  }

  /// Returns an error if the exit status was non-zero, or if the child did not
  /// exit within `timeout`. A timed out child is killed and reaped first.
  fn check_success_timeout(&mut self, timeout: Duration) -> Result<()> {
    let Some(status) = self.wait_timeout(timeout).context("wait")? else {
      self.kill().context("kill after timeout")?;
      self.wait().context("wait after kill")?;

      anyhow::bail!("timed out after {timeout:?}");
    };

    status.check_success()
  }
}
