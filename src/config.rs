use super::*;

/// Command-line configuration for the `leaktrace` binary.
#[derive(Debug, Clone, Parser)]
#[command(
  name = "leaktrace",
  version,
  about = "Report allocations in an allocator trace that were never freed"
)]
pub struct Config {
  /// Trace written by the instrumented allocator.
  #[arg(value_name = "TRACE")]
  pub trace: PathBuf,
}

impl Config {
  /// Replay the configured trace and return its leaks.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Read`] if the trace cannot be read.
  pub fn run(&self) -> Result<LeakReport> {
    replay_path(&self.trace)
  }
}
