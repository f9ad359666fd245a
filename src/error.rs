use super::*;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while loading a trace or emitting its report.
///
/// Replaying itself cannot fail: every condition inside a trace is handled.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("failed to encode leak report as json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("failed to read trace {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("i/o error while writing leak report: {0}")]
  Write(#[source] io::Error),
}
