use super::*;

/// Drives a trace through the parser into a [`LiveAllocationTable`].
///
/// A replayer is single use: feed it the trace, then call
/// [`Replayer::finish`] to get the leaks. Several traces may be fed into one
/// table; each is parsed on its own, so a stack block left open at the end of
/// one trace is closed there and never continues into the next.
#[derive(Debug, Default)]
pub struct Replayer {
  table: LiveAllocationTable,
}

impl Replayer {
  /// Stop replaying and report everything that is still live.
  #[must_use]
  pub fn finish(self) -> LeakReport {
    let report = self.table.into_report();
    let stats = report.stats();

    tracing::debug!(
      leaks = report.leaks().len(),
      allocations = stats.allocations,
      reallocations = stats.reallocations,
      frees = stats.frees,
      untracked_releases = stats.untracked_releases,
      overwrites = stats.overwrites,
      malformed = stats.malformed,
      "replay finished"
    );

    report
  }

  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Read the whole file at `path` and replay it.
  ///
  /// Bytes that are not valid UTF-8 are replaced rather than rejected.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Read`] if the file cannot be read.
  pub fn replay_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| Error::Read {
      path: path.to_path_buf(),
      source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded trace");

    Ok(self.replay_str(&String::from_utf8_lossy(&bytes)))
  }

  /// Replay trace text that is already in memory.
  pub fn replay_str(&mut self, trace: &str) -> &mut Self {
    let mut parser = TraceParser::new(trace);
    self.table.ingest(parser.by_ref());
    self.table.record_malformed(parser.malformed());
    self
  }

  #[must_use]
  pub fn table(&self) -> &LiveAllocationTable {
    &self.table
  }
}

/// Replay the trace at `path` and return its leaks.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read.
pub fn replay_path(path: impl AsRef<Path>) -> Result<LeakReport> {
  let mut replayer = Replayer::new();
  replayer.replay_file(path)?;
  Ok(replayer.finish())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leaks_of(trace: &str) -> Vec<Leak> {
    let mut replayer = Replayer::new();
    replayer.replay_str(trace);
    replayer.finish().leaks().to_vec()
  }

  #[test]
  fn freed_block_is_not_reported() {
    let leaks = leaks_of("m 0x1 frameA frameB\n\nf 0x1\n\nm 0x2\nframeC\n\n");

    assert_eq!(leaks.len(), 1);
    assert_eq!(leaks[0].address, Address::from("0x2"));
    assert_eq!(leaks[0].stack.frames(), ["frameC"]);
  }

  #[test]
  fn reallocation_chain_reports_only_final_address() {
    let leaks = leaks_of("m 0x5\nf1\n\nr 0x6 0x5\nf2\n\n");

    assert_eq!(leaks.len(), 1);
    assert_eq!(leaks[0].address, Address::from("0x6"));
    assert_eq!(leaks[0].stack.frames(), ["f2"]);
  }

  #[test]
  fn clean_trace_gives_empty_report() {
    let mut replayer = Replayer::new();
    replayer.replay_str("m 0x1\nmain\n\nf 0x1\n\n");

    assert!(replayer.finish().is_empty());
  }

  #[test]
  fn open_stack_does_not_continue_into_next_trace() {
    let mut replayer = Replayer::new();
    replayer.replay_str("m 0x1\nalpha").replay_str("m 0x2\nbeta\n\n");

    let table = replayer.table();
    assert_eq!(table.len(), 2);
    assert_eq!(
      table.get(&Address::from("0x1")).map(StackTrace::frames),
      Some(["alpha".to_string()].as_slice())
    );
  }

  #[test]
  fn noise_between_events_is_ignored() {
    let trace = "\
==1234== started
m 0x10 32
./app(alloc+0x10)

some unrelated output
f 0x10 0
./app(release+0x4)

";
    assert!(leaks_of(trace).is_empty());
  }

  #[test]
  fn malformed_headers_are_counted() {
    let mut replayer = Replayer::new();
    replayer.replay_str("f\n\nm 0x1\nmain\n\n");

    let report = replayer.finish();
    assert_eq!(report.leaks().len(), 1);
    assert_eq!(report.stats().malformed, 1);
  }

  #[test]
  fn consecutive_traces_share_one_table() {
    let mut replayer = Replayer::new();
    replayer.replay_str("m 0x1\na\n\n").replay_str("f 0x1\n\n");

    assert!(replayer.table().is_empty());
  }

  #[test]
  fn replays_trace_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file
      .write_all(b"m 0xaa 8\nmain\n\nm 0xbb 8\nmain\n\nf 0xaa 0\n\n")
      .expect("write trace");

    let report = replay_path(file.path()).expect("readable trace");
    assert_eq!(report.leaks().len(), 1);
    assert_eq!(report.leaks()[0].address, Address::from("0xbb"));
  }

  #[test]
  fn invalid_utf8_is_replaced() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file
      .write_all(b"m 0x1\nframe \xff\n\n")
      .expect("write trace");

    let report = replay_path(file.path()).expect("readable trace");
    assert_eq!(report.leaks()[0].stack.frames(), ["frame \u{fffd}"]);
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.trace");

    let err = replay_path(&path).expect_err("file does not exist");
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("missing.trace"));
  }
}
