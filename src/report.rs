use super::*;

/// An allocation that was still live when the trace ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Leak {
  pub address: Address,
  pub stack: StackTrace,
}

impl Leak {
  /// Write the address, its frames, then a blank separator line.
  ///
  /// # Errors
  ///
  /// Returns an error if the downstream writer reports a failure.
  pub fn write_text<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", self.address)?;
    self.stack.write_frames(writer)?;
    writeln!(writer)
  }
}

/// Leaks left over after a full replay.
///
/// Leaks appear in the live table's iteration order, which is unspecified.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeakReport {
  leaks: Vec<Leak>,
  stats: ReplayStats,
}

impl LeakReport {
  /// Serialize the leaks and replay counters as a single JSON document.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization to JSON fails.
  pub fn export_json<W: Write>(&self, writer: W) -> Result<()> {
    serde_json::to_writer(writer, self)?;
    Ok(())
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.leaks.is_empty()
  }

  #[must_use]
  pub fn leaks(&self) -> &[Leak] {
    &self.leaks
  }

  #[must_use]
  pub(crate) fn new(leaks: Vec<Leak>, stats: ReplayStats) -> Self {
    Self { leaks, stats }
  }

  #[must_use]
  pub fn stats(&self) -> ReplayStats {
    self.stats
  }

  /// Render every leak as plain text. Writes nothing when there are no leaks.
  ///
  /// # Errors
  ///
  /// Returns an error if the downstream writer reports a failure.
  pub fn write_text<W: Write>(&self, mut writer: W) -> Result<()> {
    for leak in &self.leaks {
      leak.write_text(&mut writer).map_err(Error::Write)?;
    }
    writer.flush().map_err(Error::Write)?;
    Ok(())
  }
}
