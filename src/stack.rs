use super::*;

/// Frame lines captured for one event, in the order they were written.
///
/// Frames are opaque text: nothing here tries to demangle or symbolize them.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StackTrace {
  frames: Vec<String>,
}

impl StackTrace {
  #[must_use]
  pub fn frames(&self) -> &[String] {
    &self.frames
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.frames.is_empty()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.frames.len()
  }

  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, frame: impl Into<String>) {
    self.frames.push(frame.into());
  }

  /// Write every frame on its own line.
  ///
  /// # Errors
  ///
  /// Returns an error if the downstream writer reports a failure.
  pub fn write_frames<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    for frame in &self.frames {
      writeln!(writer, "{frame}")?;
    }
    Ok(())
  }
}

impl<S: Into<String>> FromIterator<S> for StackTrace {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self {
      frames: iter.into_iter().map(Into::into).collect(),
    }
  }
}
