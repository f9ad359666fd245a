use super::*;

/// One decoded event together with the stack captured for it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Record {
  pub event: Event,
  /// 1-based line number of the header in the trace.
  pub line: usize,
  pub stack: StackTrace,
}

/// Forward-only cursor over a trace that yields one [`Record`] per event.
///
/// Lines whose first field is not `m`, `r` or `f` are skipped. A recognised
/// header swallows every following line up to and including the next empty
/// line; those lines become the record's stack. Only a line with no bytes at
/// all is a terminator, and frame text is kept byte for byte. Running out of
/// input while collecting a stack ends it early without error.
#[derive(Debug)]
pub struct TraceParser<'a> {
  line_no: usize,
  lines: Split<'a, char>,
  malformed: u64,
}

impl<'a> TraceParser<'a> {
  /// Consume frame lines up to and including the blank terminator.
  fn collect_stack(&mut self) -> StackTrace {
    let mut stack = StackTrace::new();

    for line in self.lines.by_ref() {
      self.line_no += 1;

      if line.is_empty() {
        break;
      }

      stack.push(line);
    }

    stack
  }

  /// Number of recognised headers dropped so far because an address field
  /// was missing.
  #[must_use]
  pub fn malformed(&self) -> u64 {
    self.malformed
  }

  #[must_use]
  pub fn new(trace: &'a str) -> Self {
    Self {
      line_no: 0,
      lines: trace.split('\n'),
      malformed: 0,
    }
  }
}

impl Iterator for TraceParser<'_> {
  type Item = Record;

  fn next(&mut self) -> Option<Record> {
    loop {
      let header = self.lines.next()?;
      self.line_no += 1;
      let line = self.line_no;

      let mut fields = header.split_whitespace();
      let Some(kind) = fields.next().and_then(EventKind::from_tag) else {
        continue;
      };

      // Consumed even for an unusable header: its frames must not be read
      // as headers.
      let stack = self.collect_stack();

      match Event::from_fields(kind, fields) {
        Some(event) => return Some(Record { event, line, stack }),
        None => {
          self.malformed = self.malformed.saturating_add(1);
          tracing::warn!(
            line,
            tag = kind.tag(),
            "skipping event header with missing address"
          );
        }
      }
    }
  }
}
