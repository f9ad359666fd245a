use super::*;

/// Opaque allocation key as written in the trace.
///
/// Addresses are never parsed as numbers: `0x1` and `0x01` are different keys.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Address(Arc<str>);

impl Address {
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  #[must_use]
  pub fn new(address: impl AsRef<str>) -> Self {
    Self(Arc::from(address.as_ref()))
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for Address {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

/// Header tag that opens an event block.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EventKind {
  Allocate,
  Free,
  Reallocate,
}

impl EventKind {
  /// Map the first field of a header line to its event kind.
  #[must_use]
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "m" => Some(Self::Allocate),
      "r" => Some(Self::Reallocate),
      "f" => Some(Self::Free),
      _ => None,
    }
  }

  #[must_use]
  pub fn tag(self) -> &'static str {
    match self {
      Self::Allocate => "m",
      Self::Reallocate => "r",
      Self::Free => "f",
    }
  }
}

/// A single allocator operation decoded from a header line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event {
  Allocate {
    address: Address,
  },
  Free {
    address: Address,
  },
  /// The block at `old` moved to `new`. `old` is released before `new` is
  /// recorded, so `new == old` only refreshes the stack.
  Reallocate {
    new: Address,
    old: Address,
  },
}

impl Event {
  #[must_use]
  pub fn kind(&self) -> EventKind {
    match self {
      Self::Allocate { .. } => EventKind::Allocate,
      Self::Reallocate { .. } => EventKind::Reallocate,
      Self::Free { .. } => EventKind::Free,
    }
  }

  /// Decode the address fields following the header tag.
  ///
  /// Returns `None` when a required address is missing. Extra trailing fields
  /// are ignored.
  #[must_use]
  pub(crate) fn from_fields(
    kind: EventKind,
    mut fields: SplitWhitespace<'_>,
  ) -> Option<Self> {
    let first = fields.next().map(Address::from)?;

    match kind {
      EventKind::Allocate => Some(Self::Allocate { address: first }),
      EventKind::Free => Some(Self::Free { address: first }),
      EventKind::Reallocate => {
        let old = fields.next().map(Address::from)?;
        Some(Self::Reallocate { new: first, old })
      }
    }
  }
}
