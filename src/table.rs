use std::collections::{HashMap, hash_map::Entry};

use serde::Serialize;

use crate::event::{Address, Event};
use crate::parser::Record;
use crate::report::{Leak, LeakReport};
use crate::stack::StackTrace;

/// Counters gathered while replaying a trace.
///
/// These describe the trace, not the leaks: the text report never shows them.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ReplayStats {
  pub allocations: u64,
  pub frees: u64,
  /// Headers dropped by the parser because an address was missing.
  pub malformed: u64,
  /// Allocations that landed on an address that was already live.
  pub overwrites: u64,
  pub reallocations: u64,
  /// Frees and reallocations whose released address was not live.
  pub untracked_releases: u64,
}

impl ReplayStats {
  fn on_allocation(&mut self, replaced: bool) {
    self.allocations = self.allocations.saturating_add(1);
    if replaced {
      self.overwrites = self.overwrites.saturating_add(1);
    }
  }

  fn on_free(&mut self, released: bool) {
    self.frees = self.frees.saturating_add(1);
    self.on_release(released);
  }

  fn on_reallocation(&mut self, released: bool) {
    self.reallocations = self.reallocations.saturating_add(1);
    self.on_release(released);
  }

  fn on_release(&mut self, released: bool) {
    if !released {
      self.untracked_releases = self.untracked_releases.saturating_add(1);
    }
  }
}

/// Addresses that are currently allocated, each with the stack that
/// allocated it.
#[derive(Debug, Default)]
pub struct LiveAllocationTable {
  live: HashMap<Address, StackTrace>,
  stats: ReplayStats,
}

impl LiveAllocationTable {
  /// Apply one event. Never fails: releasing an address that is not live is
  /// a no-op and allocating over a live address replaces its stack.
  pub fn apply(&mut self, event: Event, stack: StackTrace) {
    match event {
      Event::Allocate { address } => {
        tracing::trace!(%address, frames = stack.len(), "allocate");
        let replaced = self.insert(address, stack);
        self.stats.on_allocation(replaced);
      }
      Event::Reallocate { new, old } => {
        tracing::trace!(%new, %old, frames = stack.len(), "reallocate");
        // Release first so that reallocating in place keeps the new stack.
        let released = self.live.remove(&old).is_some();
        self.insert(new, stack);
        self.stats.on_reallocation(released);
      }
      Event::Free { address } => {
        tracing::trace!(%address, "free");
        let released = self.live.remove(&address).is_some();
        self.stats.on_free(released);
      }
    }
  }

  #[must_use]
  pub fn contains(&self, address: &Address) -> bool {
    self.live.contains_key(address)
  }

  #[must_use]
  pub fn get(&self, address: &Address) -> Option<&StackTrace> {
    self.live.get(address)
  }

  /// Replay a stream of parsed records in order.
  pub fn ingest<I>(&mut self, records: I)
  where
    I: IntoIterator<Item = Record>,
  {
    for record in records {
      self.apply(record.event, record.stack);
    }
  }

  fn insert(&mut self, address: Address, stack: StackTrace) -> bool {
    match self.live.entry(address) {
      Entry::Occupied(mut entry) => {
        entry.insert(stack);
        true
      }
      Entry::Vacant(entry) => {
        entry.insert(stack);
        false
      }
    }
  }

  /// Finish the replay and turn every live allocation into a leak.
  #[must_use]
  pub fn into_report(self) -> LeakReport {
    let leaks = self
      .live
      .into_iter()
      .map(|(address, stack)| Leak { address, stack })
      .collect();

    LeakReport::new(leaks, self.stats)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.live.is_empty()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.live.len()
  }

  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn record_malformed(&mut self, count: u64) {
    self.stats.malformed = self.stats.malformed.saturating_add(count);
  }

  #[must_use]
  pub fn stats(&self) -> ReplayStats {
    self.stats
  }
}
