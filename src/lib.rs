//! Replays allocator event traces and reports the allocations that were
//! never freed.
//!
//! A trace is a line-oriented log written by an instrumented allocator. Each
//! `m`, `r` or `f` header line is followed by the captured call stack for that
//! event, terminated by a blank line. [`Replayer`] runs the trace against a
//! [`LiveAllocationTable`] and turns whatever is still live at the end into a
//! [`LeakReport`].

mod config;
mod error;
mod event;
mod parser;
mod replay;
mod report;
mod stack;
mod table;

use {
  clap::Parser,
  serde::Serialize,
  std::{
    fmt::{self, Display, Formatter},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::{Split, SplitWhitespace},
    sync::Arc,
  },
};

pub use {
  config::Config,
  error::{Error, Result},
  event::{Address, Event, EventKind},
  parser::{Record, TraceParser},
  replay::{Replayer, replay_path},
  report::{Leak, LeakReport},
  stack::StackTrace,
  table::{LiveAllocationTable, ReplayStats},
};
