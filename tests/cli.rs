use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn leaktrace() -> Command {
  Command::new(assert_cmd::cargo::cargo_bin!("leaktrace"))
}

#[test]
fn prints_unfreed_allocation_with_its_stack() {
  let dir = tempdir().expect("temp dir");
  let trace = dir.path().join("run.trace");
  fs::write(
    &trace,
    "m 0x1 16\nframeA\nframeB\n\nf 0x1 0\n\nm 0x2 8\nframeC\n\n",
  )
  .expect("write trace");

  leaktrace()
    .arg(&trace)
    .assert()
    .success()
    .stdout("0x2\nframeC\n\n");
}

#[test]
fn reallocated_block_is_reported_at_its_new_address() {
  let dir = tempdir().expect("temp dir");
  let trace = dir.path().join("realloc.trace");
  fs::write(&trace, "m 0x5 4\nf1\n\nr 0x6 0x5 8\nf2\n\n").expect("write trace");

  leaktrace()
    .arg(&trace)
    .assert()
    .success()
    .stdout("0x6\nf2\n\n");
}

#[test]
fn clean_trace_prints_nothing() {
  let dir = tempdir().expect("temp dir");
  let trace = dir.path().join("clean.trace");
  fs::write(&trace, "m 0x1\nmain\n\nf 0x1\nmain\n\nf 0x1\n\n")
    .expect("write trace");

  leaktrace().arg(&trace).assert().success().stdout("");
}

#[test]
fn unreadable_trace_fails() {
  let dir = tempdir().expect("temp dir");

  leaktrace()
    .arg(dir.path().join("does-not-exist.trace"))
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("does-not-exist.trace"));
}

#[test]
fn path_argument_is_required() {
  leaktrace().assert().failure();
}
