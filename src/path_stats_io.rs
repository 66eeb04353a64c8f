//! Tab-separated path-statistics stream.

use std::fmt::Display;
use std::io::Write;

use crate::error::StoryError;
use crate::path_enumerator::PathSink;
use crate::types::{PathKey, StoryPath};

/// Header line of the statistics stream.
pub const PATH_STATS_HEADER: &str =
  "pathLength\tendType\tnumberOfPause\tstepsToFirstPause\tpathString";

/// Rendering of an absent value, as existing readers of this output expect.
const ABSENT: &str = "None";

fn or_absent<T: Display>(v: Option<T>) -> String {
  v.map(|v| v.to_string())
    .unwrap_or_else(|| ABSENT.to_string())
}

/// Writes one line per path to `W`, after the header.
pub struct PathStatsWriter<W: Write> {
  out: W,
  lines: usize,
}

impl<W: Write> PathStatsWriter<W> {
  /// Wraps `out` and writes the header immediately.
  pub fn new(mut out: W) -> Result<Self, StoryError> {
    writeln!(out, "{}", PATH_STATS_HEADER)?;
    Ok(Self { out, lines: 0 })
  }

  pub fn write_path(&mut self, path: &StoryPath) -> Result<(), StoryError> {
    let s = &path.stats;
    writeln!(
      self.out,
      "{}\t{}\t{}\t{}\t{}",
      s.length,
      or_absent(s.end_type),
      s.pause_count,
      or_absent(s.first_pause),
      path.path_string()?
    )?;
    self.lines += 1;
    Ok(())
  }

  /// Number of path lines written so far.
  pub fn lines(&self) -> usize {
    self.lines
  }

  pub fn flush(&mut self) -> Result<(), StoryError> {
    self.out.flush()?;
    Ok(())
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> PathSink for PathStatsWriter<W> {
  fn record(&mut self, _key: PathKey, path: &StoryPath) -> Result<(), StoryError> {
    self.write_path(path)
  }
}
