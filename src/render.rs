//! Hands a graph description to the external Graphviz layout tool.

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{info, instrument};

use crate::error::StoryError;

/// Layout binary used when none is configured.
pub const DEFAULT_DOT_CMD: &str = "dot";

/// Output format derived from the figure's extension (`story.png` -> `png`).
pub fn output_format(out_path: &Path) -> Result<&str, StoryError> {
  out_path
    .extension()
    .and_then(|e| e.to_str())
    .filter(|e| !e.is_empty())
    .ok_or_else(|| {
      StoryError::Render(format!(
        "cannot infer an output format from {}",
        out_path.display()
      ))
    })
}

/// Runs `<dot_cmd> <dot_path> -T<ext>` and writes its stdout to `out_path`.
#[instrument(level = "trace")]
pub fn render_figure(dot_cmd: &str, dot_path: &Path, out_path: &Path) -> Result<(), StoryError> {
  let format = output_format(out_path)?;
  let out = File::create(out_path)?;
  let status = Command::new(dot_cmd)
    .arg(dot_path)
    .arg(format!("-T{}", format))
    .stdout(Stdio::from(out))
    .status()
    .map_err(|e| StoryError::Render(format!("failed to run {}: {}", dot_cmd, e)))?;
  if !status.success() {
    return Err(StoryError::Render(format!(
      "{} exited with {}",
      dot_cmd, status
    )));
  }
  info!(figure = %out_path.display(), "figure rendered");
  Ok(())
}
