//! Command scripts for `replay`
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.

use anyhow::Context;
use domain::MapCommand;

/// Parse every command of a script, failing on the first bad line
pub fn parse_script(text: &str) -> anyhow::Result<Vec<MapCommand>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            MapCommand::parse_line(line).with_context(|| format!("line {}: {}", index + 1, line.trim()))
        })
        .collect()
}
