//! Loading of level layouts from TOML files.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use lane_defence_core::LevelLayout;

/// Reads and validates a level layout from `path`.
pub(crate) fn load(path: &Path) -> Result<LevelLayout> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid level file {}", path.display()))
}

fn parse(text: &str) -> Result<LevelLayout> {
    let level: LevelLayout = toml::from_str(text).context("malformed level layout")?;
    ensure!(
        !level.waypoints().is_empty(),
        "level layout declares no waypoints"
    );
    ensure!(
        level.width() > 0.0 && level.height() > 0.0,
        "level layout has a degenerate playfield"
    );
    Ok(level)
}
