use std::io::{BufRead, Write};
use std::path::Path;

use crate::cli::{Console, Outcome};
use crate::config::Config;
use tracing::info;

pub fn cmd_init<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    path: &Path,
) -> anyhow::Result<Outcome> {
    if Config::create_default_at(path)? {
        info!(path = %path.display(), "Default config written");
        console.say(format!(
            "✓ Config file created: {}. Edit it and run again.",
            path.display()
        ))?;
    } else {
        console.say(format!("{} already exists; left untouched.", path.display()))?;
    }
    Ok(Outcome::Done)
}
