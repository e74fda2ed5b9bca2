pub mod check;
pub mod dedup;
pub mod list;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context as AnyhowContext, Result};
use indicatif::{ProgressBar, ProgressStyle};
use psafe3_core::V3File;

/// Global context passed to all commands
pub struct Context {
    pub json_output: bool,
    pub password_override: Option<String>,
}

/// Open and decode a database, with a spinner while the key stretch and
/// body decryption run (suppressed in JSON mode).
pub fn load_database(path: &str, password: &str, ctx: &Context) -> Result<V3File> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {path}"))?;

    let pb = if !ctx.json_output {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner());
        pb.set_message(format!("Reading {}...", display_name(path)));
        Some(pb)
    } else {
        None
    };

    let result = V3File::read_from(BufReader::new(file), password)
        .with_context(|| format!("Failed to read {path}"));

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    result
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
