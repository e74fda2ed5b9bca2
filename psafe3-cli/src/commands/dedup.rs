use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context as AnyhowContext, Result};
use clap::Args;

use psafe3_core::dedup::dedup;

use super::{load_database, Context};
use crate::output::{print_json, print_success};
use crate::password;

#[derive(Args)]
pub struct DedupArgs {
    /// Database to deduplicate
    pub input: String,
    /// Where to write the deduplicated database
    pub output: String,
}

pub fn run(args: DedupArgs, ctx: &Context) -> Result<()> {
    let pw = password::obtain(ctx)?;
    let db = load_database(&args.input, &pw, ctx)?;

    let (deduped, stats) = dedup(&db);

    // The output is only created once the input has fully decoded, so
    // deduplicating a database onto its own path is safe.
    let out =
        File::create(&args.output).with_context(|| format!("Failed to create {}", args.output))?;
    let mut writer = BufWriter::new(out);
    deduped
        .write_to(&mut writer, &pw)
        .with_context(|| format!("Failed to write {}", args.output))?;
    writer.flush()?;

    if ctx.json_output {
        print_json(&stats)?;
    } else {
        print_success(format!("Deduplicated {} → {}", args.input, args.output));
        println!(
            "  {} records in, {} unique, {} UUID collisions repaired",
            stats.total_input, stats.unique_output, stats.uuids_fixed
        );
    }

    Ok(())
}
