use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{load_database, Context};
use crate::output::{print_json, print_success};
use crate::password;

#[derive(Args)]
pub struct CheckArgs {
    /// Database to verify
    pub file: String,
}

pub fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let pw = password::obtain(ctx)?;
    let db = load_database(&args.file, &pw, ctx)?;

    if ctx.json_output {
        #[derive(Serialize)]
        struct Output {
            ok: bool,
            headers: usize,
            records: usize,
        }
        print_json(&Output {
            ok: true,
            headers: db.headers.len(),
            records: db.records.len(),
        })?;
    } else {
        print_success(format!(
            "{} verified: {} header fields, {} records",
            args.file,
            db.headers.len(),
            db.records.len()
        ));
    }

    Ok(())
}
