use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use psafe3_core::types::{header, record};
use psafe3_core::PasswordRecord;

use super::{load_database, Context};
use crate::output::print_json;
use crate::password;

#[derive(Args)]
pub struct ListArgs {
    /// Database to list
    pub file: String,
}

#[derive(Serialize)]
struct HeaderSummary {
    name: &'static str,
    value: String,
}

#[derive(Serialize)]
struct RecordSummary {
    uuid: Option<String>,
    title: Option<String>,
    username: Option<String>,
    group: Option<String>,
}

impl RecordSummary {
    fn from_record(rec: &PasswordRecord) -> Self {
        Self {
            uuid: rec.uuid().map(|id| id.to_string()),
            title: rec.title().map(str::to_owned),
            username: rec.username().map(str::to_owned),
            group: rec.group().map(str::to_owned),
        }
    }
}

pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let pw = password::obtain(ctx)?;
    let db = load_database(&args.file, &pw, ctx)?;

    if ctx.json_output {
        #[derive(Serialize)]
        struct Output {
            headers: Vec<HeaderSummary>,
            records: Vec<RecordSummary>,
        }
        return print_json(&Output {
            headers: db
                .headers
                .iter()
                .map(|h| HeaderSummary {
                    name: header::name(h.type_code),
                    value: h.value.to_string(),
                })
                .collect(),
            records: db.records.iter().map(RecordSummary::from_record).collect(),
        });
    }

    println!("{}", "Headers".bold());
    for h in &db.headers {
        println!("  {}: {}", header::name(h.type_code).dimmed(), h.value);
    }

    println!();
    println!("{}", "Records".bold());
    for rec in &db.records {
        let title = rec.title().unwrap_or("(untitled)");
        let username = rec.username().unwrap_or("-");
        match rec.group() {
            Some(group) => println!("  {group}/{title} ({username})"),
            None => println!("  {title} ({username})"),
        }
        if let Some(id) = rec.uuid() {
            println!("    {}: {id}", record::name(record::UUID).dimmed());
        }
    }

    println!();
    println!("{} records", db.records.len());

    Ok(())
}
