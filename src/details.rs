use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::{extract_html, profiles, ExtractionProfile, FieldValue, Record};
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;
use crate::util::fs::{load_html_dir, SourceDoc};
use crate::util::json::{write_json, INDENT};
use crate::util::outcome::{FileOutcome, Totals};

/// Per-game detail pages to one JSON array of game records
#[derive(Args, Debug)]
pub struct DetailsCmd {
    #[arg(long, default_value = "game_details")]
    pub input: PathBuf,
    #[arg(long, default_value = "game_details.json")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct DetailsResult { totals: Totals, per_file: Vec<FileOutcome>, output: String }

/// The page's record with `slug` (the file stem) as its first field.
pub fn game_record(doc: &SourceDoc, profile: &ExtractionProfile) -> Option<Record> {
    let fields = extract_html(&doc.html, profile).into_iter().next()?;
    let mut rec = Record::with_capacity(fields.len() + 1);
    rec.insert("slug".to_string(), FieldValue::Text(doc.stem.clone()));
    rec.extend(fields);
    Some(rec)
}

pub fn collect(docs: &[SourceDoc]) -> Result<(Vec<Record>, Vec<FileOutcome>)> {
    let profile = profiles::game_detail()?;
    let mut records = Vec::new();
    let mut outcomes = Vec::new();
    for doc in docs {
        match game_record(doc, &profile) {
            Some(rec) => {
                outcomes.push(FileOutcome::parsed(&doc.file, 1));
                records.push(rec);
            }
            None => outcomes.push(FileOutcome::skipped(&doc.file, "no game attribute table")),
        }
    }
    Ok((records, outcomes))
}

pub fn run(base: &Path, args: DetailsCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::details();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let set = {
        let _s = log.span(&ScrapePhase::Scan).entered();
        load_html_dir(&cfg.input_path(), |_| true)?
    };
    let (records, parsed) = {
        let _s = log.span(&ScrapePhase::Parse).entered();
        collect(&set.docs)?
    };
    let mut outcomes = set.unreadable;
    outcomes.extend(parsed);
    for o in &outcomes { log.file_outcome(o); }

    let out = cfg.output_path();
    {
        let _s = log.span(&ScrapePhase::Write).entered();
        log.report_write(&out, write_json(&out, &records, INDENT));
    }

    let totals = Totals::from_outcomes(&outcomes);
    log.totals(&totals);
    if telemetry::config::json_mode() {
        log.result(&DetailsResult { totals, per_file: outcomes, output: out.display().to_string() })?;
    }
    Ok(())
}
