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

/// Provider game listings (`<provider>_games.html`) to per-provider and combined JSON
#[derive(Args, Debug)]
pub struct GamesCmd {
    #[arg(long, default_value = "providers/games_data")]
    pub input: PathBuf,
    #[arg(long, default_value = "games_combined.json")]
    pub output: PathBuf,
}

/// Cards parsed from one provider listing file.
#[derive(Debug)]
pub struct ProviderBatch {
    pub file: String,
    pub stem: String,
    pub games: Vec<Record>,
}

impl ProviderBatch {
    pub fn outcome(&self) -> FileOutcome {
        if self.games.is_empty() {
            FileOutcome::skipped(&self.file, "no slot cards")
        } else {
            FileOutcome::parsed(&self.file, self.games.len())
        }
    }
}

#[derive(Serialize)]
struct GamesResult { totals: Totals, per_file: Vec<FileOutcome>, output: String }

pub fn provider_name(stem: &str) -> String {
    stem.replace("_games", "")
}

/// Cards of one listing page, each tagged with the provider named by the file.
pub fn provider_games(doc: &SourceDoc, profile: &ExtractionProfile) -> Vec<Record> {
    let provider = provider_name(&doc.stem);
    extract_html(&doc.html, profile)
        .into_iter()
        .map(|mut rec| {
            rec.insert("provider".to_string(), FieldValue::Text(provider.clone()));
            rec
        })
        .collect()
}

pub fn collect(docs: &[SourceDoc]) -> Result<Vec<ProviderBatch>> {
    let profile = profiles::listing_card()?;
    Ok(docs
        .iter()
        .map(|doc| ProviderBatch { file: doc.file.clone(), stem: doc.stem.clone(), games: provider_games(doc, &profile) })
        .collect())
}

/// Concatenation of all batches, in file order.
pub fn combine(batches: &[ProviderBatch]) -> Vec<Record> {
    batches.iter().flat_map(|b| b.games.iter().cloned()).collect()
}

pub fn run(base: &Path, args: GamesCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::games();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let dir = cfg.input_path();
    let set = {
        let _s = log.span(&ScrapePhase::Scan).entered();
        load_html_dir(&dir, |_| true)?
    };
    log.info(format!("📂 {} listing file(s) in {}", set.docs.len(), dir.display()));

    let batches = {
        let _s = log.span(&ScrapePhase::Parse).entered();
        collect(&set.docs)?
    };

    let mut outcomes: Vec<FileOutcome> = set.unreadable;
    for batch in &batches {
        let outcome = batch.outcome();
        log.file_outcome(&outcome);
        if matches!(outcome, FileOutcome::Parsed { .. }) {
            let _s = log.span_kv(&ScrapePhase::Write, [("file", batch.file.clone())]).entered();
            let path = dir.join(format!("{}.json", batch.stem));
            log.report_write(&path, write_json(&path, &batch.games, INDENT));
        }
        outcomes.push(outcome);
    }

    let combined = {
        let _s = log.span(&ScrapePhase::Merge).entered();
        combine(&batches)
    };
    let out = cfg.output_path();
    {
        let _s = log.span(&ScrapePhase::Write).entered();
        log.report_write(&out, write_json(&out, &combined, INDENT));
    }

    let totals = Totals::from_outcomes(&outcomes);
    log.totals(&totals);
    if telemetry::config::json_mode() {
        log.result(&GamesResult { totals, per_file: outcomes, output: out.display().to_string() })?;
    }
    Ok(())
}
