use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::{extract_html, profiles, Record};
use crate::ranking::Grouped;
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;
use crate::util::fs::{load_html_dir, SourceDoc};
use crate::util::json::{write_json, INDENT};
use crate::util::outcome::{FileOutcome, Totals};

const PAGE_PREFIX: &str = "best_slots_";

/// Per-country best-slots pages (`best_slots_<ISO>.html`) grouped by country
#[derive(Args, Debug)]
pub struct BestCmd {
    #[arg(long, default_value = "games_data")]
    pub input: PathBuf,
    #[arg(long, default_value = "games_data/all_games_by_country.json")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct BestResult { countries: usize, totals: Totals, per_file: Vec<FileOutcome>, output: String }

pub fn country_of(stem: &str) -> Option<&str> {
    stem.strip_prefix(PAGE_PREFIX).filter(|iso| !iso.is_empty())
}

/// Cards per country in page order. Countries whose page has no cards are
/// left out and reported as skipped.
pub fn group_by_country(docs: &[SourceDoc]) -> Result<(Grouped<Record>, Vec<FileOutcome>)> {
    let profile = profiles::ranked_listing_card()?;
    let mut grouped: Grouped<Record> = Grouped::new();
    let mut outcomes = Vec::new();
    for doc in docs {
        let Some(iso) = country_of(&doc.stem) else {
            outcomes.push(FileOutcome::skipped(&doc.file, "not a per-country page"));
            continue;
        };
        let games = extract_html(&doc.html, &profile);
        if games.is_empty() {
            outcomes.push(FileOutcome::skipped(&doc.file, "no slot cards"));
            continue;
        }
        outcomes.push(FileOutcome::parsed(&doc.file, games.len()));
        grouped.entry(iso.to_string()).or_default().extend(games);
    }
    Ok((grouped, outcomes))
}

pub fn run(base: &Path, args: BestCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::best();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let set = {
        let _s = log.span(&ScrapePhase::Scan).entered();
        load_html_dir(&cfg.input_path(), |stem| country_of(stem).is_some())?
    };

    let (grouped, parsed) = {
        let _s = log.span(&ScrapePhase::Parse).entered();
        group_by_country(&set.docs)?
    };
    let mut outcomes = set.unreadable;
    outcomes.extend(parsed);
    for o in &outcomes { log.file_outcome(o); }

    let out = cfg.output_path();
    {
        let _s = log.span(&ScrapePhase::Write).entered();
        log.report_write(&out, write_json(&out, &grouped, INDENT));
    }

    let totals = Totals::from_outcomes(&outcomes);
    log.totals(&totals);
    log.info(format!("🌍 {} countries with rankings", grouped.len()));
    if telemetry::config::json_mode() {
        log.result(&BestResult { countries: grouped.len(), totals, per_file: outcomes, output: out.display().to_string() })?;
    }
    Ok(())
}
