use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::Record;
use crate::ranking::{self, Grouped, RankedItem, RankingClass};
use crate::telemetry::{self};
use crate::telemetry::ops::ranking::Phase as RankPhase;
use crate::util::json::{read_json, write_json, INDENT};

pub const SIMPLIFIED_FILE: &str = "games_simplified.json";
pub const NAMES_ONLY_FILE: &str = "games_names_only.json";
pub const UNIQUE_FILE: &str = "unique_rankings.json";

/// Simplified lists, names-only lists and distinct orderings from the per-country rankings
#[derive(Args, Debug)]
pub struct RankCmd {
    #[arg(long, default_value = "games_data/all_games_by_country.json")]
    pub input: PathBuf,
    /// Directory the three report files go to
    #[arg(long, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct RankResult { groups: usize, items: usize, unnamed: usize, unique_rankings: usize, written: Vec<String> }

/// Ranked items per group in page order, with the count of unnamed ones.
pub fn ranked_items(grouped: &Grouped<Record>) -> (Grouped<RankedItem>, usize) {
    let mut unnamed = 0usize;
    let items = grouped
        .iter()
        .map(|(group, records)| {
            let items: Vec<RankedItem> = records.iter().map(RankedItem::from_record).collect();
            unnamed += items.iter().filter(|i| !i.is_named()).count();
            (group.clone(), items)
        })
        .collect();
    (items, unnamed)
}

/// Reads the grouped listing and converts it; the count is of unnamed records.
pub(crate) fn load_ranked(path: &Path) -> Result<(Grouped<RankedItem>, usize)> {
    let grouped: Grouped<Record> = read_json(path)?;
    Ok(ranked_items(&grouped))
}

pub(crate) fn unnamed_warning(unnamed: usize) -> Option<String> {
    (unnamed > 0).then(|| format!("⚠️  {} record(s) without a name keep their position but get no pivot row", unnamed))
}

fn describe(i: usize, class: &RankingClass) -> String {
    let sample: Vec<&str> = class.ranking.iter().take(5).map(String::as_str).collect();
    format!(
        "Ranking {} (found in {} countries: {}) — sample games: {:?}...",
        i + 1, class.groups.len(), class.groups.join(", "), sample
    )
}

pub fn run(base: &Path, args: RankCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::rank();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let (items, unnamed) = {
        let _s = log.span(&RankPhase::Load).entered();
        load_ranked(&cfg.input_path())?
    };
    if let Some(m) = unnamed_warning(unnamed) { log.warn(m); }
    let item_count: usize = items.values().map(Vec::len).sum();

    let built = {
        let _s = log.span(&RankPhase::Build).entered();
        ranking::build(&items)
    };
    log.info(format!("🏁 Number of unique rankings: {}", built.unique.len()));
    for (i, class) in built.unique.iter().enumerate() {
        log.info(describe(i, class));
    }

    let dir = cfg.output_path();
    let mut written = Vec::new();
    {
        let _s = log.span(&RankPhase::Write).entered();
        let simplified = dir.join(SIMPLIFIED_FILE);
        if log.report_write(&simplified, write_json(&simplified, &built.simplified, INDENT)) { written.push(simplified); }
        let names = dir.join(NAMES_ONLY_FILE);
        if log.report_write(&names, write_json(&names, &built.names_only, INDENT)) { written.push(names); }
        let unique = dir.join(UNIQUE_FILE);
        if log.report_write(&unique, write_json(&unique, &built.unique, INDENT)) { written.push(unique); }
    }

    if telemetry::config::json_mode() {
        log.result(&RankResult {
            groups: items.len(),
            items: item_count,
            unnamed,
            unique_rankings: built.unique.len(),
            written: written.iter().map(|p| p.display().to_string()).collect(),
        })?;
    }
    Ok(())
}
