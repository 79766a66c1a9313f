use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::rank::{load_ranked, unnamed_warning};
use crate::ranking;
use crate::table::write_ranking_csv;
use crate::telemetry::{self};
use crate::telemetry::ops::ranking::Phase as RankPhase;

/// Game-by-country rank matrix as CSV
#[derive(Args, Debug)]
pub struct PivotCmd {
    #[arg(long, default_value = "games_data/all_games_by_country.json")]
    pub input: PathBuf,
    #[arg(long, default_value = "games_data/all_games_by_country_rankings.csv")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct PivotResult { games: usize, countries: usize, output: String, written: bool }

pub(crate) fn write_csv_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> Result<usize>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write(BufWriter::new(f))?;
    Ok(())
}

pub fn run(base: &Path, args: PivotCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::pivot();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let (items, unnamed) = {
        let _s = log.span(&RankPhase::Load).entered();
        load_ranked(&cfg.input_path())?
    };
    if let Some(m) = unnamed_warning(unnamed) { log.warn(m); }

    let table = {
        let _s = log.span(&RankPhase::Build).entered();
        ranking::ranking_table(&items)
    };
    let countries = table.groups().len();
    log.info(format!("📐 {} game(s) across {} countries", table.len(), countries));

    let out = cfg.output_path();
    let written = {
        let _s = log.span(&RankPhase::Write).entered();
        log.report_write(&out, write_csv_file(&out, |w| write_ranking_csv(w, &table)))
    };

    if telemetry::config::json_mode() {
        log.result(&PivotResult { games: table.len(), countries, output: out.display().to_string(), written })?;
    }
    Ok(())
}
