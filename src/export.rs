use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::Record;
use crate::pivot::write_csv_file;
use crate::table::write_records_csv;
use crate::telemetry::{self};
use crate::telemetry::ops::ranking::Phase as RankPhase;
use crate::util::json::read_json;

/// Flat JSON record list (e.g. the combined listing) as CSV
#[derive(Args, Debug)]
pub struct ExportCmd {
    #[arg(long, default_value = "games_combined.json")]
    pub input: PathBuf,
    #[arg(long, default_value = "games_combined.csv")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct ExportResult { records: usize, output: String, written: bool }

pub fn run(base: &Path, args: ExportCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::export();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let records: Vec<Record> = {
        let _s = log.span(&RankPhase::Load).entered();
        read_json(&cfg.input_path())?
    };
    log.info(format!("📋 {} record(s) to export", records.len()));

    let out = cfg.output_path();
    let written = {
        let _s = log.span(&RankPhase::Write).entered();
        log.report_write(&out, write_csv_file(&out, |w| write_records_csv(w, &records)))
    };

    if telemetry::config::json_mode() {
        log.result(&ExportResult { records: records.len(), output: out.display().to_string(), written })?;
    }
    Ok(())
}
