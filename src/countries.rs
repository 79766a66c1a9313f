use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::{extract_html, profiles, text_field};
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;
use crate::util::fs::require_file;

/// Country ISO codes from the best-slots country selector
#[derive(Args, Debug)]
pub struct CountriesCmd {
    #[arg(long, default_value = "games_data/best_slots.html")]
    pub input: PathBuf,
    #[arg(long, default_value = "countries.txt")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct CountriesResult { countries: usize, output: String, written: bool }

pub fn run(base: &Path, args: CountriesCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::countries();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let input = cfg.input_path();
    require_file(&input)?;
    let html = fs::read_to_string(&input).with_context(|| format!("read {}", input.display()))?;

    let countries = {
        let _s = log.span(&ScrapePhase::Parse).entered();
        extract_countries(&html)?
    };
    if countries.is_empty() {
        log.warn("⚠️  No countries found in the country selector; nothing written");
        return Ok(());
    }
    log.info(format!("🌍 Found {} countries", countries.len()));

    let out = cfg.output_path();
    let written = {
        let _s = log.span(&ScrapePhase::Write).entered();
        log.report_write(&out, write_lines(&out, &countries))
    };

    if telemetry::config::json_mode() {
        log.result(&CountriesResult { countries: countries.len(), output: out.display().to_string(), written })?;
    }
    Ok(())
}

/// ISO codes in selector order; placeholder options without a value are skipped.
pub fn extract_countries(html: &str) -> Result<Vec<String>> {
    let profile = profiles::country_selector()?;
    Ok(extract_html(html, &profile)
        .iter()
        .filter_map(|r| text_field(r, "iso").map(str::to_owned))
        .collect())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut f = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    for line in lines {
        writeln!(f, "{}", line)?;
    }
    Ok(())
}
