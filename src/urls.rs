use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::{text_field, Record};
use crate::telemetry::{self};
use crate::telemetry::ops::links::Phase as LinksPhase;
use crate::util::fs::{file_name, html_files, require_dir};
use crate::util::json::{read_json, write_json, INDENT, NARROW_INDENT};

/// Game page links from the combined listing
#[derive(Args, Debug)]
pub struct UrlsCmd {
    #[arg(long, default_value = "games_combined.json")]
    pub input: PathBuf,
    #[arg(long, default_value = "game_urls.json")]
    pub output: PathBuf,
}

/// Game links that have no saved detail page yet
#[derive(Args, Debug)]
pub struct MissingCmd {
    #[arg(long, default_value = "game_urls.json")]
    pub input: PathBuf,
    #[arg(long, default_value = "game_details")]
    pub details: PathBuf,
    #[arg(long, default_value = "missing_game_urls.json")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct UrlsResult { urls: usize, output: String }

#[derive(Serialize)]
struct MissingResult { urls: usize, saved_pages: usize, missing: usize, output: Option<String> }

/// Non-empty `url` fields in record order.
pub fn game_urls(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| text_field(r, "url"))
        .filter(|u| !u.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Last non-empty segment of the link as written: "/en/slots/Wolf-Gold" -> "Wolf-Gold".
/// Saved detail pages are named from the raw link, so nothing is decoded or resolved.
pub fn url_slug(link: &str) -> Option<String> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

pub fn missing_urls(urls: &[String], saved: &HashSet<String>) -> Vec<String> {
    urls.iter()
        .filter(|u| match url_slug(u) {
            Some(slug) => !saved.contains(&format!("{slug}.html")),
            None => true,
        })
        .cloned()
        .collect()
}

pub fn run(base: &Path, args: UrlsCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::urls();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let records: Vec<Record> = {
        let _s = log.span(&LinksPhase::Load).entered();
        read_json(&cfg.input_path())?
    };
    let urls = game_urls(&records);
    log.info(format!("🔗 {} game URL(s) from {} record(s)", urls.len(), records.len()));

    let out = cfg.output_path();
    {
        let _s = log.span(&LinksPhase::Write).entered();
        log.report_write(&out, write_json(&out, &urls, INDENT));
    }
    if telemetry::config::json_mode() {
        log.result(&UrlsResult { urls: urls.len(), output: out.display().to_string() })?;
    }
    Ok(())
}

pub fn run_missing(base: &Path, args: MissingCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::missing();
    let _g = log.root_span_kv(cfg.kv()).entered();

    let details_dir = cfg.resolve(&args.details);
    let (urls, saved) = {
        let _s = log.span(&LinksPhase::Load).entered();
        let urls: Vec<String> = read_json(&cfg.input_path())?;
        require_dir(&details_dir)?;
        let saved: HashSet<String> = html_files(&details_dir)?.iter().map(|p| file_name(p)).collect();
        (urls, saved)
    };
    log.info(format!("📄 {} URL(s), {} saved detail page(s)", urls.len(), saved.len()));

    let missing = {
        let _s = log.span(&LinksPhase::Diff).entered();
        missing_urls(&urls, &saved)
    };
    log.info(format!("🔍 {} URL(s) without a saved page", missing.len()));

    let mut written = None;
    if missing.is_empty() {
        log.info("✅ All game URLs have corresponding HTML files");
    } else {
        let out = cfg.output_path();
        let _s = log.span(&LinksPhase::Write).entered();
        if log.report_write(&out, write_json(&out, &missing, NARROW_INDENT)) {
            written = Some(out.display().to_string());
        }
    }

    if telemetry::config::json_mode() {
        log.result(&MissingResult { urls: urls.len(), saved_pages: saved.len(), missing: missing.len(), output: written })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::FieldValue;
    use std::fs;

    #[test]
    fn urls_skip_records_without_link() {
        let mut a = Record::new();
        a.insert("url".into(), "/en/slots/A".into());
        let mut b = Record::new();
        b.insert("name".into(), "B".into());
        let mut c = Record::new();
        c.insert("url".into(), FieldValue::Text(String::new()));
        assert_eq!(game_urls(&[a, b, c]), vec!["/en/slots/A"]);
    }

    #[test]
    fn slug_from_relative_and_absolute_links() {
        assert_eq!(url_slug("/en/slots/Wolf-Gold").as_deref(), Some("Wolf-Gold"));
        assert_eq!(url_slug("https://slotcatalog.com/en/slots/Wolf-Gold/").as_deref(), Some("Wolf-Gold"));
        assert_eq!(url_slug("/"), None);
    }

    #[test]
    fn slug_keeps_non_ascii_and_spaces_verbatim() {
        assert_eq!(url_slug("/en/slots/Café-Slot").as_deref(), Some("Café-Slot"));
        assert_eq!(url_slug("/en/slots/Big Win").as_deref(), Some("Big Win"));
        let urls = vec!["/en/slots/Café-Slot".to_string(), "/en/slots/Big Win".to_string()];
        let saved: HashSet<String> = ["Café-Slot.html".to_string(), "Big Win.html".to_string()].into_iter().collect();
        assert!(missing_urls(&urls, &saved).is_empty());
    }

    #[test]
    fn only_unsaved_pages_are_missing() {
        let urls = vec!["/en/slots/A".to_string(), "/en/slots/B".to_string()];
        let saved: HashSet<String> = ["A.html".to_string()].into_iter().collect();
        assert_eq!(missing_urls(&urls, &saved), vec!["/en/slots/B"]);
    }

    #[test]
    fn missing_requires_details_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("game_urls.json"), r#"["/en/slots/A"]"#).unwrap();
        let args = MissingCmd {
            input: "game_urls.json".into(),
            details: "game_details".into(),
            output: "missing_game_urls.json".into(),
        };
        let err = run_missing(dir.path(), args).unwrap_err();
        assert!(err.to_string().contains("Input directory not found"));
    }

    #[test]
    fn missing_run_writes_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("game_details")).unwrap();
        fs::write(dir.path().join("game_details/A.html"), "<h1>A</h1>").unwrap();
        fs::write(dir.path().join("game_urls.json"), r#"["/en/slots/A", "/en/slots/B"]"#).unwrap();
        let args = MissingCmd {
            input: "game_urls.json".into(),
            details: "game_details".into(),
            output: "missing_game_urls.json".into(),
        };
        run_missing(dir.path(), args).unwrap();
        let missing: Vec<String> = read_json(&dir.path().join("missing_game_urls.json")).unwrap();
        assert_eq!(missing, vec!["/en/slots/B"]);
    }
}
