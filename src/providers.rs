use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StageConfig;
use crate::extractor::{extract_html, profiles, ExtractionProfile, FieldValue, Record};
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;
use crate::util::fs::{load_html_dir, SourceDoc};
use crate::util::json::{write_json, NARROW_INDENT};
use crate::util::outcome::{FileOutcome, Totals};

/// Provider detail pages to one JSON array of provider records
#[derive(Args, Debug)]
pub struct ProvidersCmd {
    #[arg(long, default_value = "details")]
    pub input: PathBuf,
    #[arg(long, default_value = "provider_details.json")]
    pub output: PathBuf,
}

#[derive(Serialize)]
struct ProvidersResult { totals: Totals, per_file: Vec<FileOutcome>, output: String }

/// "NetEnt_2.html" -> "NetEnt"
pub fn provider_slug(file: &str) -> &str {
    let base = file.split('.').next().unwrap_or(file);
    base.split('_').next().unwrap_or(base)
}

pub fn provider_record(doc: &SourceDoc, profile: &ExtractionProfile) -> Option<Record> {
    let mut rec = extract_html(&doc.html, profile).into_iter().next()?;
    rec.insert("name".to_string(), FieldValue::Text(provider_slug(&doc.file).to_string()));
    Some(rec)
}

pub fn collect(docs: &[SourceDoc]) -> Result<(Vec<Record>, Vec<FileOutcome>)> {
    let profile = profiles::provider_detail()?;
    let mut records = Vec::new();
    let mut outcomes = Vec::new();
    for doc in docs {
        match provider_record(doc, &profile) {
            Some(rec) => {
                outcomes.push(FileOutcome::parsed(&doc.file, 1));
                records.push(rec);
            }
            None => outcomes.push(FileOutcome::skipped(&doc.file, "no provider attribute table")),
        }
    }
    Ok((records, outcomes))
}

pub fn run(base: &Path, args: ProvidersCmd) -> Result<()> {
    let cfg = StageConfig::new(base, args.input, args.output);
    let log = telemetry::providers();
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
        log.report_write(&out, write_json(&out, &records, NARROW_INDENT));
    }

    let totals = Totals::from_outcomes(&outcomes);
    log.totals(&totals);
    if telemetry::config::json_mode() {
        log.result(&ProvidersResult { totals, per_file: outcomes, output: out.display().to_string() })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::text_field;

    const PAGE: &str = r#"
        <div class="provider-page-scr"><img src="/img/prov/relax.png"></div>
        <div class="provFormalAttr"><table>
          <tr><th class="propLeft">Year Founded:</th><td class="propRight">2010</td></tr>
          <tr><th class="propLeft">Parent Company:</th><td class="propRight"><a href="/en/soft/Relax">Relax Gaming Ltd</a></td></tr>
        </table></div>
    "#;

    #[test]
    fn slug_is_first_underscore_part() {
        assert_eq!(provider_slug("Relax-Gaming_details.html"), "Relax-Gaming");
        assert_eq!(provider_slug("Relax-Gaming.html"), "Relax-Gaming");
    }

    #[test]
    fn record_has_logo_props_and_name_last() {
        let doc = SourceDoc::new("Relax-Gaming_1.html", PAGE);
        let rec = provider_record(&doc, &profiles::provider_detail().unwrap()).unwrap();
        assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["logo", "year founded", "parent company", "name"]);
        assert_eq!(text_field(&rec, "name"), Some("Relax-Gaming"));
        assert_eq!(rec["parent company"], FieldValue::Link { text: "Relax Gaming Ltd".into(), href: "/en/soft/Relax".into() });
    }

    #[test]
    fn pages_without_table_are_skipped() {
        let docs = vec![SourceDoc::new("A.html", "<html><body>404</body></html>"), SourceDoc::new("B.html", PAGE)];
        let (records, outcomes) = collect(&docs).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(outcomes[0], FileOutcome::skipped("A.html", "no provider attribute table"));
        assert_eq!(outcomes[1], FileOutcome::parsed("B.html", 1));
    }
}
