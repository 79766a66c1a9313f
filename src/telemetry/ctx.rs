use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn, error, Span};

use super::emit::{self, Meta};
use crate::util::outcome::{FileOutcome, Totals};

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) started: Instant,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    pub(crate) fn new() -> Self {
        LogCtx { json: super::config::logs_are_json(), started: Instant::now(), _marker: PhantomData }
    }

    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        if self.json {
            let details = kv_to_string(fields);
            if !details.is_empty() { info!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start"); }
        }
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{}", msg); }
    }

    pub fn error_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); error!(op = %self.op_name(), details = %details, "{}", msg); }
        else { error!("{}", msg); }
    }

    /// One line per input file: parsed with a record count, or skipped with the reason.
    pub fn file_outcome(&self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Parsed { file, records } => {
                if self.json { info!(op = %self.op_name(), file = %file, records, "file_parsed"); }
                else { info!("✅ {} — {} record(s)", file, records); }
            }
            FileOutcome::Skipped { file, reason } => {
                if self.json { warn!(op = %self.op_name(), file = %file, reason = %reason, "file_skipped"); }
                else { warn!("↩️ skip {} — {}", file, reason); }
            }
        }
    }

    pub fn totals(&self, t: &Totals) {
        if self.json { info!(op = %self.op_name(), parsed = t.parsed, skipped = t.skipped, records = t.records, "totals"); }
        else { info!("📊 {} totals — parsed={} skipped={} records={}", self.op_name(), t.parsed, t.skipped, t.records); }
    }

    /// A failed write is logged and reported as `false`; the run carries on.
    pub fn report_write(&self, path: &Path, res: Result<()>) -> bool {
        match res {
            Ok(()) => {
                self.info_kv(&format!("💾 wrote {}", path.display()), [("path", path.display().to_string())]);
                true
            }
            Err(e) => {
                self.error_kv(&format!("❌ write failed for {}: {:#}", path.display(), e), [("path", path.display().to_string())]);
                false
            }
        }
    }

    pub fn result<T: Serialize>(&self, result: &T) -> Result<()> {
        let meta = Meta { duration_ms: Some(self.started.elapsed().as_millis()) };
        emit::print_result(self.op_name(), result, Some(meta))
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use std::path::Path;

    #[test]
    fn report_write_returns_outcome() {
        let log = crate::telemetry::pivot();
        assert!(log.report_write(Path::new("out.csv"), Ok(())));
        assert!(!log.report_write(Path::new("out.csv"), Err(anyhow!("disk full"))));
    }
}
