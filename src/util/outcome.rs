use serde::Serialize;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Parsed { file: String, records: usize },
    Skipped { file: String, reason: String },
}

impl FileOutcome {
    pub fn parsed(file: impl Into<String>, records: usize) -> Self {
        FileOutcome::Parsed { file: file.into(), records }
    }

    pub fn skipped(file: impl Into<String>, reason: impl Into<String>) -> Self {
        FileOutcome::Skipped { file: file.into(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub parsed: usize,
    pub skipped: usize,
    pub records: usize,
}

impl Totals {
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a FileOutcome>,
    {
        let mut t = Totals::default();
        for o in outcomes {
            match o {
                FileOutcome::Parsed { records, .. } => { t.parsed += 1; t.records += records; }
                FileOutcome::Skipped { .. } => t.skipped += 1,
            }
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_count_parsed_and_skipped() {
        let outcomes = vec![
            FileOutcome::parsed("a.html", 3),
            FileOutcome::skipped("b.html", "no slot cards"),
            FileOutcome::parsed("c.html", 2),
        ];
        let t = Totals::from_outcomes(&outcomes);
        assert_eq!(t, Totals { parsed: 2, skipped: 1, records: 5 });
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let s = serde_json::to_string(&FileOutcome::skipped("x.html", "unreadable")).unwrap();
        assert!(s.contains("\"status\":\"skipped\""));
        assert!(s.contains("\"reason\":\"unreadable\""));
    }
}
