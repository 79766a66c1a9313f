use scraper::{ElementRef, Selector};

use super::record::{FieldValue, Record};
use super::{selector, text_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// "Year Founded:" -> "year founded"
    Lower,
    /// "Year Founded:" -> "year_founded"
    Snake,
}

/// How a value cell that holds a hyperlink is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// `{text, href}` pair
    Pair,
    /// the link's visible text
    Text,
    /// the whole cell's text, link or not
    Raw,
}

/// Trim, drop trailing colons, collapse inner whitespace, lower-case.
/// Applying it twice gives the same key.
pub fn normalize_key(raw: &str, style: KeyStyle) -> String {
    let trimmed = raw.trim().trim_end_matches(|c: char| c == ':' || c.is_whitespace());
    let sep = match style { KeyStyle::Lower => " ", KeyStyle::Snake => "_" };
    trimmed.split_whitespace().collect::<Vec<_>>().join(sep).to_lowercase()
}

/// "label: value" free text, split on the first colon.
pub fn split_label(text: &str, style: KeyStyle) -> Option<(String, String)> {
    let (label, value) = text.split_once(':')?;
    let key = normalize_key(label, style);
    let value = value.trim();
    if key.is_empty() || value.is_empty() { return None; }
    Some((key, value.to_string()))
}

/// Key/value rows inside a property block.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    table: Selector,
    row: Selector,
    label: Option<Selector>,
    value: Option<Selector>,
    link: Selector,
    links: LinkMode,
    keys: KeyStyle,
}

impl PropertyTable {
    /// Rows are read as "label: value" text unless label/value cells are set.
    pub fn new(table: &str, row: &str) -> anyhow::Result<Self> {
        Ok(PropertyTable {
            table: selector(table)?,
            row: selector(row)?,
            label: None,
            value: None,
            link: selector("a")?,
            links: LinkMode::Raw,
            keys: KeyStyle::Lower,
        })
    }

    pub fn cells(mut self, label: &str, value: &str) -> anyhow::Result<Self> {
        self.label = Some(selector(label)?);
        self.value = Some(selector(value)?);
        Ok(self)
    }

    pub fn links(mut self, mode: LinkMode) -> Self { self.links = mode; self }

    pub fn keys(mut self, style: KeyStyle) -> Self { self.keys = style; self }

    /// Scans the first matching table under `scope` into `out`.
    pub fn collect(&self, scope: ElementRef<'_>, out: &mut Record) {
        let Some(table) = scope.select(&self.table).next() else { return };
        for row in table.select(&self.row) {
            let label = self.label.as_ref().and_then(|sel| row.select(sel).next());
            match label {
                Some(label) => {
                    let key = normalize_key(&text_of(label), self.keys);
                    if key.is_empty() { continue; }
                    let cell = self.value.as_ref().and_then(|sel| row.select(sel).next());
                    if let Some(v) = cell.and_then(|c| self.cell_value(c)) {
                        out.insert(key, v);
                    }
                }
                None => {
                    if let Some((key, value)) = split_label(&text_of(row), self.keys) {
                        out.insert(key, FieldValue::Text(value));
                    }
                }
            }
        }
    }

    fn cell_value(&self, cell: ElementRef<'_>) -> Option<FieldValue> {
        let link = match self.links {
            LinkMode::Raw => None,
            _ => cell.select(&self.link).next(),
        };
        let value = match (link, self.links) {
            (Some(a), LinkMode::Pair) => FieldValue::Link {
                text: text_of(a),
                href: a.value().attr("href").unwrap_or("").to_string(),
            },
            (Some(a), _) => FieldValue::Text(text_of(a)),
            (None, _) => FieldValue::Text(text_of(cell)),
        };
        match &value {
            FieldValue::Text(s) if s.is_empty() => None,
            _ => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn body(doc: &Html) -> ElementRef<'_> {
        doc.select(&selector("body").unwrap()).next().unwrap()
    }

    #[test]
    fn normalize_strips_colons_and_case() {
        assert_eq!(normalize_key("  Max Win: ", KeyStyle::Snake), "max_win");
        assert_eq!(normalize_key("Year   Founded::", KeyStyle::Lower), "year founded");
        assert_eq!(normalize_key("RTP", KeyStyle::Lower), "rtp");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  Max Win: ", "a : :", "Hit  Frequency:", "Min_Bet", "x _:", ":"] {
            for style in [KeyStyle::Lower, KeyStyle::Snake] {
                let once = normalize_key(raw, style);
                assert_eq!(normalize_key(&once, style), once, "raw={raw:?}");
            }
        }
    }

    #[test]
    fn split_label_uses_first_colon() {
        assert_eq!(
            split_label("Release Date: 2021-05-01 10:00", KeyStyle::Snake),
            Some(("release_date".into(), "2021-05-01 10:00".into()))
        );
        assert_eq!(split_label("no colon here", KeyStyle::Snake), None);
        assert_eq!(split_label("Empty:   ", KeyStyle::Snake), None);
    }

    #[test]
    fn labelled_rows_with_link_pairs() {
        let doc = Html::parse_document(r#"
            <table>
              <tr><th class="propLeft">Headquarters:</th><td class="propRight">Malta</td></tr>
              <tr><th class="propLeft">Website:</th><td class="propRight"><a href="https://example.com">example.com</a></td></tr>
              <tr><th class="propLeft">Empty:</th><td class="propRight">  </td></tr>
              <tr><td>Licenses: MGA, UKGC</td></tr>
            </table>
        "#);
        let table = PropertyTable::new("table", "tr").unwrap()
            .cells("th.propLeft", "td.propRight").unwrap()
            .links(LinkMode::Pair);
        let mut rec = Record::new();
        table.collect(body(&doc), &mut rec);

        assert_eq!(rec["headquarters"], FieldValue::Text("Malta".into()));
        assert_eq!(rec["website"], FieldValue::Link { text: "example.com".into(), href: "https://example.com".into() });
        assert!(!rec.contains_key("empty"));
        assert_eq!(rec["licenses"], FieldValue::Text("MGA, UKGC".into()));
    }

    #[test]
    fn link_text_and_raw_modes() {
        let doc = Html::parse_document(r#"
            <table><tr><td class="propLeft">Provider</td><td class="propRight">by <a href="/p">NetEnt</a></td></tr></table>
        "#);
        let base = PropertyTable::new("table", "tr").unwrap().cells("td.propLeft", "td.propRight").unwrap();

        let mut rec = Record::new();
        base.clone().links(LinkMode::Text).collect(body(&doc), &mut rec);
        assert_eq!(rec["provider"], FieldValue::Text("NetEnt".into()));

        let mut rec = Record::new();
        base.links(LinkMode::Raw).collect(body(&doc), &mut rec);
        assert_eq!(rec["provider"], FieldValue::Text("by NetEnt".into()));
    }

    #[test]
    fn missing_table_leaves_record_untouched() {
        let doc = Html::parse_document("<div>nothing</div>");
        let table = PropertyTable::new("div.propTable", "div.propTableLine").unwrap();
        let mut rec = Record::new();
        table.collect(body(&doc), &mut rec);
        assert!(rec.is_empty());
    }
}
