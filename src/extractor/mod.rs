//! Profile-driven record extraction from saved catalog pages.
//!
//! A profile names the container elements of one page shape and the rules that
//! turn each container into a flat [`Record`]. Extraction never fails: absent
//! elements mean absent fields, and containers with no fields are dropped.

use anyhow::anyhow;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub mod profiles;
pub mod props;
pub mod rank;
pub mod record;

pub use props::{KeyStyle, LinkMode, PropertyTable};
pub use rank::RankPattern;
pub use record::{text_field, FieldValue, Record};

pub(crate) fn selector(s: &str) -> anyhow::Result<Selector> {
    Selector::parse(s).map_err(|e| anyhow!("invalid CSS selector `{}`: {:?}", s, e))
}

/// Element text, trimmed at both ends; inner spacing is kept as on the page.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Where a scalar rule looks: the container itself or its first matching descendant.
#[derive(Debug, Clone)]
pub enum Target {
    Container,
    Descendant(Selector),
}

impl Target {
    fn resolve<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match self {
            Target::Container => Some(container),
            Target::Descendant(sel) => container.select(sel).next(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FieldRule {
    Text { key: &'static str, target: Target },
    Attr { key: &'static str, target: Target, attr: &'static str },
    Properties(PropertyTable),
    Rank { key: &'static str, target: Target, pattern: RankPattern },
}

impl FieldRule {
    fn apply(&self, container: ElementRef<'_>, out: &mut Record) {
        match self {
            FieldRule::Text { key, target } => {
                if let Some(el) = target.resolve(container) {
                    let text = text_of(el);
                    if !text.is_empty() { out.insert(key.to_string(), FieldValue::Text(text)); }
                }
            }
            FieldRule::Attr { key, target, attr } => {
                let value = target.resolve(container).and_then(|el| el.value().attr(attr)).map(str::trim);
                if let Some(v) = value.filter(|v| !v.is_empty()) {
                    out.insert(key.to_string(), FieldValue::Text(v.to_string()));
                }
            }
            FieldRule::Properties(table) => table.collect(container, out),
            FieldRule::Rank { key, target, pattern } => {
                if let Some(n) = target.resolve(container).and_then(|el| pattern.parse(&text_of(el))) {
                    out.insert(key.to_string(), FieldValue::Int(n));
                }
            }
        }
    }
}

/// Selectors and rules for one page shape. Rules run in order, so later rules
/// overwrite earlier ones on a key clash.
#[derive(Debug, Clone)]
pub struct ExtractionProfile {
    pub name: &'static str,
    container: Selector,
    anchor: Option<Selector>,
    rules: Vec<FieldRule>,
}

impl ExtractionProfile {
    pub fn new(name: &'static str, container: &str) -> anyhow::Result<Self> {
        Ok(ExtractionProfile { name, container: selector(container)?, anchor: None, rules: Vec::new() })
    }

    /// Containers without a descendant matching `anchor` are malformed and yield nothing.
    pub fn anchored(mut self, anchor: &str) -> anyhow::Result<Self> {
        self.anchor = Some(selector(anchor)?);
        Ok(self)
    }

    pub fn text(mut self, key: &'static str, sel: Option<&str>) -> anyhow::Result<Self> {
        let target = target(sel)?;
        self.rules.push(FieldRule::Text { key, target });
        Ok(self)
    }

    pub fn attr(mut self, key: &'static str, sel: Option<&str>, attr: &'static str) -> anyhow::Result<Self> {
        let target = target(sel)?;
        self.rules.push(FieldRule::Attr { key, target, attr });
        Ok(self)
    }

    pub fn properties(mut self, table: PropertyTable) -> Self {
        self.rules.push(FieldRule::Properties(table));
        self
    }

    pub fn rank(mut self, key: &'static str, sel: Option<&str>, pattern: RankPattern) -> anyhow::Result<Self> {
        let target = target(sel)?;
        self.rules.push(FieldRule::Rank { key, target, pattern });
        Ok(self)
    }

    fn record_for(&self, container: ElementRef<'_>) -> Option<Record> {
        if let Some(anchor) = &self.anchor {
            container.select(anchor).next()?;
        }
        let mut rec = Record::new();
        for rule in &self.rules {
            rule.apply(container, &mut rec);
        }
        if rec.is_empty() { None } else { Some(rec) }
    }
}

fn target(sel: Option<&str>) -> anyhow::Result<Target> {
    Ok(match sel {
        Some(s) => Target::Descendant(selector(s)?),
        None => Target::Container,
    })
}

/// One record per container that yields at least one field, in document order.
pub fn extract(doc: &Html, profile: &ExtractionProfile) -> Vec<Record> {
    let records: Vec<Record> = doc
        .select(&profile.container)
        .filter_map(|c| profile.record_for(c))
        .collect();
    debug!(profile = profile.name, records = records.len(), "extract");
    records
}

pub fn extract_html(html: &str, profile: &ExtractionProfile) -> Vec<Record> {
    let doc = Html::parse_document(html);
    extract(&doc, profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_profile() -> ExtractionProfile {
        ExtractionProfile::new("card", "div.card").unwrap()
            .text("name", Some("a.title")).unwrap()
            .attr("thumbnail", Some("img"), "data-src").unwrap()
            .rank("rank", Some("span.rank"), RankPattern::standard().unwrap()).unwrap()
    }

    #[test]
    fn every_non_empty_container_once_in_order() {
        let html = r#"
            <div class="card"><a class="title"> Sweet  Bonanza </a><img data-src="/s.png"></div>
            <div class="card"></div>
            <div class="card"><a class="title">Gates of Olympus</a></div>
        "#;
        let recs = extract_html(html, &card_profile());
        assert_eq!(recs.len(), 2);
        assert_eq!(text_field(&recs[0], "name"), Some("Sweet  Bonanza"));
        assert_eq!(text_field(&recs[0], "thumbnail"), Some("/s.png"));
        assert_eq!(text_field(&recs[1], "name"), Some("Gates of Olympus"));
        assert!(!recs[1].contains_key("thumbnail"));
    }

    #[test]
    fn unmatched_rank_is_absent_not_an_error() {
        let html = r#"
            <div class="card"><a class="title">Big Bass</a><span class="rank">Rank n/a</span></div>
            <div class="card"><span class="rank">Rank 4</span></div>
        "#;
        let recs = extract_html(html, &card_profile());
        assert_eq!(recs.len(), 2);
        assert_eq!(text_field(&recs[0], "name"), Some("Big Bass"));
        assert!(!recs[0].contains_key("rank"));
        assert_eq!(recs[1]["rank"], FieldValue::Int(4));
    }

    #[test]
    fn rank_only_container_without_match_is_dropped() {
        let profile = ExtractionProfile::new("rank-only", "li").unwrap()
            .rank("rank", None, RankPattern::standard().unwrap()).unwrap();
        let recs = extract_html("<ul><li>Rank ?</li><li>Rank 9</li></ul>", &profile);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["rank"], FieldValue::Int(9));
    }

    #[test]
    fn empty_attribute_counts_as_absent() {
        let profile = ExtractionProfile::new("options", "option").unwrap()
            .attr("iso", None, "value").unwrap();
        let recs = extract_html(
            r#"<select><option value="">Choose</option><option value="CA">Canada</option></select>"#,
            &profile,
        );
        assert_eq!(recs.len(), 1);
        assert_eq!(text_field(&recs[0], "iso"), Some("CA"));
    }

    #[test]
    fn anchor_gates_the_container() {
        let profile = ExtractionProfile::new("page", "body").unwrap()
            .anchored("table.attrs").unwrap()
            .text("title", Some("h1")).unwrap();
        assert!(extract_html("<h1>Only a title</h1>", &profile).is_empty());
        let recs = extract_html("<h1>T</h1><table class=attrs></table>", &profile);
        assert_eq!(text_field(&recs[0], "title"), Some("T"));
    }

    #[test]
    fn garbage_input_yields_nothing() {
        assert!(extract_html("<<<not html", &card_profile()).is_empty());
        assert!(extract_html("", &card_profile()).is_empty());
    }
}
