//! Per-country ranking lists reshaped into simplified lists, distinct
//! orderings, and a game-by-country rank matrix.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::extractor::{text_field, Record};

/// Group key (country or provider code) to an on-page ordered list.
pub type Grouped<T> = IndexMap<String, Vec<T>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl RankedItem {
    pub fn named(name: impl Into<String>) -> Self {
        RankedItem { name: name.into(), thumbnail: None, provider: None }
    }

    /// A record without a name becomes an unnamed item (empty name) so it
    /// still holds its slot in the group order.
    pub fn from_record(rec: &Record) -> Self {
        RankedItem {
            name: text_field(rec, "name").unwrap_or_default().to_string(),
            thumbnail: text_field(rec, "thumbnail").map(str::to_owned),
            provider: text_field(rec, "provider").map(str::to_owned),
        }
    }

    pub fn is_named(&self) -> bool { !self.name.is_empty() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifiedEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Groups whose name sequences are identical, element for element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingClass {
    pub groups: Vec<String>,
    pub ranking: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingRow {
    pub provider: Option<String>,
    /// group key -> 1-based position; groups without the item have no entry
    pub ranks: BTreeMap<String, usize>,
}

/// Item name -> per-group rank, rows in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingTable {
    rows: IndexMap<String, RankingRow>,
}

impl RankingTable {
    pub fn get(&self, name: &str) -> Option<&RankingRow> { self.rows.get(name) }

    pub fn rank(&self, name: &str, group: &str) -> Option<usize> {
        self.rows.get(name)?.ranks.get(group).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &RankingRow)> { self.rows.iter() }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn has_provider(&self) -> bool { self.rows.values().any(|r| r.provider.is_some()) }

    pub fn groups(&self) -> BTreeSet<&str> {
        self.rows.values().flat_map(|r| r.ranks.keys().map(String::as_str)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct RankingBuild {
    pub simplified: Grouped<SimplifiedEntry>,
    pub names_only: Grouped<String>,
    pub unique: Vec<RankingClass>,
    pub table: RankingTable,
}

pub fn build(grouped: &Grouped<RankedItem>) -> RankingBuild {
    let simplified = simplify(grouped);
    let names_only = names_only(grouped);
    let unique = unique_rankings(&names_only);
    let table = ranking_table(grouped);
    RankingBuild { simplified, names_only, unique, table }
}

pub fn simplify(grouped: &Grouped<RankedItem>) -> Grouped<SimplifiedEntry> {
    grouped
        .iter()
        .map(|(group, items)| {
            let entries = items
                .iter()
                .map(|i| SimplifiedEntry { name: i.name.clone(), thumbnail: i.thumbnail.clone() })
                .collect();
            (group.clone(), entries)
        })
        .collect()
}

pub fn names_only(grouped: &Grouped<RankedItem>) -> Grouped<String> {
    grouped
        .iter()
        .map(|(group, items)| (group.clone(), items.iter().map(|i| i.name.clone()).collect()))
        .collect()
}

/// Partitions groups by ordered name sequence. Classes come out in the order
/// their first member appears; members keep input order.
pub fn unique_rankings(names_only: &Grouped<String>) -> Vec<RankingClass> {
    let mut index: HashMap<&[String], usize> = HashMap::new();
    let mut classes: Vec<RankingClass> = Vec::new();
    for (group, names) in names_only {
        match index.get(names.as_slice()) {
            Some(&i) => classes[i].groups.push(group.clone()),
            None => {
                index.insert(names.as_slice(), classes.len());
                classes.push(RankingClass { groups: vec![group.clone()], ranking: names.clone() });
            }
        }
    }
    classes
}

/// Position is the 1-based index in the group's list, unnamed items included.
/// Unnamed items get no row. A name repeated within one group keeps its last
/// position.
pub fn ranking_table(grouped: &Grouped<RankedItem>) -> RankingTable {
    let mut rows: IndexMap<String, RankingRow> = IndexMap::new();
    for (group, items) in grouped {
        for (pos, item) in items.iter().enumerate() {
            if !item.is_named() { continue; }
            let row = rows.entry(item.name.clone()).or_default();
            if row.provider.is_none() {
                row.provider = item.provider.clone();
            }
            row.ranks.insert(group.clone(), pos + 1);
        }
    }
    RankingTable { rows }
}
