use anyhow::Result;
use std::collections::BTreeSet;
use std::io::Write;

use crate::extractor::Record;
use crate::ranking::RankingTable;

pub const RECORD_IDENTITY: &str = "name";
pub const PIVOT_IDENTITY: &str = "Game Name";
pub const SECONDARY: &str = "provider";

/// Identity column first, then the secondary column (matched case-insensitively),
/// then the rest sorted. Pinned columns appear only if present in `keys`.
pub fn ordered_columns<'a, I>(keys: I, identity: &str, secondary: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let all: BTreeSet<&str> = keys.into_iter().collect();
    let mut out: Vec<String> = Vec::with_capacity(all.len());
    if all.contains(identity) {
        out.push(identity.to_string());
    }
    let second = all.iter().find(|k| **k != identity && k.eq_ignore_ascii_case(secondary)).copied();
    if let Some(s) = second {
        out.push(s.to_string());
    }
    out.extend(
        all.into_iter()
            .filter(|k| *k != identity && Some(*k) != second)
            .map(str::to_string),
    );
    out
}

/// One row per record; missing fields are empty cells.
pub fn write_records_csv<W: Write>(w: W, records: &[Record]) -> Result<usize> {
    let columns = ordered_columns(
        records.iter().flat_map(|r| r.keys().map(String::as_str)),
        RECORD_IDENTITY,
        SECONDARY,
    );
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(&columns)?;
    for rec in records {
        wtr.write_record(columns.iter().map(|c| rec.get(c).map(|v| v.to_cell()).unwrap_or_default()))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Game-by-group matrix; absent ranks are empty cells.
pub fn write_ranking_csv<W: Write>(w: W, table: &RankingTable) -> Result<usize> {
    let groups = table.groups();
    let mut keys: Vec<&str> = vec![PIVOT_IDENTITY];
    if table.has_provider() {
        keys.push(SECONDARY);
    }
    keys.extend(groups.iter().copied());
    let columns = ordered_columns(keys, PIVOT_IDENTITY, SECONDARY);

    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(&columns)?;
    for (name, row) in table.rows() {
        let cells = columns.iter().map(|c| match c.as_str() {
            PIVOT_IDENTITY => name.clone(),
            SECONDARY => row.provider.clone().unwrap_or_default(),
            group => row.ranks.get(group).map(|n| n.to_string()).unwrap_or_default(),
        });
        wtr.write_record(cells)?;
    }
    wtr.flush()?;
    Ok(table.len())
}
