use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub const INDENT: &[u8] = b"    ";
pub const NARROW_INDENT: &[u8] = b"  ";

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    super::fs::require_file(path)?;
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let v = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {} as JSON", path.display()))?;
    Ok(v)
}

/// Pretty-prints `value` to `path`, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    to_writer_indented(&mut w, value, indent)?;
    w.flush()?;
    Ok(())
}

pub fn to_writer_indented<W: Write, T: Serialize + ?Sized>(w: W, value: &T, indent: &[u8]) -> Result<()> {
    let mut ser = Serializer::with_formatter(w, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    Ok(())
}
