use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::outcome::FileOutcome;

/// One saved page, read into memory.
#[derive(Debug, Clone)]
pub struct SourceDoc {
    pub file: String,
    pub stem: String,
    pub html: String,
}

impl SourceDoc {
    pub fn new(file: impl Into<String>, html: impl Into<String>) -> Self {
        let file = file.into();
        let stem = Path::new(&file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.clone());
        SourceDoc { file, stem, html: html.into() }
    }
}

/// Readable pages plus the files that could not be read.
#[derive(Debug, Default)]
pub struct DocSet {
    pub docs: Vec<SourceDoc>,
    pub unreadable: Vec<FileOutcome>,
}

pub fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() { bail!("Input file not found: {}", path.display()); }
    Ok(())
}

pub fn require_dir(path: &Path) -> Result<()> {
    if !path.is_dir() { bail!("Input directory not found: {}", path.display()); }
    Ok(())
}

/// `*.html` files in `dir`, sorted by file name so runs are reproducible.
pub fn html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    require_dir(dir)?;
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "html") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Reads every `*.html` file in `dir` whose stem passes `accept`.
pub fn load_html_dir<F>(dir: &Path, accept: F) -> Result<DocSet>
where
    F: Fn(&str) -> bool,
{
    let mut set = DocSet::default();
    for path in html_files(dir)? {
        let file = file_name(&path);
        let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        if !accept(&stem) { continue; }
        match fs::read_to_string(&path) {
            Ok(html) => set.docs.push(SourceDoc::new(file, html)),
            Err(e) => set.unreadable.push(FileOutcome::skipped(file, format!("unreadable: {e}"))),
        }
    }
    Ok(set)
}

pub fn file_name(path: &Path) -> String {
    path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}
