use std::path::{Path, PathBuf};

/// Where one stage reads and writes, relative to the base directory.
/// Absolute `input`/`output` paths are used as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    pub base_dir: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl StageConfig {
    pub fn new(base_dir: &Path, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        StageConfig { base_dir: base_dir.to_path_buf(), input: input.into(), output: output.into() }
    }

    pub fn input_path(&self) -> PathBuf { self.resolve(&self.input) }

    pub fn output_path(&self) -> PathBuf { self.resolve(&self.output) }

    pub fn resolve(&self, rel: &Path) -> PathBuf { self.base_dir.join(rel) }

    pub fn kv(&self) -> [(&'static str, String); 2] {
        [
            ("input", self.input_path().display().to_string()),
            ("output", self.output_path().display().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base() {
        let cfg = StageConfig::new(Path::new("/data/slotcatalog"), "games_data", "countries.txt");
        assert_eq!(cfg.input_path(), PathBuf::from("/data/slotcatalog/games_data"));
        assert_eq!(cfg.output_path(), PathBuf::from("/data/slotcatalog/countries.txt"));
    }

    #[test]
    fn absolute_override_wins() {
        let cfg = StageConfig::new(Path::new("/data"), "/tmp/in.html", "out.txt");
        assert_eq!(cfg.input_path(), PathBuf::from("/tmp/in.html"));
    }
}
