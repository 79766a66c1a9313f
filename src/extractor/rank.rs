use anyhow::Result;
use regex::Regex;

/// "Rank 12", "rank: #12", "RANK12" all read as 12.
pub const DEFAULT_RANK_PATTERN: &str = r"(?i)\brank\D*?(\d+)";

#[derive(Debug, Clone)]
pub struct RankPattern(Regex);

impl RankPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(RankPattern(Regex::new(pattern)?))
    }

    pub fn standard() -> Result<Self> { Self::new(DEFAULT_RANK_PATTERN) }

    /// First capture group as an integer; `None` when the text doesn't match.
    pub fn parse(&self, text: &str) -> Option<i64> {
        let caps = self.0.captures(text)?;
        caps.get(1)?.as_str().parse().ok()
    }
}
