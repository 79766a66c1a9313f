#[macro_use]
mod macros;

pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

// One factory per subcommand
pub fn countries() -> LogCtx<ops::scrape::Countries> { LogCtx::new() }
pub fn games() -> LogCtx<ops::scrape::Games> { LogCtx::new() }
pub fn best() -> LogCtx<ops::scrape::Best> { LogCtx::new() }
pub fn providers() -> LogCtx<ops::scrape::Providers> { LogCtx::new() }
pub fn details() -> LogCtx<ops::scrape::Details> { LogCtx::new() }
pub fn urls() -> LogCtx<ops::links::Urls> { LogCtx::new() }
pub fn missing() -> LogCtx<ops::links::Missing> { LogCtx::new() }
pub fn rank() -> LogCtx<ops::ranking::Rank> { LogCtx::new() }
pub fn pivot() -> LogCtx<ops::ranking::Pivot> { LogCtx::new() }
pub fn export() -> LogCtx<ops::ranking::Export> { LogCtx::new() }
