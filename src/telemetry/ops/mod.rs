pub mod scrape;
pub mod links;
pub mod ranking;
