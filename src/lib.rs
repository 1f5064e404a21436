pub mod lifespan;
pub mod parser;
pub mod render;
pub mod scraper;
pub mod store;
pub mod types;

pub use scraper::WebScraper;

pub(crate) const BASE_URL: &str = "https://en.wikipedia.org";
