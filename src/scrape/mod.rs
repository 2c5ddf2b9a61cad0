// src/scrape/mod.rs
mod page;

pub use page::{fetch_price_page, page_url, parse_page, PricePage, RawTable};
