// src/error.rs
//
// One taxonomy for everything that can go wrong between the pricing page
// and a finished estimate. All variants surface to the user as messages;
// nothing is retried, nothing is swallowed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Network/HTTP failure, or the fetched page is missing the element
    /// we scrape (table, script blob). Page-structure assumptions are
    /// brittle; a site redesign must land here, not in a panic.
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// A field that must be numeric wasn't.
    #[error("parse error: {0}")]
    Parse(String),

    /// No SKU satisfies the filter constraints in this region.
    #[error("no matching SKUs: {0}")]
    EmptyResult(String),

    /// Non-numeric or negative user input to the cost formulas.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Retrieval(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_user_facing() {
        let e = Error::EmptyResult(s!("no SKU meets the constraints in eastus"));
        assert_eq!(e.to_string(), "no matching SKUs: no SKU meets the constraints in eastus");
    }
}
