// src/core/net.rs

// One-shot HTTPS GET. Single attempt, no retry policy; the caller decides
// whether to surface the failure.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub fn http_get(url: &str) -> Result<String> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Retrieval(format!("HTTP {} for {}", status, url)));
    }
    Ok(resp.text()?)
}
