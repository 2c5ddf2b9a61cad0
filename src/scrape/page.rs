// src/scrape/page.rs
//
// The one module that knows what the pricing page looks like.
// Assumptions (by design):
// - the first <table> on the page is the VM price table
// - column names sit in <th> cells of the table's first header row
// - data rows are <tr> inside <tbody>, one <td> per column
// - some page builds ship the rows as a JSON array of objects inside a
//   <script> element instead of table markup
// - a <p> element whose text contains "updated" carries the site's
//   price-refresh note
//
// Any of these failing is a Retrieval error, never a panic.

use serde_json::Value;

use crate::config::consts::BASE_URL;
use crate::config::options::Tier;
use crate::core::{html, net};
use crate::error::{Error, Result};

/// Untyped page table: column names + string cells, exactly as scraped.
#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything taken from one fetched document.
#[derive(Clone, Debug)]
pub struct PricePage {
    pub table: RawTable,
    /// The site's "prices updated ..." note, if present.
    pub updated: Option<String>,
}

pub fn page_url(region: &str, tier: Tier) -> String {
    format!("{}?region={}&tier={}", BASE_URL, region, tier.query_value())
}

/// Fetch the pricing page for (region, tier) and parse it.
pub fn fetch_price_page(region: &str, tier: Tier) -> Result<PricePage> {
    let url = page_url(region, tier);
    logf!("Fetch: GET {}", url);
    let doc = net::http_get(&url)?;
    let page = parse_page(&doc)?;
    logf!(
        "Fetch: OK region={} tier={} rows={}",
        region,
        tier.query_value(),
        page.table.rows.len()
    );
    Ok(page)
}

/// Parse a fetched document: table markup first, then the script-embedded
/// JSON array. Neither present → Retrieval.
pub fn parse_page(doc: &str) -> Result<PricePage> {
    let table = match parse_html_table(doc) {
        Some(t) if !t.rows.is_empty() => t,
        _ => parse_script_array(doc).ok_or_else(|| {
            Error::Retrieval(s!("no price table or embedded price data in page"))
        })?,
    };
    Ok(PricePage {
        table,
        updated: find_updated_note(doc),
    })
}

/* ---------------- HTML table ---------------- */

fn parse_html_table(doc: &str) -> Option<RawTable> {
    let table = html::slice_between_ci(doc, "<table", "</table>")?;

    // First row that actually carries <th> cells is the header row.
    let headers = html::blocks(table, "<tr", "</tr>")
        .map(|tr| html::blocks(tr, "<th", "</th>").map(html::text).collect::<Vec<_>>())
        .find(|h| !h.is_empty())
        .unwrap_or_default();

    // Data rows live in <tbody>; fall back to the table itself.
    let body = html::slice_between_ci(doc, "<tbody", "</tbody>").unwrap_or(table);

    let mut rows = Vec::new();
    for tr in html::blocks(body, "<tr", "</tr>") {
        let cells: Vec<String> = html::blocks(tr, "<td", "</td>").map(html::text).collect();
        if cells.is_empty() {
            continue;
        }
        rows.push(cells);
    }

    if headers.is_empty() && rows.is_empty() {
        return None;
    }
    Some(RawTable { headers, rows })
}

/* ---------------- script-embedded JSON ---------------- */

/// Newer page builds assign the table to a JS variable as a JSON array of
/// objects. Take the first script whose bracketed payload parses as an
/// array of objects with a name-like key.
fn parse_script_array(doc: &str) -> Option<RawTable> {
    for script in html::blocks(doc, "<script", "</script>") {
        let body = html::inner(script);
        let (Some(start), Some(end)) = (body.find('['), body.rfind(']')) else {
            continue;
        };
        if end <= start {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(&body[start..=end]) else {
            continue;
        };
        if let Some(table) = array_to_table(&value) {
            return Some(table);
        }
    }
    None
}

fn array_to_table(value: &Value) -> Option<RawTable> {
    let items = value.as_array()?;
    let first = items.first()?.as_object()?;

    // Guard against unrelated JS arrays: the VM table has a name column.
    let headers: Vec<String> = first.keys().cloned().collect();
    if !headers.iter().any(|h| html::ascii_lower(h).contains("name")) {
        return None;
    }

    let rows = items
        .iter()
        .filter_map(|item| item.as_object())
        .map(|obj| headers.iter().map(|k| cell_text(obj.get(k))).collect())
        .collect();

    Some(RawTable { headers, rows })
}

fn cell_text(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => s!(),
        Some(other) => other.to_string(),
    }
}

/* ---------------- "prices updated" note ---------------- */

fn find_updated_note(doc: &str) -> Option<String> {
    html::blocks(doc, "<p", "</p>")
        .map(html::text)
        .find(|t| t.contains("updated"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_DOC: &str = r#"
        <html><body>
        <p>Prices last updated 3 hours ago</p>
        <table class="table">
          <thead><tr>
            <th>VM Name</th><th>vCPUs</th><th>Memory (GiB)</th>
            <th>Linux Cost</th><th>Windows Cost</th>
            <th>Best price region / Diff</th>
          </tr></thead>
          <tbody>
            <tr><td>Standard_B2s</td><td>2</td><td>4</td>
                <td>$0.0496</td><td>$0.0608</td><td>westus2 / 13.9%</td></tr>
            <tr><td>Standard_D2s_v3</td><td>2</td><td>8</td>
                <td>0.1104</td><td>0.2</td><td></td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_table_markup() {
        let page = parse_page(TABLE_DOC).unwrap();
        assert_eq!(page.table.headers[0], "VM Name");
        assert_eq!(page.table.rows.len(), 2);
        assert_eq!(page.table.rows[0][0], "Standard_B2s");
        assert_eq!(page.table.rows[0][3], "$0.0496");
        assert_eq!(page.updated.as_deref(), Some("Prices last updated 3 hours ago"));
    }

    #[test]
    fn parses_script_embedded_array() {
        let doc = r#"
            <html><body><script>
            var vms = [
              {"name":"Standard_B2s","numberOfCores":2,"memoryGb":4.0,
               "linuxPrice":0.0496,"windowsPrice":0.0608},
              {"name":"Standard_D2s_v3","numberOfCores":2,"memoryGb":8.0,
               "linuxPrice":0.1104,"windowsPrice":0.2}
            ];
            </script></body></html>
        "#;
        let page = parse_page(doc).unwrap();
        assert_eq!(page.table.rows.len(), 2);
        // serde_json maps iterate in key order; every row aligns to headers.
        let name_ix = page.table.headers.iter().position(|h| h == "name").unwrap();
        assert_eq!(page.table.rows[1][name_ix], "Standard_D2s_v3");
        assert!(page.updated.is_none());
    }

    #[test]
    fn unrelated_script_arrays_are_ignored() {
        let doc = r#"<script>var xs = [1, 2, 3];</script>"#;
        assert!(matches!(parse_page(doc), Err(Error::Retrieval(_))));
    }

    #[test]
    fn missing_table_is_retrieval_error() {
        let err = parse_page("<html><body><h1>503</h1></body></html>").unwrap_err();
        assert!(matches!(err, Error::Retrieval(_)));
    }

    #[test]
    fn updated_note_needs_the_word() {
        let doc = r#"<p>something else</p><table><tr><th>VM Name</th></tr>
                     <tbody><tr><td>A</td></tr></tbody></table>"#;
        let page = parse_page(doc).unwrap();
        assert!(page.updated.is_none());
    }

    #[test]
    fn page_url_carries_region_and_tier() {
        assert_eq!(
            page_url("eastus", Tier::LowPriority),
            "https://azureprice.net/?region=eastus&tier=low"
        );
        assert_eq!(
            page_url("westus2", Tier::Dedicated),
            "https://azureprice.net/?region=westus2&tier=standard"
        );
    }
}
