// src/core/html.rs
//
// Substring-level HTML scanning. No DOM; byte offsets into the source
// document. ASCII-lowercasing keeps offsets aligned between the folded
// copy and the source.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Iterator over `<open ...>…</close>` blocks of `doc`, in document order.
/// Matching is case-insensitive; each item is the full block including tags.
pub struct Blocks<'a> {
    doc: &'a str,
    folded: String,
    open: String,
    close: String,
    close_len: usize,
    pos: usize,
}

pub fn blocks<'a>(doc: &'a str, open: &str, close: &str) -> Blocks<'a> {
    Blocks {
        doc,
        folded: ascii_lower(doc),
        open: ascii_lower(open),
        close: ascii_lower(close),
        close_len: close.len(),
        pos: 0,
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let start = self.folded.get(self.pos..)?.find(&self.open)? + self.pos;

            // Tag-name boundary: "<p" must not match "<pre".
            let boundary = self.doc.as_bytes().get(start + self.open.len());
            if !matches!(boundary, None | Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n')) {
                self.pos = start + self.open.len();
                continue;
            }

            let open_end = self.doc[start..].find('>')? + start + 1;
            let close_rel = self.folded[open_end..].find(&self.close)?;
            let end = open_end + close_rel + self.close_len;
            self.pos = end;
            return Some(&self.doc[start..end]);
        }
    }
}

/// Content between the end of the first `open_pat` tag and the following
/// `close_pat`, case-insensitive.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let folded = ascii_lower(s);
    let o = folded.find(&ascii_lower(open_pat))?;
    let after = s[o..].find('>')? + o + 1;
    let c = folded[after..].find(&ascii_lower(close_pat))?;
    Some(&s[after..after + c])
}

/// Inner content of a full `<tag ...>…</tag>` block.
pub fn inner(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

/// Drop all tags, decode common entities, collapse whitespace.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Clean text of a full tag block: inner content, tags stripped.
pub fn text(block: &str) -> String {
    strip_tags(inner(block))
}
