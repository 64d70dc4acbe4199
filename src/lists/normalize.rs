//! Plain-text card lists.
//!
//! Lines look like deck exports: an optional quantity, the card name, and
//! optionally the printing as `(SET) number`.
//!
//! ```text
//! 4 Lightning Bolt
//! Damnation (mh2) 85
//! ```

use serde::Serialize;

/// Longest quantity token that is still stripped (`1`..`999`).
const MAX_QUANTITY_LEN: usize = 3;

/// One parsed list line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub set: Option<String>,
    pub number: Option<String>,
}

/// Trim lines, drop blank ones and strip leading quantities.
pub fn normalize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().replace(['\n', '\r'], ""))
        .filter(|line| !line.is_empty())
        .map(|line| strip_quantity(&line).to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_quantity(line: &str) -> &str {
    match line.split_once(' ') {
        Some((first, rest))
            if first.len() <= MAX_QUANTITY_LEN && first.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim_start()
        }
        _ => line,
    }
}

/// Parse `Name (SET) number`, `Name (SET)` or a bare name.
pub fn parse_line(line: &str) -> ListEntry {
    let line = line.trim();
    let bare = || ListEntry {
        name: line.to_string(),
        set: None,
        number: None,
    };

    let Some(open) = line.rfind(" (") else {
        return bare();
    };
    let Some(close) = line[open..].find(')').map(|i| open + i) else {
        return bare();
    };

    let set = line[open + 2..close].trim();
    let number = line[close + 1..].trim();
    if set.is_empty() || set.contains(' ') || number.contains(' ') {
        return bare();
    }

    ListEntry {
        name: line[..open].trim().to_string(),
        set: Some(set.to_lowercase()),
        number: (!number.is_empty()).then(|| number.to_string()),
    }
}
