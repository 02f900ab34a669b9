// crates/cheetah-core/src/id.rs - Command id parsing
//
// Users refer to commands by the numeric id shown in listings. Deletion takes
// a list that may mix single ids and inclusive ranges:
//
// ```text
// rm 3 7-9 12   ->  [3, 7, 8, 9, 12]
// ```

use std::collections::HashSet;

use crate::command::CommandId;
use crate::error::{StoreError, StoreResult};

/// Largest number of ids a single `<start>-<end>` range may cover
pub const MAX_RANGE_LEN: i64 = 100_000;

/// Parse a single positive command id
pub fn parse_id(s: &str) -> StoreResult<CommandId> {
    let s = s.trim();
    parse_number(s).ok_or_else(|| StoreError::InvalidId(s.to_string()))
}

/// Parse a whitespace-separated list of ids and `<start>-<end>` ranges
///
/// Returns distinct ids in the order they first appear. Ranges are inclusive
/// and must not run backwards or span more than [`MAX_RANGE_LEN`] ids. The
/// first bad token aborts the whole parse.
pub fn parse_id_list(s: &str) -> StoreResult<Vec<CommandId>> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();

    for part in s.split_whitespace() {
        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_number(start), parse_number(end)),
            None => {
                let id = parse_number(part);
                (id, id)
            }
        };

        let (Some(start), Some(end)) = (start, end) else {
            return Err(StoreError::InvalidId(part.to_string()));
        };
        if start > end || end - start >= MAX_RANGE_LEN {
            return Err(StoreError::InvalidId(part.to_string()));
        }

        for id in start..=end {
            if seen.insert(id) {
                ids.push(id);
            }
        }
    }

    Ok(ids)
}

/// Digits only; no sign, no whitespace
fn parse_number(s: &str) -> Option<CommandId> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
