pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use account_core::ports::{PortError, PortResult};
use std::collections::BTreeMap;

/// Checks that storing `value` under `key` keeps `entries` within `limit` bytes.
///
/// Size is the sum of key and value lengths over all entries, with the new
/// value replacing any existing one.
pub(crate) fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    limit: Option<usize>,
) -> PortResult<()> {
    let Some(limit) = limit else {
        return Ok(());
    };
    let others: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
    let needed = others + key.len() + value.len();
    if needed > limit {
        return Err(PortError::QuotaExceeded {
            key: key.to_string(),
            needed,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_a_value_only_counts_the_new_one() {
        let mut entries = BTreeMap::new();
        entries.insert("k".to_string(), "x".repeat(8));
        assert!(check_quota(&entries, "k", "yyyy", Some(6)).is_ok());
        assert!(check_quota(&entries, "other", "y", Some(10)).is_err());
        assert!(check_quota(&entries, "other", "y".repeat(1000).as_str(), None).is_ok());
    }
}
