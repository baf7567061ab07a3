//! Axis categories and click targets derived from the input sequences

use crate::data::{BuildRecord, Snapshot};

/// Characters kept when a commit hash is shown on an axis
pub const SHORT_HASH_LEN: usize = 6;

/// Commit hash of every snapshot, in input order
pub fn commit_hash_list(data: &[Snapshot]) -> Vec<String> {
    data.iter().map(|d| d.commit_hash.clone()).collect()
}

/// First [`SHORT_HASH_LEN`] characters of a hash
pub fn short_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

pub fn short_hash_list(hashes: &[String]) -> Vec<String> {
    hashes.iter().map(|h| short_hash(h).to_string()).collect()
}

/// Pull-request number of every build, in input order
pub fn pull_request_number_list(builds: &[BuildRecord]) -> Vec<Option<u64>> {
    builds.iter().map(|b| b.pull_request_number).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_hash_list_preserves_order() {
        let data = vec![
            Snapshot::new("1111111aaaa"),
            Snapshot::new("2222222bbbb"),
            Snapshot::new("3333333cccc"),
        ];

        let hashes = commit_hash_list(&data);
        assert_eq!(hashes.len(), data.len());
        assert_eq!(hashes, vec!["1111111aaaa", "2222222bbbb", "3333333cccc"]);
        assert_eq!(short_hash_list(&hashes), vec!["111111", "222222", "333333"]);
    }

    #[test]
    fn test_short_hash_of_short_input() {
        assert_eq!(short_hash("abc"), "abc");
        assert_eq!(short_hash("abcdef"), "abcdef");
        assert_eq!(short_hash("abcdefg"), "abcdef");
    }

    #[test]
    fn test_pull_request_number_list() {
        let builds = vec![
            BuildRecord {
                pull_request_number: Some(1021),
                ..Default::default()
            },
            BuildRecord::default(),
        ];
        assert_eq!(pull_request_number_list(&builds), vec![Some(1021), None]);
    }
}
