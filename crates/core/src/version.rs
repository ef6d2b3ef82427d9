//! Object version records and ordering
//!
//! The service's version listing order is not guaranteed newest-first, so
//! "previous version" is computed from an explicit sort on last-modified
//! rather than from list position.

use serde::{Deserialize, Serialize};

/// One recorded version of an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectVersion {
    /// Service-assigned version identifier
    pub version_id: String,

    /// Last-modified timestamp, when the service reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,
}

impl ObjectVersion {
    pub fn new(version_id: impl Into<String>, last_modified: Option<jiff::Timestamp>) -> Self {
        Self {
            version_id: version_id.into(),
            last_modified,
        }
    }
}

/// The version preceding the current one, by last-modified descending.
///
/// Returns None when fewer than two versions exist. Versions without a
/// timestamp sort after those with one.
pub fn previous_version(versions: &[ObjectVersion]) -> Option<&ObjectVersion> {
    if versions.len() < 2 {
        return None;
    }

    let mut ordered: Vec<&ObjectVersion> = versions.iter().collect();
    ordered.sort_by(|a, b| match (a.last_modified, b.last_modified) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    Some(ordered[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> Option<jiff::Timestamp> {
        jiff::Timestamp::from_second(seconds).ok()
    }

    #[test]
    fn test_previous_version_needs_two() {
        assert!(previous_version(&[]).is_none());

        let one = vec![ObjectVersion::new("v1", at(100))];
        assert!(previous_version(&one).is_none());
    }

    #[test]
    fn test_previous_version_newest_first_input() {
        let versions = vec![
            ObjectVersion::new("current", at(300)),
            ObjectVersion::new("previous", at(200)),
            ObjectVersion::new("oldest", at(100)),
        ];
        assert_eq!(previous_version(&versions).unwrap().version_id, "previous");
    }

    #[test]
    fn test_previous_version_unsorted_input() {
        // Service ordering is not trusted; second-newest wins regardless of
        // list position.
        let versions = vec![
            ObjectVersion::new("oldest", at(100)),
            ObjectVersion::new("current", at(300)),
            ObjectVersion::new("previous", at(200)),
        ];
        assert_eq!(previous_version(&versions).unwrap().version_id, "previous");
    }

    #[test]
    fn test_previous_version_missing_timestamps_sort_last() {
        let versions = vec![
            ObjectVersion::new("untimed", None),
            ObjectVersion::new("current", at(300)),
            ObjectVersion::new("previous", at(200)),
        ];
        assert_eq!(previous_version(&versions).unwrap().version_id, "previous");
    }
}
