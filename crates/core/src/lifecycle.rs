//! Lifecycle rule types
//!
//! SDK-free representation of a bucket lifecycle rule. The adapter converts
//! these into the service's configuration format; setting rules always
//! replaces the bucket's whole configuration, never merges.

use serde::{Deserialize, Serialize};

/// Number of days after which the canned rule expires objects
pub const DEFAULT_EXPIRE_DAYS: i32 = 120;

/// A single lifecycle rule: expire objects under a prefix after N days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRule {
    /// Rule identifier, unique within the bucket configuration
    pub id: String,

    /// Key-prefix filter (empty string matches every key)
    pub prefix: String,

    /// Whether the rule is active
    pub enabled: bool,

    /// Expiration age in days
    pub expire_days: i32,
}

impl LifecycleRule {
    /// Rule expiring all matching objects after `days` days
    pub fn expire_after_days(id: impl Into<String>, days: i32) -> Self {
        Self {
            id: id.into(),
            prefix: String::new(),
            enabled: true,
            expire_days: days,
        }
    }

    /// Restrict the rule to keys under `prefix`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The bucket-wide 120-day expiry rule applied by the CLI
    pub fn default_expiry() -> Self {
        Self::expire_after_days("DeleteAfter120Days", DEFAULT_EXPIRE_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_after_days() {
        let rule = LifecycleRule::expire_after_days("cleanup", 30);
        assert_eq!(rule.id, "cleanup");
        assert_eq!(rule.prefix, "");
        assert!(rule.enabled);
        assert_eq!(rule.expire_days, 30);
    }

    #[test]
    fn test_default_expiry_rule() {
        let rule = LifecycleRule::default_expiry();
        assert_eq!(rule.id, "DeleteAfter120Days");
        assert_eq!(rule.expire_days, 120);
        assert!(rule.enabled);
        assert_eq!(rule.prefix, "");
    }

    #[test]
    fn test_with_prefix() {
        let rule = LifecycleRule::expire_after_days("logs", 7).with_prefix("logs/");
        assert_eq!(rule.prefix, "logs/");
    }
}
