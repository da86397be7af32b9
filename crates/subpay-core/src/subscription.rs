//! Normalized subscription records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized view of a billing subscription.
///
/// Carries the handful of fields downstream code actually consumes: the
/// provider's status string, the current billing period bounds as UTC
/// instants, and whether the subscription is scheduled to cancel instead of
/// renewing. The status passes through verbatim; no local vocabulary is
/// imposed on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    /// Subscription status as reported by the provider (e.g. "active").
    pub status: String,

    /// Start of the current billing period.
    pub current_period_start: DateTime<Utc>,

    /// End of the current billing period.
    pub current_period_end: DateTime<Utc>,

    /// Whether the subscription cancels at period end instead of renewing.
    pub cancel_at_period_end: bool,
}

impl SubscriptionSummary {
    /// Check whether the subscription is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Check whether the subscription will lapse at the end of the period.
    #[must_use]
    pub fn is_ending(&self) -> bool {
        self.cancel_at_period_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SubscriptionSummary {
        SubscriptionSummary {
            status: "active".to_string(),
            current_period_start: DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
            current_period_end: DateTime::from_timestamp(1_706_745_600, 0).unwrap(),
            cancel_at_period_end: false,
        }
    }

    #[test]
    fn active_status() {
        let mut summary = summary();
        assert!(summary.is_active());

        summary.status = "canceled".to_string();
        assert!(!summary.is_active());
    }

    #[test]
    fn ending_follows_cancel_flag() {
        let mut summary = summary();
        assert!(!summary.is_ending());

        summary.cancel_at_period_end = true;
        assert!(summary.is_ending());
    }

    #[test]
    fn periods_are_utc_instants() {
        let summary = summary();
        assert_eq!(summary.current_period_start.timestamp(), 1_704_067_200);
        assert_eq!(summary.current_period_end.timestamp(), 1_706_745_600);
        assert_eq!(
            summary.current_period_start.to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn serializes_periods_as_rfc3339() {
        let value = serde_json::to_value(summary()).unwrap();
        assert_eq!(value["status"], "active");
        assert_eq!(value["current_period_start"], "2024-01-01T00:00:00Z");
        assert_eq!(value["cancel_at_period_end"], false);
    }
}
