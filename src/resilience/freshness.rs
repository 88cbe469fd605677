use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

#[must_use]
pub fn evaluate_freshness(
    last_success: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    failing: bool,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if failing {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    let age = now - last_success;

    if age > Duration::hours(3) {
        FreshnessState::Offline
    } else if age > Duration::minutes(65) || failing {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_never_succeeded() {
        let now = Utc::now();
        assert_eq!(evaluate_freshness(None, now, false), FreshnessState::Stale);
        assert_eq!(evaluate_freshness(None, now, true), FreshnessState::Offline);
    }

    #[test]
    fn test_fresh_state() {
        let now = Utc::now();
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(5)), now, false),
            FreshnessState::Fresh
        );
    }

    #[test]
    fn test_stale_state() {
        let now = Utc::now();
        // Hourly refresh missed
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(70)), now, false),
            FreshnessState::Stale
        );
        // Recent data but the last attempt failed
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(5)), now, true),
            FreshnessState::Stale
        );
    }

    #[test]
    fn test_offline_state() {
        let now = Utc::now();
        assert_eq!(
            evaluate_freshness(Some(now - Duration::hours(4)), now, false),
            FreshnessState::Offline
        );
        assert_eq!(
            evaluate_freshness(Some(now - Duration::hours(4)), now, true),
            FreshnessState::Offline
        );
    }

    #[test]
    fn test_boundaries() {
        let now = Utc::now();
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(64)), now, false),
            FreshnessState::Fresh
        );
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(66)), now, false),
            FreshnessState::Stale
        );
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(179)), now, false),
            FreshnessState::Stale
        );
        assert_eq!(
            evaluate_freshness(Some(now - Duration::minutes(181)), now, false),
            FreshnessState::Offline
        );
    }
}
