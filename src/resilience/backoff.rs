pub const MAX_RETRY_ATTEMPTS: u32 = 5;
pub const INITIAL_RETRY_DELAY_SECS: u64 = 30;
pub const MAX_RETRY_DELAY_SECS: u64 = 600;

/// Delay before retry number `attempt + 1`, doubling from the initial delay up to the cap.
#[must_use]
pub fn retry_delay(attempt: u32) -> u64 {
    let factor = 1_u64.checked_shl(attempt).unwrap_or(u64::MAX);
    INITIAL_RETRY_DELAY_SECS
        .saturating_mul(factor)
        .min(MAX_RETRY_DELAY_SECS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { delay_secs: u64, attempt: u32 },
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryState {
    attempt_count: u32,
    delay_seconds: u64,
    is_retrying: bool,
}

impl RetryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn delay_seconds(&self) -> u64 {
        self.delay_seconds
    }

    pub fn is_retrying(&self) -> bool {
        self.is_retrying
    }

    /// Records one transport failure. Once the attempts are used up the state resets
    /// and the caller waits for the next scheduled fetch.
    pub fn record_failure(&mut self) -> RetryDecision {
        if self.attempt_count >= MAX_RETRY_ATTEMPTS {
            self.reset();
            return RetryDecision::Exhausted;
        }
        self.delay_seconds = retry_delay(self.attempt_count);
        self.is_retrying = true;
        self.attempt_count += 1;
        RetryDecision::Retry {
            delay_secs: self.delay_seconds,
            attempt: self.attempt_count,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = RetryState::new();
        assert_eq!(state.attempt_count(), 0);
        assert_eq!(state.delay_seconds(), 0);
        assert!(!state.is_retrying());
    }

    #[test]
    fn test_delay_sequence_is_capped() {
        let delays = (0..8).map(retry_delay).collect::<Vec<_>>();
        assert_eq!(delays, vec![30, 60, 120, 240, 480, 600, 600, 600]);
        assert_eq!(retry_delay(200), 600);
    }

    #[test]
    fn test_exponential_increase() {
        let mut state = RetryState::new();
        let mut delays = Vec::new();
        while let RetryDecision::Retry { delay_secs, .. } = state.record_failure() {
            delays.push(delay_secs);
            assert!(state.attempt_count() <= MAX_RETRY_ATTEMPTS);
        }
        assert_eq!(delays, vec![30, 60, 120, 240, 480]);
    }

    #[test]
    fn test_attempt_numbers_are_one_based() {
        let mut state = RetryState::new();
        assert_eq!(
            state.record_failure(),
            RetryDecision::Retry {
                delay_secs: 30,
                attempt: 1
            }
        );
        assert!(state.is_retrying());
        assert_eq!(state.delay_seconds(), 30);
    }

    #[test]
    fn test_exhaustion_resets() {
        let mut state = RetryState::new();
        for _ in 0..MAX_RETRY_ATTEMPTS {
            let _ = state.record_failure();
        }
        assert_eq!(state.attempt_count(), MAX_RETRY_ATTEMPTS);

        assert_eq!(state.record_failure(), RetryDecision::Exhausted);
        assert_eq!(state, RetryState::default());

        // A fresh cycle starts from the initial delay again.
        assert_eq!(
            state.record_failure(),
            RetryDecision::Retry {
                delay_secs: 30,
                attempt: 1
            }
        );
    }

    #[test]
    fn test_reset() {
        let mut state = RetryState::new();
        let _ = state.record_failure();
        let _ = state.record_failure();
        assert_eq!(state.attempt_count(), 2);

        state.reset();
        assert_eq!(state.attempt_count(), 0);
        assert!(!state.is_retrying());
    }
}
