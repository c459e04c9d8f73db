use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityConfig {
    pub idle_timeout: Duration,
    /// When set, the monitor enters `Warned` this long before expiry.
    pub warn_before: Option<Duration>,
    /// The last-seen marker moves at most once per this interval.
    pub activity_granularity: Duration,
}

impl InactivityConfig {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout,
            warn_before: None,
            activity_granularity: Duration::seconds(5),
        }
    }

    pub fn with_warning(mut self, warn_before: Duration) -> Self {
        self.warn_before = (warn_before > Duration::zero() && warn_before < self.idle_timeout)
            .then_some(warn_before);
        self
    }

    pub fn with_granularity(mut self, granularity: Duration) -> Self {
        self.activity_granularity = granularity.max(Duration::zero());
        self
    }
}

impl Default for InactivityConfig {
    fn default() -> Self {
        Self::new(Duration::minutes(30)).with_warning(Duration::minutes(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    Active,
    Warned,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAction {
    None,
    Warn,
    Expire,
}

/// Idle-timeout state machine. Time is always passed in so the caller owns
/// the clock.
#[derive(Debug, Clone)]
pub struct InactivityMonitor {
    config: InactivityConfig,
    state: IdleState,
    last_activity: DateTime<Utc>,
}

impl InactivityMonitor {
    pub fn new(config: InactivityConfig, now: DateTime<Utc>) -> Self {
        Self {
            config,
            state: IdleState::Active,
            last_activity: now,
        }
    }

    pub fn state(&self) -> IdleState {
        self.state
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn config(&self) -> &InactivityConfig {
        &self.config
    }

    /// Returns whether the last-seen marker moved.
    pub fn record_activity(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            IdleState::Expired => false,
            IdleState::Warned => {
                self.state = IdleState::Active;
                self.last_activity = now;
                true
            }
            IdleState::Active => {
                if now - self.last_activity < self.config.activity_granularity {
                    return false;
                }
                self.last_activity = now;
                true
            }
        }
    }

    pub fn poll(&mut self, now: DateTime<Utc>, authenticated: bool) -> IdleAction {
        if !authenticated {
            if self.state != IdleState::Expired {
                self.state = IdleState::Active;
                self.last_activity = now;
            }
            return IdleAction::None;
        }

        let idle_for = now - self.last_activity;
        match self.state {
            IdleState::Expired => IdleAction::None,
            _ if idle_for >= self.config.idle_timeout => {
                self.state = IdleState::Expired;
                IdleAction::Expire
            }
            IdleState::Active => match self.config.warn_before {
                Some(warn_before) if idle_for >= self.config.idle_timeout - warn_before => {
                    self.state = IdleState::Warned;
                    IdleAction::Warn
                }
                _ => IdleAction::None,
            },
            IdleState::Warned => IdleAction::None,
        }
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.config.idle_timeout - (now - self.last_activity)).max(Duration::zero())
    }

    pub fn session_established(&mut self, now: DateTime<Utc>) {
        self.state = IdleState::Active;
        self.last_activity = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap()
    }

    fn monitor(timeout_secs: i64) -> InactivityMonitor {
        InactivityMonitor::new(InactivityConfig::new(Duration::seconds(timeout_secs)), t0())
    }

    #[test]
    fn stays_active_just_before_timeout() {
        let mut m = monitor(600);
        let almost = t0() + Duration::seconds(600) - Duration::milliseconds(1);
        assert_eq!(m.poll(almost, true), IdleAction::None);
        assert_eq!(m.state(), IdleState::Active);
    }

    #[test]
    fn expires_exactly_once() {
        let mut m = monitor(600);
        let past = t0() + Duration::seconds(601);
        assert_eq!(m.poll(past, true), IdleAction::Expire);
        assert_eq!(m.poll(past + Duration::seconds(5), true), IdleAction::None);
        assert_eq!(m.poll(past + Duration::minutes(30), true), IdleAction::None);
        assert_eq!(m.state(), IdleState::Expired);
    }

    #[test]
    fn never_fires_without_a_session() {
        let mut m = monitor(60);
        assert_eq!(m.poll(t0() + Duration::hours(2), false), IdleAction::None);
        assert_eq!(m.state(), IdleState::Active);
        // the idle clock restarts when a session shows up
        assert_eq!(m.poll(t0() + Duration::hours(2) + Duration::seconds(30), true), IdleAction::None);
    }

    #[test]
    fn activity_resets_the_clock() {
        let mut m = monitor(600);
        assert!(m.record_activity(t0() + Duration::seconds(500)));
        assert_eq!(m.poll(t0() + Duration::seconds(900), true), IdleAction::None);
        assert_eq!(m.poll(t0() + Duration::seconds(1100), true), IdleAction::Expire);
    }

    #[test]
    fn high_frequency_activity_is_throttled() {
        let config = InactivityConfig::new(Duration::seconds(600))
            .with_granularity(Duration::seconds(5));
        let mut m = InactivityMonitor::new(config, t0());

        let moved = (1..1000)
            .filter(|ms| m.record_activity(t0() + Duration::milliseconds(*ms)))
            .count();
        assert_eq!(moved, 0);
        assert!(m.record_activity(t0() + Duration::seconds(5)));
        assert!(!m.record_activity(t0() + Duration::seconds(6)));
        assert_eq!(m.last_activity(), t0() + Duration::seconds(5));
    }

    #[test]
    fn warning_precedes_expiry_and_activity_clears_it() {
        let config = InactivityConfig::new(Duration::seconds(600)).with_warning(Duration::seconds(60));
        let mut m = InactivityMonitor::new(config, t0());

        assert_eq!(m.poll(t0() + Duration::seconds(539), true), IdleAction::None);
        assert_eq!(m.poll(t0() + Duration::seconds(540), true), IdleAction::Warn);
        assert_eq!(m.state(), IdleState::Warned);
        assert_eq!(m.poll(t0() + Duration::seconds(550), true), IdleAction::None);

        assert!(m.record_activity(t0() + Duration::seconds(551)));
        assert_eq!(m.state(), IdleState::Active);
        assert_eq!(m.poll(t0() + Duration::seconds(1090), true), IdleAction::None);
        assert_eq!(m.poll(t0() + Duration::seconds(1151), true), IdleAction::Expire);
    }

    #[test]
    fn activity_after_expiry_is_ignored_until_new_session() {
        let mut m = monitor(60);
        assert_eq!(m.poll(t0() + Duration::seconds(61), true), IdleAction::Expire);
        assert!(!m.record_activity(t0() + Duration::seconds(70)));
        assert_eq!(m.poll(t0() + Duration::seconds(80), false), IdleAction::None);
        assert_eq!(m.state(), IdleState::Expired);

        m.session_established(t0() + Duration::seconds(90));
        assert_eq!(m.state(), IdleState::Active);
        assert_eq!(m.poll(t0() + Duration::seconds(149), true), IdleAction::None);
        assert_eq!(m.poll(t0() + Duration::seconds(150), true), IdleAction::Expire);
    }

    #[test]
    fn warning_longer_than_timeout_is_ignored() {
        let config = InactivityConfig::new(Duration::seconds(60)).with_warning(Duration::seconds(120));
        assert_eq!(config.warn_before, None);
    }
}
