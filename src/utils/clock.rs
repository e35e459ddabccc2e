use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing dates across application. Swapped out in tests
/// so that time windows can be checked against a fixed "now".
pub trait Clock {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock stuck at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }
}
