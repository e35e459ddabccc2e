use std::fmt::Display;

use chrono::{DateTime, Days, Local, Months, TimeZone, Utc};
use clap::ValueEnum;

/// Time window used to filter entries for charts. Windows are relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Period {
    Week,
    Month,
    Year,
    #[default]
    #[value(name = "all")]
    AllTime,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
            Period::Year => write!(f, "year"),
            Period::AllTime => write!(f, "all"),
        }
    }
}

impl Period {
    /// Earliest included moment on the local calendar, `None` when the window is unbounded.
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.start_in(now, &Local)
    }

    /// Earliest included moment, counting days and months on the calendar of `tz`.
    ///
    /// A bound that does not exist in `tz` (a skipped or repeated hour) is computed on the UTC
    /// calendar instead.
    pub fn start_in<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Option<DateTime<Utc>> {
        let local = now.with_timezone(tz);
        match self {
            Period::Week => local
                .checked_sub_days(Days::new(7))
                .map(|v| v.with_timezone(&Utc))
                .or_else(|| now.checked_sub_days(Days::new(7))),
            Period::Month => local
                .checked_sub_months(Months::new(1))
                .map(|v| v.with_timezone(&Utc))
                .or_else(|| now.checked_sub_months(Months::new(1))),
            Period::Year => local
                .checked_sub_months(Months::new(12))
                .map(|v| v.with_timezone(&Utc))
                .or_else(|| now.checked_sub_months(Months::new(12))),
            Period::AllTime => None,
        }
    }

    pub fn contains(&self, moment: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.contains_in(moment, now, &Local)
    }

    pub fn contains_in<Tz: TimeZone>(
        &self,
        moment: DateTime<Utc>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> bool {
        self.start_in(now, tz).map_or(true, |start| moment >= start)
    }
}
