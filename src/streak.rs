// Daily check-in streak tracking

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive calendar days with at least one check-in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub count: u32,
    pub last_checkin_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a check-in on `today`.
    ///
    /// Same day is a no-op, the next day extends the streak, anything else
    /// (first check-in, a gap, or a clock that moved backwards) restarts at 1.
    pub fn advance(self, today: NaiveDate) -> StreakState {
        match self.last_checkin_date {
            Some(last) if last == today => self,
            Some(last) if last.succ_opt() == Some(today) => StreakState {
                count: self.count.saturating_add(1),
                last_checkin_date: Some(today),
            },
            _ => StreakState {
                count: 1,
                last_checkin_date: Some(today),
            },
        }
    }
}
