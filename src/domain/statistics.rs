//! Aggregated activity counters for dashboards.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{LoanStatus, MeetStatus, TypeConstraintError};

/// Reporting window for statistics, anchored at the current time.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Timespan {
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    #[default]
    AllTime,
}

impl Timespan {
    pub const fn as_str(self) -> &'static str {
        match self {
            Timespan::Today => "today",
            Timespan::ThisWeek => "this_week",
            Timespan::ThisMonth => "this_month",
            Timespan::ThisYear => "this_year",
            Timespan::AllTime => "all_time",
        }
    }

    /// Inclusive lower bound of the window; `None` for all time.
    /// Weeks start on Monday.
    pub fn since(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = now.date();
        let start = match self {
            Timespan::Today => Some(today),
            Timespan::ThisWeek => {
                Some(today - Duration::days(i64::from(today.weekday().num_days_from_monday())))
            }
            Timespan::ThisMonth => today.with_day(1),
            Timespan::ThisYear => today.with_ordinal(1),
            Timespan::AllTime => None,
        };
        start.map(|date| date.and_time(NaiveTime::MIN))
    }
}

impl Display for Timespan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Timespan::Today),
            "this_week" => Ok(Timespan::ThisWeek),
            "this_month" => Ok(Timespan::ThisMonth),
            "this_year" => Ok(Timespan::ThisYear),
            "all_time" => Ok(Timespan::AllTime),
            _ => Err(TypeConstraintError::UnknownVariant {
                kind: "timespan",
                allowed: "today, this_week, this_month, this_year, all_time".to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadStatusCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl LeadStatusCounts {
    pub fn set(&mut self, status: LoanStatus, count: usize) {
        match status {
            LoanStatus::Hot => self.hot = count,
            LoanStatus::Warm => self.warm = count,
            LoanStatus::Cold => self.cold = count,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetStatusCounts {
    pub met: usize,
    pub notmet: usize,
    pub meetagain: usize,
}

impl MeetStatusCounts {
    pub fn set(&mut self, status: MeetStatus, count: usize) {
        match status {
            MeetStatus::Met => self.met = count,
            MeetStatus::NotMet => self.notmet = count,
            MeetStatus::MeetAgain => self.meetagain = count,
        }
    }

    pub const fn total(&self) -> usize {
        self.met + self.notmet + self.meetagain
    }
}

/// Activity summary for one user over a [`Timespan`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStatistics {
    pub timespan: Timespan,
    pub total_calls: usize,
    pub leads: LeadStatusCounts,
    pub meets: MeetStatusCounts,
}
