//! Reporting periods.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{TypesError, TypesResult};

/// An inclusive calendar window `[start, end]` over which metrics are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct ReportingPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawPeriod> for ReportingPeriod {
    type Error = TypesError;

    fn try_from(raw: RawPeriod) -> TypesResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl ReportingPeriod {
    /// Create a period, rejecting windows whose end precedes their start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> TypesResult<Self> {
        if start > end {
            return Err(TypesError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    /// The window of equal length ending the day before this one starts.
    ///
    /// Returns `None` only when the preceding window would fall before the
    /// earliest representable date.
    pub fn preceding(&self) -> Option<Self> {
        let end = self.start.checked_sub_days(Days::new(1))?;
        let start = end.checked_sub_days(Days::new(self.days() - 1))?;
        Some(Self { start, end })
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
