//! Look-back period for price history (`5d`, `1mo`, `6mo`, `1y`, `ytd`, `max`, ...).
//!
//! Day periods count calendar days back from the last date, not trading sessions.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Days(u32),
    Months(u32),
    YearToDate,
    Max,
}

pub const DEFAULT_PERIOD: Period = Period::Months(12);

impl Period {
    /// First date kept for a history ending at `end`; `None` means unbounded.
    pub fn start_date(&self, end: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Days(n) => end.checked_sub_days(Days::new(u64::from(*n))),
            Period::Months(n) => end.checked_sub_months(Months::new(*n)),
            Period::YearToDate => NaiveDate::from_ymd_opt(end.year(), 1, 1),
            Period::Max => None,
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "max" => return Ok(Period::Max),
            "ytd" => return Ok(Period::YearToDate),
            _ => {}
        }

        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);
        let n: u32 = digits
            .parse()
            .map_err(|_| format!("invalid period '{}'", s))?;
        if n == 0 {
            return Err(format!("invalid period '{}': length must be positive", s));
        }
        match unit {
            "d" => Ok(Period::Days(n)),
            "mo" => Ok(Period::Months(n)),
            "y" => n
                .checked_mul(12)
                .map(Period::Months)
                .ok_or_else(|| format!("invalid period '{}': too long", s)),
            _ => Err(format!(
                "invalid period '{}' (expected e.g. 5d, 1mo, 6mo, 1y, 5y, ytd, max)",
                s
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Days(n) => write!(f, "{}d", n),
            Period::Months(n) if n % 12 == 0 => write!(f, "{}y", n / 12),
            Period::Months(n) => write!(f, "{}mo", n),
            Period::YearToDate => write!(f, "ytd"),
            Period::Max => write!(f, "max"),
        }
    }
}
