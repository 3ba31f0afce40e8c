//! Time utilities: the injectable "today" and date recovery from loose strings.

use std::sync::LazyLock;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// `YYYY(.|-)M(.|-)D`, 1-2 digit month/day, optional spaces after a separator
/// (the ko-KR locale renders dates as `2024. 1. 5.`).
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})\s*[.-]\s*(\d{1,2})\s*[.-]\s*(\d{1,2})").expect("date pattern is valid")
});

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock evaluated in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA name like "Asia/Seoul".
    pub fn from_tz_name(tz: &str) -> Result<Self> {
        let tz: Tz = tz
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
        Ok(Self::new(tz))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(chrono_tz::Asia::Seoul)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Recover a calendar date from the first `YYYY.M.D` / `YYYY-MM-DD` style
/// match in `s`. Returns `None` when nothing matches or the match is not a
/// real calendar date.
pub fn recover_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(s)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
