use anyhow::{bail, Result};
use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// How many years (current one included) the period picker offers.
pub const SELECTABLE_YEARS: usize = 5;

/// Either a full calendar year or one month of it. `month` is 0-indexed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "RawPeriod")]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPeriod {
    year: i32,
    month: Option<u32>,
}

impl TryFrom<RawPeriod> for Period {
    type Error = anyhow::Error;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        match raw.month {
            Some(month) => Period::month(raw.year, month),
            None => Ok(Period::year(raw.year)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> Result<Self> {
        if month > 11 {
            bail!("month index {month} is out of range 0..=11");
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    /// Formatter thresholds switch to the monthly scale when set.
    pub fn is_month(&self) -> bool {
        self.month.is_some()
    }

    pub fn is_current(&self, now: NaiveDateTime) -> bool {
        match self.month {
            None => self.year == now.year(),
            Some(month) => self.year == now.year() && month == now.month0(),
        }
    }

    /// Upper-case label used in slide headers, e.g. `2024` or `MARCH 2024`.
    pub fn label(&self) -> String {
        let month = self
            .month
            .and_then(|m| u8::try_from(m).ok())
            .and_then(|m| m.checked_add(1))
            .and_then(|m| Month::try_from(m).ok());
        match month {
            Some(month) => format!("{} {}", month.name().to_uppercase(), self.year),
            None => self.year.to_string(),
        }
    }

    /// The inclusive local-time window the health store should be queried for.
    ///
    /// Periods inside the current year are capped at `now`; a month that has
    /// not started yet yields a window ending before it begins.
    pub fn query_window(&self, now: NaiveDateTime) -> Result<QueryWindow> {
        if let Some(month) = self.month.filter(|m| *m > 11) {
            bail!("month index {month} is out of range 0..=11");
        }
        let day_end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        let (start_date, end_date) = match self.month {
            None => (
                ymd(self.year, 1, 1)?,
                ymd(self.year, 12, 31)?,
            ),
            Some(month) => {
                let first = ymd(self.year, month + 1, 1)?;
                let next_first = if month == 11 {
                    ymd(self.year + 1, 1, 1)?
                } else {
                    ymd(self.year, month + 2, 1)?
                };
                let last = next_first
                    .pred_opt()
                    .ok_or_else(|| anyhow::anyhow!("no day precedes {next_first}"))?;
                (first, last)
            }
        };

        let start = start_date.and_time(NaiveTime::MIN);
        let mut end = end_date.and_time(day_end);

        if self.year == now.year() {
            match self.month {
                None => end = now,
                Some(_) => {
                    let in_month = now >= start && now <= end;
                    let before_month = now < start;
                    if in_month || before_month {
                        end = now;
                    }
                }
            }
        }

        Ok(QueryWindow { start, end })
    }
}

/// The current year followed by the preceding ones, newest first.
pub fn selectable_years(current_year: i32) -> Vec<i32> {
    (0..SELECTABLE_YEARS as i32)
        .map(|offset| current_year - offset)
        .collect()
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid date {year}-{month}-{day}"))
}
