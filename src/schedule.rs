// src/schedule.rs
use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("trigger hour {0} is out of range (expected 0-23)")]
    HourOutOfRange(u32),
    #[error("at least one trigger hour is required")]
    Empty,
}

/// Ordered set of daily UTC trigger hours.
/// Normalized on construction: sorted ascending, duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerHours(Vec<NaiveTime>);

impl TriggerHours {
    pub fn new(hours: &[u32]) -> Result<Self, ScheduleError> {
        if hours.is_empty() {
            return Err(ScheduleError::Empty);
        }
        let mut times = Vec::with_capacity(hours.len());
        for &hour in hours {
            let time =
                NaiveTime::from_hms_opt(hour, 0, 0).ok_or(ScheduleError::HourOutOfRange(hour))?;
            times.push(time);
        }
        times.sort();
        times.dedup();
        Ok(TriggerHours(times))
    }
}

/// Earliest trigger instant at or after `now`: today's remaining hours first,
/// else the first hour of the following day. Pure function of its inputs;
/// minute, second and subsecond of the result are always zero.
pub fn next_trigger(now: DateTime<Utc>, hours: &TriggerHours) -> DateTime<Utc> {
    let today = now.date_naive();
    for &time in &hours.0 {
        let candidate = Utc.from_utc_datetime(&today.and_time(time));
        if candidate >= now {
            return candidate;
        }
    }
    Utc.from_utc_datetime(&(today + Days::new(1)).and_time(hours.0[0]))
}
