//! Time utilities: study period length and timezone-aware plan dates.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole study days between two instants, rounded up and never below 1.
pub fn calculate_study_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let diff_ms = (end - start).num_milliseconds() as f64;
    let days = (diff_ms / MILLIS_PER_DAY).ceil() as i64;
    days.max(1)
}

/// Total hours available; negative or zero daily hours pass straight through.
pub fn calculate_total_study_time(study_days: i64, daily_study_hours: f64) -> f64 {
    study_days as f64 * daily_study_hours
}

/// Parse a plan date given as RFC3339, "2026-03-01 09:00" or "2026-03-01"
/// (local midnight) in an IANA tz like "Asia/Seoul", returning UTC.
pub fn parse_study_date(input: &str, tz: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let ndt = match NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        Ok(ndt) => ndt,
        Err(_) => NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("invalid date '{input}': {e}"))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid date '{input}'"))?,
    };

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {input} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}
