//! Time-window filtering of sensor readings.
//!
//! The selector value comes straight from a picker, so it is kept as an open
//! enum: any key that is not one of the four known windows is carried in
//! `TimeRange::Other` and filters nothing out.

use std::{convert::Infallible, fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};

use crate::models::SensorReading;

// ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[default]
    LastHour,
    Last24Hours,
    LastWeek,
    Last30Days,
    Other(String),
}

impl TimeRange {
    /// The four selectable windows, in picker order.
    pub const ALL: [TimeRange; 4] = [
        TimeRange::LastHour,
        TimeRange::Last24Hours,
        TimeRange::LastWeek,
        TimeRange::Last30Days,
    ];

    pub fn key(&self) -> &str {
        // ---
        match self {
            Self::LastHour => "lastHour",
            Self::Last24Hours => "last24Hours",
            Self::LastWeek => "lastWeek",
            Self::Last30Days => "last30Days",
            Self::Other(key) => key,
        }
    }

    /// Picker label.
    pub fn label(&self) -> &str {
        // ---
        match self {
            Self::LastHour => "Última Hora",
            Self::Last24Hours => "Últimas 24 Horas",
            Self::LastWeek => "Última Semana",
            Self::Last30Days => "Últimos 30 Dias",
            Self::Other(key) => key,
        }
    }

    /// Lookback window, `None` for unrecognized keys.
    pub fn duration(&self) -> Option<Duration> {
        // ---
        match self {
            Self::LastHour => Some(Duration::hours(1)),
            Self::Last24Hours => Some(Duration::hours(24)),
            Self::LastWeek => Some(Duration::days(7)),
            Self::Last30Days => Some(Duration::days(30)),
            Self::Other(_) => None,
        }
    }

    /// Oldest instant still inside the window ending at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.duration().map(|window| now - window)
    }
}

impl FromStr for TimeRange {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        Ok(match s {
            "lastHour" => Self::LastHour,
            "last24Hours" => Self::Last24Hours,
            "lastWeek" => Self::LastWeek,
            "last30Days" => Self::Last30Days,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Keep readings stamped at or after `now - range`, in input order.
///
/// Future-dated readings pass. Unrecognized ranges keep everything.
pub fn filter_by_range(
    readings: &[SensorReading],
    range: &TimeRange,
    now: DateTime<Utc>,
) -> Vec<SensorReading> {
    // ---
    match range.cutoff(now) {
        Some(cutoff) => readings
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .cloned()
            .collect(),
        None => readings.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 26, 12, 0, 0).unwrap()
    }

    fn reading_at(offset: Duration, temperatura: f64) -> SensorReading {
        SensorReading::new(now() + offset, temperatura, 50.0)
    }

    #[test]
    fn test_last_hour_drops_older_readings() {
        // ---
        let readings = vec![
            reading_at(Duration::minutes(-30), 20.0),
            reading_at(Duration::hours(-2), 22.0),
        ];

        let filtered = filter_by_range(&readings, &TimeRange::LastHour, now());

        assert_eq!(filtered, vec![readings[0].clone()]);
    }

    #[test]
    fn test_cutoff_is_inclusive_for_every_range() {
        // ---
        for range in TimeRange::ALL {
            let window = range.duration().unwrap();
            let readings = vec![
                reading_at(-window, 1.0),
                reading_at(-window - Duration::milliseconds(1), 2.0),
            ];

            let filtered = filter_by_range(&readings, &range, now());

            assert_eq!(filtered.len(), 1, "range {range}");
            assert_eq!(filtered[0].temperatura, 1.0, "range {range}");
        }
    }

    #[test]
    fn test_durations() {
        // ---
        assert_eq!(TimeRange::LastHour.duration(), Some(Duration::hours(1)));
        assert_eq!(TimeRange::Last24Hours.duration(), Some(Duration::hours(24)));
        assert_eq!(TimeRange::LastWeek.duration(), Some(Duration::days(7)));
        assert_eq!(TimeRange::Last30Days.duration(), Some(Duration::days(30)));
    }

    #[test]
    fn test_future_readings_pass() {
        // ---
        let readings = vec![reading_at(Duration::days(3), 30.0)];
        assert_eq!(filter_by_range(&readings, &TimeRange::LastHour, now()), readings);
    }

    #[test]
    fn test_unrecognized_range_keeps_everything() {
        // ---
        let readings = vec![
            reading_at(Duration::days(-400), 1.0),
            reading_at(Duration::zero(), 2.0),
            reading_at(Duration::days(-45), 3.0),
        ];
        let range: TimeRange = "lastDecade".parse().unwrap();

        assert_eq!(range, TimeRange::Other("lastDecade".to_string()));
        assert_eq!(filter_by_range(&readings, &range, now()), readings);
    }

    #[test]
    fn test_preserves_unsorted_input_order() {
        // ---
        let readings = vec![
            reading_at(Duration::hours(-5), 1.0),
            reading_at(Duration::days(-10), 2.0),
            reading_at(Duration::hours(-1), 3.0),
            reading_at(Duration::hours(-20), 4.0),
        ];

        let filtered = filter_by_range(&readings, &TimeRange::Last24Hours, now());
        let temps: Vec<f64> = filtered.iter().map(|r| r.temperatura).collect();

        assert_eq!(temps, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_subset_and_idempotent_for_fixed_now() {
        // ---
        let readings: Vec<SensorReading> = (0..48)
            .map(|h| reading_at(Duration::hours(-h) + Duration::minutes(7 * h), h as f64))
            .collect();

        for range in TimeRange::ALL {
            let once = filter_by_range(&readings, &range, now());
            let twice = filter_by_range(&once, &range, now());

            assert!(once.iter().all(|r| readings.contains(r)));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_keys_round_trip() {
        // ---
        for range in TimeRange::ALL {
            assert_eq!(range.key().parse::<TimeRange>().unwrap(), range);
        }
        assert_eq!(TimeRange::default(), TimeRange::LastHour);
    }
}
