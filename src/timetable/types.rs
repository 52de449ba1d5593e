//! In-memory model of the published timetable.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A time of day as printed in the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HourMinute {
    pub hour: u32,
    pub minute: u32,
}

impl HourMinute {
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Parse a timetable time string "HH:MM" (single-digit hours accepted).
pub fn parse_hour_minute(s: &str) -> Option<HourMinute> {
    let (hour, minute) = s.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(HourMinute { hour, minute })
}

/// Classifier and endpoints of a train working, where the timetable
/// publishes them. Classifier "G" marks freight.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInformation {
    pub classifier: String,
    pub origin: String,
    pub destination: String,
}

impl ServiceInformation {
    pub fn is_freight(&self) -> bool {
        self.classifier == "G"
    }
}

/// A scheduled train working at the camera site.
///
/// A through train has an arrival and a departure (or just a transit
/// time); a terminating or originating train has only one of them.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Train {
    pub number: String,
    pub arrival_time: Option<HourMinute>,
    pub departure_time: Option<HourMinute>,
    pub transit_time: Option<HourMinute>,

    /// ISO weekday numbers (1 = Monday .. 7 = Sunday) on which the entry runs
    pub applicable_weekdays: Vec<u8>,
    /// Validity window of this entry inside its timetable period
    pub applicable_start_date: Option<NaiveDate>,
    pub applicable_end_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<ServiceInformation>,
}

impl Train {
    /// Whether this entry runs on the given day (weekday mask plus the
    /// entry's own validity window).
    pub fn is_applicable_on(&self, day: NaiveDate) -> bool {
        let weekday = day.weekday().number_from_monday() as u8;
        if !self.applicable_weekdays.contains(&weekday) {
            return false;
        }
        if let Some(start) = self.applicable_start_date {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.applicable_end_date {
            if day > end {
                return false;
            }
        }
        true
    }

    /// The defined times of day of this entry, in minutes since midnight.
    pub fn times_of_day(&self) -> impl Iterator<Item = u32> + '_ {
        [self.arrival_time, self.departure_time, self.transit_time]
            .into_iter()
            .flatten()
            .map(|t| t.minutes_since_midnight())
    }
}

/// One published timetable period (e.g. a summer or winter timetable)
/// with its validity window and train entries.
#[derive(Debug, Clone)]
pub struct TimetablePeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trains: Vec<Train>,
}

impl TimetablePeriod {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

pub const ALL_WEEKDAYS: [u8; 7] = [1, 2, 3, 4, 5, 6, 7];

#[cfg(test)]
pub(crate) fn test_train(number: &str) -> Train {
    Train {
        number: number.to_string(),
        arrival_time: None,
        departure_time: None,
        transit_time: None,
        applicable_weekdays: ALL_WEEKDAYS.to_vec(),
        applicable_start_date: None,
        applicable_end_date: None,
        information: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hour_minute_valid() {
        assert_eq!(
            parse_hour_minute("08:30"),
            Some(HourMinute { hour: 8, minute: 30 })
        );
        assert_eq!(
            parse_hour_minute("8:30"),
            Some(HourMinute { hour: 8, minute: 30 })
        );
        assert_eq!(
            parse_hour_minute("00:00"),
            Some(HourMinute { hour: 0, minute: 0 })
        );
        assert_eq!(
            parse_hour_minute("23:59"),
            Some(HourMinute { hour: 23, minute: 59 })
        );
    }

    #[test]
    fn parse_hour_minute_invalid() {
        assert_eq!(parse_hour_minute("24:00"), None);
        assert_eq!(parse_hour_minute("12:60"), None);
        assert_eq!(parse_hour_minute("12"), None);
        assert_eq!(parse_hour_minute(""), None);
        assert_eq!(parse_hour_minute("aa:bb"), None);
    }

    #[test]
    fn minutes_since_midnight() {
        assert_eq!(HourMinute { hour: 0, minute: 0 }.minutes_since_midnight(), 0);
        assert_eq!(
            HourMinute { hour: 9, minute: 15 }.minutes_since_midnight(),
            555
        );
        assert_eq!(
            HourMinute { hour: 23, minute: 59 }.minutes_since_midnight(),
            1439
        );
    }

    #[test]
    fn applicability_weekday_mask() {
        let mut train = test_train("940");
        train.applicable_weekdays = vec![1, 2, 3, 4, 5];

        // Monday 2026-02-02 / Saturday 2026-02-07 / Sunday 2026-02-08
        let monday = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();

        assert!(train.is_applicable_on(monday));
        assert!(!train.is_applicable_on(saturday));
        assert!(!train.is_applicable_on(sunday));
    }

    #[test]
    fn applicability_sunday_only() {
        let mut train = test_train("1744");
        train.applicable_weekdays = vec![7];

        let sunday = NaiveDate::from_ymd_opt(2026, 2, 8).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();

        assert!(train.is_applicable_on(sunday));
        assert!(!train.is_applicable_on(monday));
    }

    #[test]
    fn applicability_validity_window() {
        let mut train = test_train("940");
        train.applicable_start_date = NaiveDate::from_ymd_opt(2026, 6, 1);
        train.applicable_end_date = NaiveDate::from_ymd_opt(2026, 8, 31);

        assert!(!train.is_applicable_on(NaiveDate::from_ymd_opt(2026, 5, 31).unwrap()));
        assert!(train.is_applicable_on(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()));
        assert!(train.is_applicable_on(NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()));
        assert!(!train.is_applicable_on(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()));
    }

    #[test]
    fn times_of_day_skips_undefined() {
        let mut train = test_train("940");
        train.arrival_time = Some(HourMinute { hour: 9, minute: 0 });
        train.departure_time = Some(HourMinute { hour: 9, minute: 2 });

        let times: Vec<u32> = train.times_of_day().collect();
        assert_eq!(times, vec![540, 542]);

        let empty = test_train("941");
        assert_eq!(empty.times_of_day().count(), 0);
    }

    #[test]
    fn period_contains_day() {
        let period = TimetablePeriod {
            start_date: NaiveDate::from_ymd_opt(2025, 12, 14).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
            trains: Vec::new(),
        };
        assert!(period.contains(NaiveDate::from_ymd_opt(2025, 12, 14).unwrap()));
        assert!(period.contains(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 12, 13).unwrap()));
    }
}
