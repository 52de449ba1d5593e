//! The resolution engine: match a calendar day plus a train number or a
//! time window against the loaded timetable, and match a scheduled train
//! against the day's allocation plan.

use std::collections::HashSet;

use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};

use crate::locomotive::{category_from_number, livery_variant, Locomotive};

use super::allocations::DayPlan;
use super::types::{TimetablePeriod, Train};

/// Find the scheduled train with the given number on the given day.
///
/// Periods are scanned in index order; the first period containing the
/// day that yields an applicable entry with a matching number wins.
pub fn train_on_day<'a>(
    periods: &'a [TimetablePeriod],
    day: NaiveDate,
    number: &str,
) -> Option<&'a Train> {
    periods
        .iter()
        .filter(|period| period.contains(day))
        .find_map(|period| {
            period
                .trains
                .iter()
                .filter(|train| train.is_applicable_on(day))
                .find(|train| train.number == number)
        })
}

/// All scheduled trains with a defined time of day inside `[from, to]`.
///
/// The window may cross midnight; each calendar day it touches is
/// consulted with the window clipped to that day. Within a day each train
/// number appears at most once, and results are ordered by day and
/// earliest matching time.
pub fn trains_in_timespan<'a>(
    periods: &'a [TimetablePeriod],
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Vec<&'a Train> {
    if to < from {
        return Vec::new();
    }

    let mut matches: Vec<(NaiveDate, u32, &Train)> = Vec::new();
    let mut seen: HashSet<(NaiveDate, &str)> = HashSet::new();

    let mut day = from.date();
    while day <= to.date() {
        let lo = if day == from.date() {
            from.time().hour() * 60 + from.time().minute()
        } else {
            0
        };
        let hi = if day == to.date() {
            to.time().hour() * 60 + to.time().minute()
        } else {
            24 * 60 - 1
        };

        for period in periods.iter().filter(|p| p.contains(day)) {
            for train in period.trains.iter().filter(|t| t.is_applicable_on(day)) {
                let Some(time) = train
                    .times_of_day()
                    .filter(|t| (lo..=hi).contains(t))
                    .min()
                else {
                    continue;
                };
                if seen.insert((day, train.number.as_str())) {
                    matches.push((day, time, train));
                }
            }
        }

        let Some(next) = day.checked_add_days(Days::new(1)) else {
            break;
        };
        day = next;
    }

    matches.sort_by_key(|(day, time, _)| (*day, *time));
    matches.into_iter().map(|(_, _, train)| train).collect()
}

/// Resolve the physical consist of a scheduled train from the day's
/// allocation plan. Returns an empty consist when no plan exists or no
/// allocated working brackets the scheduled call.
pub fn locomotives_for_train(train: &Train, plan: Option<&DayPlan>) -> Vec<Locomotive> {
    let Some(plan) = plan else {
        return Vec::new();
    };

    // The call at the camera site begins with the arrival and ends with
    // the departure; a transit time stands in for both.
    let min_time = train
        .arrival_time
        .or(train.transit_time)
        .map(|t| t.minutes_since_midnight());
    let max_time = train
        .departure_time
        .or(train.transit_time)
        .map(|t| t.minutes_since_midnight());

    let Some(allocated) = plan.find_train(&train.number, min_time, max_time) else {
        return Vec::new();
    };

    allocated
        .locomotives
        .iter()
        .map(|loco| {
            let category = category_from_number(loco.number);
            Locomotive {
                number: loco.number,
                category,
                category_name: category.map(|c| c.display_name()),
                variant: livery_variant(loco.number),
                position: loco.position,
                is_towed: loco.is_towed(),
            }
        })
        .collect()
}
