// Period filter.
//
// Purpose
// - Turn a period selection into a time window relative to a reference instant.
//
// Responsibilities
// - Today, this week (Sunday start), this month, all time, or a custom inclusive date range.
// - Bounded windows end at the reference instant; entries dated in the future are excluded.
// - Undated entries only match the unbounded window.
// - Produce the day keys the time-series buckets are keyed by.

use crate::core::entity::model::TimeEntry;
use crate::core::entity::timestamp::Timestamp;
use crate::core::quality::DataQualityWarning;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Today,
    #[default]
    Week,
    Month,
    All,
    /// Whole calendar days, both ends included.
    Custom { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodParseError {
    #[error("unknown period {0:?}, expected one of today, week, month, all")]
    Unknown(String),
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" => Ok(Period::All),
            _ => Err(PeriodParseError::Unknown(raw.to_string())),
        }
    }
}

/// Inclusive bounds. `None` on a side means unbounded on that side.
#[derive(Debug, Clone, PartialEq)]
pub struct Window<Tz: TimeZone> {
    pub start: Option<DateTime<Tz>>,
    pub end: Option<DateTime<Tz>>,
    tz: Tz,
}

impl<Tz: TimeZone> Window<Tz> {
    pub fn unbounded(tz: Tz) -> Self {
        Self {
            start: None,
            end: None,
            tz,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, timestamp: Option<&Timestamp>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(timestamp) = timestamp else {
            return false;
        };
        let instant = timestamp.in_zone(&self.tz);
        let after_start = self.start.as_ref().is_none_or(|start| instant >= *start);
        let before_end = self.end.as_ref().is_none_or(|end| instant <= *end);
        after_start && before_end
    }

    /// Entries inside the window. Undated entries excluded by a bounded window are counted
    /// and reported once.
    pub fn filter_entries<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a TimeEntry>,
    ) -> Vec<&'a TimeEntry> {
        let mut undated = 0usize;
        let kept: Vec<&TimeEntry> = entries
            .into_iter()
            .filter(|entry| {
                if entry.date.is_none() && !self.is_unbounded() {
                    undated += 1;
                    return false;
                }
                self.contains(entry.date.as_ref())
            })
            .collect();
        if undated > 0 {
            DataQualityWarning::MissingDates { count: undated }.report();
        }
        kept
    }
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Clamped to the earliest representable date.
fn first_day_of_week(date: NaiveDate) -> NaiveDate {
    let since_sunday = Days::new(u64::from(date.weekday().num_days_from_sunday()));
    date.checked_sub_days(since_sunday).unwrap_or(NaiveDate::MIN)
}

pub fn resolve_window<Tz: TimeZone>(period: Period, reference: &DateTime<Tz>) -> Window<Tz> {
    let tz = reference.timezone();
    let today = reference.date_naive();
    let bounded = |start: NaiveDate| Window {
        start: Some(start_of_day(start, &tz)),
        end: Some(reference.clone()),
        tz: tz.clone(),
    };
    match period {
        Period::Today => bounded(today),
        Period::Week => bounded(first_day_of_week(today)),
        Period::Month => bounded(today.with_day(1).unwrap_or(today)),
        Period::All => Window::unbounded(tz.clone()),
        Period::Custom { start, end } => {
            let end_of_range = end
                .succ_opt()
                .and_then(|next| {
                    start_of_day(next, &tz).checked_sub_signed(TimeDelta::milliseconds(1))
                });
            Window {
                start: Some(start_of_day(start, &tz)),
                end: end_of_range,
                tz: tz.clone(),
            }
        }
    }
}

/// Sunday through Saturday of the week containing `reference`.
pub fn week_days<Tz: TimeZone>(reference: &DateTime<Tz>) -> Vec<NaiveDate> {
    let sunday = first_day_of_week(reference.date_naive());
    sunday.iter_days().take(7).collect()
}

/// The last `days` calendar days ending today, oldest first. Stops at the earliest
/// representable date.
pub fn trailing_days<Tz: TimeZone>(reference: &DateTime<Tz>, days: usize) -> Vec<NaiveDate> {
    let today = reference.date_naive();
    let available = u64::try_from(today.signed_duration_since(NaiveDate::MIN).num_days())
        .map_or(0, |since_min| since_min.saturating_add(1));
    let count = u64::try_from(days).unwrap_or(u64::MAX).min(available);
    (0..count)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

#[cfg(test)]
mod period_tests {
    use super::*;
    use crate::core::entity::id::EntityId;
    use chrono::{FixedOffset, Utc, Weekday};
    use rstest::{fixture, rstest};

    // Wednesday
    #[fixture]
    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 30, 0).unwrap()
    }

    fn entry(date: Option<&str>) -> TimeEntry {
        TimeEntry {
            id: EntityId::Numeric(1),
            task_id: None,
            user_id: None,
            duration: 1.0,
            date: date.and_then(Timestamp::parse),
            description: String::new(),
        }
    }

    #[rstest]
    #[case(Period::Today, "2024-03-12T23:59:59Z", false)]
    #[case(Period::Today, "2024-03-13T00:00:00Z", true)]
    #[case(Period::Today, "2024-03-13T15:30:00Z", true)]
    #[case(Period::Today, "2024-03-14T09:00:00Z", false)]
    #[case(Period::Week, "2024-03-10", true)]
    #[case(Period::Week, "2024-03-09T23:00:00Z", false)]
    #[case(Period::Month, "2024-03-01", true)]
    #[case(Period::Month, "2024-02-29T12:00:00Z", false)]
    #[case(Period::All, "1999-01-01", true)]
    #[case(Period::All, "2030-01-01", true)]
    fn it_should_resolve_windows_relative_to_the_reference(
        reference: DateTime<Utc>,
        #[case] period: Period,
        #[case] date: &str,
        #[case] expected: bool,
    ) {
        let window = resolve_window(period, &reference);
        assert_eq!(window.contains(Timestamp::parse(date).as_ref()), expected);
    }

    #[rstest]
    fn it_should_start_the_week_on_sunday(reference: DateTime<Utc>) {
        let window = resolve_window(Period::Week, &reference);
        let start = window.start.unwrap();
        assert_eq!(start.weekday(), Weekday::Sun);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[rstest]
    fn it_should_include_both_ends_of_a_custom_range(reference: DateTime<Utc>) {
        let window = resolve_window(
            Period::Custom {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            },
            &reference,
        );
        assert!(window.contains(Timestamp::parse("2024-01-01").as_ref()));
        assert!(window.contains(Timestamp::parse("2024-01-31T23:59:59Z").as_ref()));
        assert!(!window.contains(Timestamp::parse("2024-02-01").as_ref()));
    }

    #[rstest]
    fn it_should_resolve_day_boundaries_in_the_reference_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let reference = tz.with_ymd_and_hms(2024, 3, 13, 8, 0, 0).unwrap();
        let window = resolve_window(Period::Today, &reference);
        assert!(!window.contains(Timestamp::parse("2024-03-13T04:00:00Z").as_ref()));
        assert!(window.contains(Timestamp::parse("2024-03-13T06:00:00Z").as_ref()));
        assert!(window.contains(Timestamp::parse("2024-03-13T07:00:00").as_ref()));
    }

    #[rstest]
    fn it_should_exclude_undated_entries_from_bounded_windows(reference: DateTime<Utc>) {
        let entries = [entry(Some("2024-03-13")), entry(None)];
        assert_eq!(resolve_window(Period::Week, &reference).filter_entries(&entries).len(), 1);
        assert_eq!(resolve_window(Period::All, &reference).filter_entries(&entries).len(), 2);
    }

    #[rstest]
    fn it_should_list_the_days_of_the_week(reference: DateTime<Utc>) {
        let days = week_days(&reference);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[rstest]
    fn it_should_list_trailing_days_oldest_first(reference: DateTime<Utc>) {
        let days = trailing_days(&reference, 7);
        assert_eq!(days.first(), NaiveDate::from_ymd_opt(2024, 3, 7).as_ref());
        assert_eq!(days.last(), NaiveDate::from_ymd_opt(2024, 3, 13).as_ref());
        assert!(trailing_days(&reference, 0).is_empty());
    }

    #[rstest]
    fn it_should_stop_day_lists_at_the_earliest_date() {
        let floor = NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap().and_utc();
        let third = NaiveDate::MIN.checked_add_days(Days::new(2)).unwrap();
        let reference = third.and_hms_opt(12, 0, 0).unwrap().and_utc();

        assert_eq!(
            trailing_days(&reference, 5),
            vec![NaiveDate::MIN, NaiveDate::MIN.succ_opt().unwrap(), third]
        );
        assert_eq!(trailing_days(&floor, usize::MAX), vec![NaiveDate::MIN]);
        assert_eq!(week_days(&floor)[0], NaiveDate::MIN);
        assert!(resolve_window(Period::Week, &floor).start.is_some());
    }

    #[rstest]
    #[case("today", Period::Today)]
    #[case(" Week ", Period::Week)]
    #[case("MONTH", Period::Month)]
    #[case("all", Period::All)]
    fn it_should_parse_periods(#[case] raw: &str, #[case] expected: Period) {
        assert_eq!(raw.parse::<Period>(), Ok(expected));
    }

    #[rstest]
    fn it_should_reject_unknown_periods() {
        assert_eq!(
            "fortnight".parse::<Period>(),
            Err(PeriodParseError::Unknown("fortnight".into()))
        );
    }
}
