//! Two-segment connection matching.
//!
//! For every trip on the first segment, pick the first trip on the second
//! segment that leaves strictly after the first trip arrives. Times are
//! compared as same-day clock times; a second-segment departure earlier in
//! the day never counts as a next-day connection.

use crate::domain::{ClockTime, TimetableEntry};

/// A feasible change from a first-segment trip to a second-segment trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub first_departure: ClockTime,
    pub first_arrival: ClockTime,
    pub second_departure: ClockTime,
    pub second_arrival: ClockTime,
    /// Minutes between arriving on the first segment and leaving on the
    /// second. Always at least 1.
    pub wait_minutes: u32,
}

impl Connection {
    fn between(first: &TimetableEntry, second: &TimetableEntry) -> Self {
        Self {
            first_departure: first.departure,
            first_arrival: first.arrival,
            second_departure: second.departure,
            second_arrival: second.arrival,
            wait_minutes: second.departure.minutes_since_midnight()
                - first.arrival.minutes_since_midnight(),
        }
    }
}

/// Pair each first-segment trip with its earliest onward trip.
///
/// Both slices are scanned in the order given; callers supply them sorted
/// by departure. A first-segment trip with no onward trip is left out of
/// the result. When several onward trips share the qualifying departure
/// time, the one appearing first wins.
///
/// # Examples
///
/// ```
/// use schedule_server::connections::find_connections;
/// use schedule_server::domain::{ClockTime, DayType, EntryId, RouteId, TimetableEntry};
///
/// let entry = |id, dep: &str, arr: &str| TimetableEntry {
///     id: EntryId(id),
///     route_id: RouteId(1),
///     day_type: DayType::Workday,
///     departure: ClockTime::parse_hhmm(dep).unwrap(),
///     arrival: ClockTime::parse_hhmm(arr).unwrap(),
///     direct: false,
/// };
///
/// let first = [entry(1, "08:30", "09:15")];
/// let second = [entry(2, "09:30", "10:45"), entry(3, "09:00", "10:00")];
///
/// let found = find_connections(&first, &second);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].second_departure.to_string(), "09:30");
/// assert_eq!(found[0].wait_minutes, 15);
/// ```
pub fn find_connections(first: &[TimetableEntry], second: &[TimetableEntry]) -> Vec<Connection> {
    first
        .iter()
        .filter_map(|a| {
            let b = second.iter().find(|b| b.departure > a.arrival)?;
            Some(Connection::between(a, b))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayType, EntryId, RouteId};

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    fn entry(id: u64, route: u64, dep: &str, arr: &str) -> TimetableEntry {
        TimetableEntry {
            id: EntryId(id),
            route_id: RouteId(route),
            day_type: DayType::Workday,
            departure: time(dep),
            arrival: time(arr),
            direct: false,
        }
    }

    #[test]
    fn skips_onward_trips_that_leave_too_early() {
        let first = vec![entry(1, 1, "08:30", "09:15")];
        let second = vec![entry(2, 2, "09:30", "10:45"), entry(3, 2, "09:00", "10:00")];

        let found = find_connections(&first, &second);

        assert_eq!(
            found,
            vec![Connection {
                first_departure: time("08:30"),
                first_arrival: time("09:15"),
                second_departure: time("09:30"),
                second_arrival: time("10:45"),
                wait_minutes: 15,
            }]
        );
    }

    #[test]
    fn no_onward_trip_gives_nothing() {
        let first = vec![entry(1, 1, "08:30", "09:15")];
        let second = vec![entry(2, 2, "08:00", "08:50")];

        assert!(find_connections(&first, &second).is_empty());
    }

    #[test]
    fn empty_inputs() {
        let second = vec![entry(2, 2, "08:00", "08:50")];
        assert!(find_connections(&[], &second).is_empty());

        let first = vec![entry(1, 1, "08:30", "09:15")];
        assert!(find_connections(&first, &[]).is_empty());
    }

    #[test]
    fn departure_equal_to_arrival_is_not_a_connection() {
        let first = vec![
            entry(1, 1, "07:00", "07:45"),
            entry(2, 1, "08:00", "08:45"),
        ];
        let second = vec![entry(3, 2, "08:00", "09:00")];

        let found = find_connections(&first, &second);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_departure, time("07:00"));
        assert_eq!(found[0].wait_minutes, 15);
    }

    #[test]
    fn strictly_later_by_one_minute() {
        let first = vec![entry(1, 1, "08:00", "08:45")];
        let second = vec![entry(2, 2, "08:45", "09:30"), entry(3, 2, "08:46", "09:31")];

        let found = find_connections(&first, &second);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].second_departure, time("08:46"));
        assert_eq!(found[0].wait_minutes, 1);
    }

    #[test]
    fn tie_goes_to_first_in_input_order() {
        let first = vec![entry(1, 1, "08:00", "08:30")];
        let second = vec![entry(2, 2, "09:00", "09:40"), entry(3, 2, "09:00", "09:55")];

        let found = find_connections(&first, &second);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].second_arrival, time("09:40"));
    }

    #[test]
    fn output_follows_first_segment_order() {
        // Not sorted, and the matcher does not sort it either
        let first = vec![
            entry(1, 1, "10:00", "10:30"),
            entry(2, 1, "06:00", "06:30"),
        ];
        let second = vec![entry(3, 2, "07:00", "07:30"), entry(4, 2, "11:00", "11:30")];

        let found = find_connections(&first, &second);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].first_departure, time("10:00"));
        assert_eq!(found[0].second_departure, time("11:00"));
        assert_eq!(found[1].first_departure, time("06:00"));
        assert_eq!(found[1].second_departure, time("07:00"));
    }

    #[test]
    fn late_evening_arrival_has_no_next_day_connection() {
        let first = vec![entry(1, 1, "23:10", "23:50")];
        let second = vec![entry(2, 2, "00:15", "01:00")];

        assert!(find_connections(&first, &second).is_empty());
    }

    #[test]
    fn several_first_trips_can_share_an_onward_trip() {
        let first = vec![
            entry(1, 1, "07:00", "07:40"),
            entry(2, 1, "07:10", "07:50"),
        ];
        let second = vec![entry(3, 2, "08:00", "08:40")];

        let found = find_connections(&first, &second);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].wait_minutes, 20);
        assert_eq!(found[1].wait_minutes, 10);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{DayType, EntryId, RouteId};
    use proptest::prelude::*;

    prop_compose! {
        fn clock_time()(minutes in 0u32..1440) -> ClockTime {
            ClockTime::from_hm(minutes / 60, minutes % 60).unwrap()
        }
    }

    prop_compose! {
        fn timetable_entry(route: u64)(
            id in 1u64..10_000,
            departure in clock_time(),
            arrival in clock_time(),
            direct in any::<bool>(),
        ) -> TimetableEntry {
            TimetableEntry {
                id: EntryId(id),
                route_id: RouteId(route),
                day_type: DayType::Workday,
                departure,
                arrival,
                direct,
            }
        }
    }

    fn segment(route: u64) -> impl Strategy<Value = Vec<TimetableEntry>> {
        prop::collection::vec(timetable_entry(route), 0..20)
    }

    fn sorted_segment(route: u64) -> impl Strategy<Value = Vec<TimetableEntry>> {
        segment(route).prop_map(|mut entries| {
            entries.sort_by_key(|e| e.departure);
            entries
        })
    }

    proptest! {
        /// Every onward departure is strictly after the arrival it follows
        #[test]
        fn onward_departure_strictly_later(first in segment(1), second in segment(2)) {
            for c in find_connections(&first, &second) {
                prop_assert!(c.second_departure > c.first_arrival);
                prop_assert!(c.wait_minutes >= 1);
                prop_assert_eq!(
                    i64::from(c.wait_minutes),
                    c.first_arrival.minutes_until(c.second_departure)
                );
            }
        }

        /// With a departure-ordered second segment, no qualifying trip leaves earlier
        #[test]
        fn earliest_onward_trip_chosen(first in segment(1), second in sorted_segment(2)) {
            for c in find_connections(&first, &second) {
                let earlier = second
                    .iter()
                    .any(|b| b.departure > c.first_arrival && b.departure < c.second_departure);
                prop_assert!(!earlier);
            }
        }

        /// Each first-segment trip appears once, or has no qualifying onward trip
        #[test]
        fn every_trip_matched_or_unmatchable(first in segment(1), second in segment(2)) {
            let found = find_connections(&first, &second);
            let mut found_iter = found.iter().peekable();

            for a in &first {
                let has_onward = second.iter().any(|b| b.departure > a.arrival);
                if has_onward {
                    let c = found_iter.next();
                    prop_assert!(c.is_some());
                    let c = c.unwrap();
                    prop_assert_eq!(c.first_departure, a.departure);
                    prop_assert_eq!(c.first_arrival, a.arrival);
                }
            }
            prop_assert!(found_iter.peek().is_none());
        }

        /// Output is a subsequence of the first segment, in its order
        #[test]
        fn output_order_preserved(first in segment(1), second in segment(2)) {
            let found = find_connections(&first, &second);
            let mut remaining = first.iter();

            for c in &found {
                let matched = remaining
                    .by_ref()
                    .any(|a| a.departure == c.first_departure && a.arrival == c.first_arrival);
                prop_assert!(matched);
            }
        }

        /// Same inputs give the same output and inputs are left untouched
        #[test]
        fn pure(first in segment(1), second in segment(2)) {
            let first_before = first.clone();
            let second_before = second.clone();

            let once = find_connections(&first, &second);
            let twice = find_connections(&first, &second);

            prop_assert_eq!(once, twice);
            prop_assert_eq!(first, first_before);
            prop_assert_eq!(second, second_before);
        }
    }
}
