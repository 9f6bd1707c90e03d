use crate::error::QueryError;
use crate::event::Event;
use crate::sort::{by_start_then_longest, filter_and_sort};
use crate::time::TimeRange;
use core::cmp::Ordering;
use log::trace;

/// Busy `[start, end)` minutes of one attendee tier
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BusyInterval(pub u16, pub u16);

impl BusyInterval {
    pub fn start(self) -> u16 {
        self.0
    }

    pub fn end(self) -> u16 {
        self.1
    }

    pub fn as_range(self) -> TimeRange {
        TimeRange::from_start_end(self.0, self.1, false)
    }
}

impl From<TimeRange> for BusyInterval {
    fn from(range: TimeRange) -> Self {
        BusyInterval(range.start(), range.end())
    }
}

impl Ord for BusyInterval {
    /// Same order as `TimeRange`: start ascending, latest end first
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.cmp(&other.0) {
            Ordering::Equal => other.1.cmp(&self.1),
            order => order,
        }
    }
}

impl PartialOrd for BusyInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Collapses time ranges, ordered by start with the longest first on ties,
/// into busy intervals that neither overlap nor touch.
///
/// Of ranges sharing a start only the longest survives, ranges nested in the
/// current interval are dropped, and empty ranges take no time at all.
///
/// # Errors
/// `QueryError::OutOfOrder` when a range starts before the interval being
/// built, which means the input was never sorted.
///
/// # Examples
/// ```
/// use freizeit_libs::busy::{reduce_sorted, BusyInterval};
/// use freizeit_libs::error::QueryError;
/// use freizeit_libs::time::TimeRange;
///
/// let sorted = vec![
///     TimeRange::from_start_end(0, 60, false),
///     TimeRange::from_start_end(0, 30, false),
///     TimeRange::from_start_end(10, 20, false),
///     TimeRange::from_start_end(100, 120, false),
/// ];
///
/// assert_eq!(
///     reduce_sorted(&sorted),
///     Ok(vec![BusyInterval(0, 60), BusyInterval(100, 120)])
/// );
///
/// let unsorted = vec![
///     TimeRange::from_start_end(100, 120, false),
///     TimeRange::from_start_end(0, 60, false),
/// ];
///
/// assert_eq!(
///     reduce_sorted(&unsorted),
///     Err(QueryError::OutOfOrder { previous: 100, next: 0 })
/// );
/// ```
pub fn reduce_sorted<'a, I>(ranges: I) -> Result<Vec<BusyInterval>, QueryError>
where
    I: IntoIterator<Item = &'a TimeRange>,
{
    let ranges = ranges.into_iter();
    let mut busy: Vec<BusyInterval> = Vec::with_capacity(ranges.size_hint().0);

    for &range in ranges {
        let current = match busy.last_mut() {
            None => {
                if range.duration() > 0 {
                    busy.push(range.into());
                }
                continue;
            }
            Some(current) => current,
        };

        if range.start() < current.start() {
            return Err(QueryError::OutOfOrder {
                previous: current.start(),
                next: range.start(),
            });
        }

        if range.duration() == 0 || range.end() <= current.end() {
            trace!("{} is covered by {}", range, current.as_range());
        } else if range.start() <= current.end() {
            // Longer range with the same start, or one overlapping the tail
            current.1 = range.end();
        } else {
            busy.push(range.into());
        }
    }

    Ok(busy)
}

pub trait BusyTimes {
    fn busy_times(self) -> Result<Vec<BusyInterval>, QueryError>;
}

impl<'a, T> BusyTimes for T
where
    T: Iterator<Item = &'a Event>,
{
    /// Sorts events that take any time by start (longest first on ties) and
    /// reduces them to the busy intervals they occupy.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::busy::{BusyInterval, BusyTimes};
    /// use freizeit_libs::event::Event;
    /// use freizeit_libs::time::TimeRange;
    ///
    /// let events = vec![
    ///     Event::new("1", "lunch", vec!["A"], TimeRange::from_start_end(720, 780, false)),
    ///     Event::new("2", "standup", vec!["A"], TimeRange::from_start_end(540, 555, false)),
    ///     Event::new("3", "1:1", vec!["A"], TimeRange::from_start_end(540, 570, false)),
    /// ];
    ///
    /// assert_eq!(
    ///     events.iter().busy_times(),
    ///     Ok(vec![BusyInterval(540, 570), BusyInterval(720, 780)])
    /// );
    /// ```
    fn busy_times(self) -> Result<Vec<BusyInterval>, QueryError> {
        let events = filter_and_sort(
            self,
            |event| event.when.duration() > 0,
            by_start_then_longest,
        );

        reduce_sorted(events.iter().map(|event| &event.when))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u16, end: u16) -> TimeRange {
        TimeRange::from_start_end(start, end, false)
    }

    #[test]
    fn nothing_to_reduce() {
        let none: Vec<TimeRange> = vec![];
        assert_eq!(reduce_sorted(&none), Ok(vec![]));
    }

    #[test]
    fn keeps_disjoint_ranges() {
        let ranges = vec![range(0, 30), range(60, 90), range(120, 150)];
        assert_eq!(
            reduce_sorted(&ranges),
            Ok(vec![
                BusyInterval(0, 30),
                BusyInterval(60, 90),
                BusyInterval(120, 150)
            ])
        );
    }

    #[test]
    fn longest_of_same_start_wins() {
        // A shorter range listed first still gives way to the longer one
        let ranges = vec![range(30, 40), range(30, 90)];
        assert_eq!(reduce_sorted(&ranges), Ok(vec![BusyInterval(30, 90)]));
    }

    #[test]
    fn drops_nested_ranges() {
        let ranges = vec![range(0, 500), range(100, 200), range(300, 500), range(499, 500)];
        assert_eq!(reduce_sorted(&ranges), Ok(vec![BusyInterval(0, 500)]));
    }

    #[test]
    fn coalesces_overlapping_and_touching_ranges() {
        let ranges = vec![range(0, 60), range(30, 90), range(90, 120), range(200, 210)];
        assert_eq!(
            reduce_sorted(&ranges),
            Ok(vec![BusyInterval(0, 120), BusyInterval(200, 210)])
        );
    }

    #[test]
    fn skips_empty_ranges() {
        let ranges = vec![
            TimeRange::from_start_duration(10, 0),
            range(20, 30),
            TimeRange::from_start_duration(100, 0),
        ];
        assert_eq!(reduce_sorted(&ranges), Ok(vec![BusyInterval(20, 30)]));
    }

    #[test]
    fn out_of_order_input_fails() {
        let ranges = vec![range(60, 90), range(30, 40)];
        assert_eq!(
            reduce_sorted(&ranges),
            Err(QueryError::OutOfOrder {
                previous: 60,
                next: 30
            })
        );

        // Reported against the interval being built, not the first one
        let ranges = vec![range(60, 90), range(100, 110), range(30, 40)];
        assert_eq!(
            reduce_sorted(&ranges),
            Err(QueryError::OutOfOrder {
                previous: 100,
                next: 30
            })
        );
    }

    #[test]
    fn busy_times_sorts_first() {
        let events = vec![
            Event::new("1", "c", vec!["A"], range(300, 330)),
            Event::new("2", "a", vec!["A"], range(0, 30)),
            Event::new("3", "b", vec!["A"], range(15, 45)),
            Event::new("4", "d", vec!["A"], range(300, 400)),
        ];

        assert_eq!(
            events.iter().busy_times(),
            Ok(vec![BusyInterval(0, 45), BusyInterval(300, 400)])
        );
    }
}
