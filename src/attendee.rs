use crate::event::Event;
use crate::sort::merge_sort;

/// Tests calendars against a fixed set of requested attendees.
///
/// The requested ids are copied and sorted once, so every test afterwards is
/// a binary search per attendee of the event: `O(n log m)` instead of
/// `O(n * m)`. Ids are opaque and compared exactly.
#[derive(Clone, Debug, Default)]
pub struct AttendeeFilter {
    attendees: Vec<String>,
}

impl AttendeeFilter {
    pub fn new<'a, I>(attendees: I) -> AttendeeFilter
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut attendees: Vec<String> = attendees.into_iter().cloned().collect();
        merge_sort(&mut attendees);
        attendees.dedup();

        AttendeeFilter { attendees }
    }

    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }

    fn is_requested(&self, attendee: &str) -> bool {
        self.attendees
            .binary_search_by(|probe| probe.as_str().cmp(attendee))
            .is_ok()
    }

    /// True if any of `others` was requested.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::attendee::AttendeeFilter;
    ///
    /// let requested = vec!["bob".to_string(), "alice".to_string()];
    /// let filter = AttendeeFilter::new(&requested);
    ///
    /// assert!(filter.intersects(vec!["carol", "alice"]));
    /// assert!(!filter.intersects(vec!["carol", "Alice"]));
    /// assert!(!filter.intersects(Vec::<&str>::new()));
    /// ```
    pub fn intersects<I, S>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        !self.attendees.is_empty()
            && others
                .into_iter()
                .any(|attendee| self.is_requested(attendee.as_ref()))
    }

    /// True if someone requested is attending `event`.
    pub fn matches(&self, event: &Event) -> bool {
        self.intersects(&event.attendees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeRange;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = AttendeeFilter::new(&ids(&[]));
        let event = Event::new("1", "standup", vec!["A", "B"], TimeRange::from_start_duration(0, 15));

        assert!(filter.is_empty());
        assert!(!filter.matches(&event));
    }

    #[test]
    fn duplicates_are_collapsed() {
        let filter = AttendeeFilter::new(&ids(&["B", "A", "B"]));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn matches_events_sharing_an_attendee() {
        let filter = AttendeeFilter::new(&ids(&["D", "A", "C"]));

        let shared = Event::new("1", "sync", vec!["B", "C"], TimeRange::from_start_duration(0, 30));
        let disjoint = Event::new("2", "sync", vec!["B", "E"], TimeRange::from_start_duration(0, 30));

        assert!(filter.matches(&shared));
        assert!(!filter.matches(&disjoint));
    }
}
