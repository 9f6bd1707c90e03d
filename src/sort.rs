//! Stable ordering and filtering primitives.
//!
//! Comparators and predicates are plain closures, so the same routines order
//! events, busy intervals and attendee ids.

use crate::event::Event;
use core::cmp::Ordering;

/// Sorts `items` with a top-down merge sort.
///
/// The sort is stable and always `O(n log n)`; an already sorted input is
/// left as is.
///
/// # Examples
/// ```
/// use freizeit_libs::sort::merge_sort_by;
///
/// let mut words = vec!["delta", "alpha", "charlie", "bravo"];
/// merge_sort_by(&mut words, |a, b| a.len().cmp(&b.len()));
///
/// // Equal lengths keep their original order
/// assert_eq!(words, vec!["delta", "alpha", "bravo", "charlie"]);
/// ```
pub fn merge_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }

    let mut buffer = items.clone();
    let len = items.len();
    sort_range(items, &mut buffer, 0, len, &mut compare);
}

pub fn merge_sort<T>(items: &mut Vec<T>)
where
    T: Clone + Ord,
{
    merge_sort_by(items, T::cmp)
}

fn sort_range<T, F>(items: &mut [T], buffer: &mut [T], left: usize, right: usize, compare: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if right - left < 2 {
        return;
    }

    let middle = left + (right - left) / 2;
    sort_range(items, buffer, left, middle, compare);
    sort_range(items, buffer, middle, right, compare);

    // Both halves are in order and already joined
    if compare(&items[middle - 1], &items[middle]) != Ordering::Greater {
        return;
    }

    merge(items, buffer, left, middle, right, compare);
}

fn merge<T, F>(
    items: &mut [T],
    buffer: &mut [T],
    left: usize,
    middle: usize,
    right: usize,
    compare: &mut F,
) where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    buffer[left..right].clone_from_slice(&items[left..right]);

    let (mut i, mut j) = (left, middle);
    for slot in items[left..right].iter_mut() {
        // Ties take from the left half, which keeps the sort stable
        let take_left = j == right
            || (i < middle && compare(&buffer[i], &buffer[j]) != Ordering::Greater);

        if take_left {
            *slot = buffer[i].clone();
            i += 1;
        } else {
            *slot = buffer[j].clone();
            j += 1;
        }
    }
}

/// Keeps every item accepted by `predicate`, in order.
pub fn include_if<'a, T, I, P>(items: I, mut predicate: P) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    P: FnMut(&T) -> bool,
{
    items.into_iter().filter(|item| predicate(*item)).collect()
}

/// `include_if` followed by `merge_sort_by`.
pub fn filter_and_sort<'a, T, I, P, F>(items: I, predicate: P, mut compare: F) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    P: FnMut(&T) -> bool,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut filtered = include_if(items, predicate);
    merge_sort_by(&mut filtered, |a, b| compare(*a, *b));
    filtered
}

/// Events by start ascending; events starting together put the longest first.
pub fn by_start_then_longest(first: &Event, second: &Event) -> Ordering {
    first
        .when
        .start()
        .cmp(&second.when.start())
        .then_with(|| second.when.duration().cmp(&first.when.duration()))
}
