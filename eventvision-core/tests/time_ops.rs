use eventvision_core::kernels::time_ops::by_time;
use eventvision_core::transform::{ByTime, Transform};
use eventvision_core::{Event, EventStream};
use proptest::prelude::*;

fn two_events() -> Vec<Event> {
    vec![Event::new(1, 1, 1000, 1), Event::new(2, 2, 3000, 0)]
}

#[test]
fn range_before_all_events_is_empty() {
    assert!(by_time(&two_events(), 0, 900).is_empty());
}

#[test]
fn range_after_all_events_is_empty() {
    assert!(by_time(&two_events(), 4000, 4500).is_empty());
}

#[test]
fn range_covering_first_event() {
    assert_eq!(by_time(&two_events(), 0, 1500), vec![Event::new(1, 1, 1000, 1)]);
}

#[test]
fn bounds_are_inclusive() {
    assert_eq!(by_time(&two_events(), 1000, 3000), two_events());
}

#[test]
fn scan_stops_at_first_event_past_end() {
    // Out-of-order tail: t=500 qualifies but comes after t=3000 > end.
    let events = vec![
        Event::new(0, 0, 1000, 1),
        Event::new(0, 0, 3000, 1),
        Event::new(0, 0, 500, 1),
    ];
    assert_eq!(by_time(&events, 0, 1500), vec![Event::new(0, 0, 1000, 1)]);
}

#[test]
fn transform_keeps_stream_bounds() {
    let stream = EventStream::from_events(two_events());
    let out = ByTime::new(2000, 5000).apply(&stream);
    assert_eq!(out.events, vec![Event::new(2, 2, 3000, 0)]);
    assert_eq!((out.width, out.height), (3, 3));
}

proptest! {
    #[test]
    fn sorted_input_matches_plain_range_filter(
        mut ts in prop::collection::vec(-1000i64..10_000, 0..100),
        start in -1000i64..10_000,
        len in 0i64..5000,
    ) {
        ts.sort_unstable();
        let events: Vec<Event> = ts.iter().map(|&t| Event::new(0, 0, t, 1)).collect();
        let end = start + len;

        let expected: Vec<Event> = events
            .iter()
            .copied()
            .filter(|e| e.t >= start && e.t <= end)
            .collect();
        prop_assert_eq!(by_time(&events, start, end), expected);
    }
}
