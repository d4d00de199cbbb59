use crate::events::Event;

/// Time range filter: keeps events with start <= t <= end.
///
/// Input must be timestamp-sorted: the scan stops at the first event with
/// t > end, so anything after it is dropped even if it would qualify.
/// Order is preserved.
pub fn by_time(events: &[Event], start: i64, end: i64) -> Vec<Event> {
    let mut out = Vec::new();
    for ev in events {
        if ev.t > end {
            break;
        }
        if ev.t >= start {
            out.push(*ev);
        }
    }
    out
}
