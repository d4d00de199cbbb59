use std::collections::HashMap;

use crate::events::{Coordinate, Event};

/// Refractory period kernel.
///
/// For each pixel, an event at time `t` is rejected iff
///     t - last_kept[x,y] < window
/// and kept otherwise, in which case last_kept[x,y] := t. Rejected events leave
/// the state untouched.
///
/// last_kept starts at `-window` the first time a pixel is seen, so the first
/// event at any pixel with t >= 0 is kept. Output keeps input order.
pub fn refractory_period(events: &[Event], window: i64) -> Vec<Event> {
    let mut last_kept: HashMap<Coordinate, i64> = HashMap::new();
    let mut out = Vec::with_capacity(events.len());

    for ev in events {
        let last = last_kept.entry(ev.coords()).or_insert(window.saturating_neg());
        if ev.t.saturating_sub(*last) < window {
            continue;
        }
        *last = ev.t;
        out.push(*ev);
    }

    out
}
