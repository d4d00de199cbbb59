use crate::events::Event;
use crate::kernels::time_surface::SparseSurface;

/// Background-activity kernel (8-neighborhood spatiotemporal filter).
///
/// Semantics:
/// - Keep one sparse time surface; every coordinate present in `events` starts
///   at `-window`.
/// - Iterate events in input order (stable), remembering the (x, y, p) of the
///   previous event. Before the first event that triple is (0, 0, 0).
/// - For an event whose (x, y, p) differs from the previous one:
///     - reset its own surface entry to `-window`,
///     - look at the present entries in the 3x3 neighborhood clipped to
///       [0, x_max] x [0, y_max] (the pixel itself included),
///     - keep it iff min(t - neighbor) <= window. No entries means drop.
/// - An event with the same (x, y, p) as the previous one is kept without
///   looking at neighbors.
/// - Kept or not, write t into the surface at the event's pixel.
/// - Return the kept events in original order.
pub fn spatio_temporal(events: &[Event], x_max: usize, y_max: usize, window: i64) -> Vec<Event> {
    let aged = window.saturating_neg();
    let mut surface = SparseSurface::with_capacity(events.len());
    for ev in events {
        surface.insert(ev.coords(), aged);
    }

    let mut prev = (0u16, 0u16, 0u8);
    let mut out = Vec::with_capacity(events.len());

    for ev in events {
        let c = ev.coords();
        let triple = (ev.x, ev.y, ev.p);

        let keep = if triple == prev {
            true
        } else {
            surface.insert(c, aged);

            let x = ev.x as usize;
            let y = ev.y as usize;
            let (x_lo, x_hi) = (x.saturating_sub(1), x_max.min(x + 1));
            let (y_lo, y_hi) = (y.saturating_sub(1), y_max.min(y + 1));
            let w = (x_hi + 1).saturating_sub(x_lo);
            let h = (y_hi + 1).saturating_sub(y_lo);

            surface
                .window(x_lo, y_lo, w, h)
                .map(|(_, last)| ev.t.saturating_sub(last))
                .min()
                .map_or(false, |age| age <= window)
        };

        surface.insert(c, ev.t);
        prev = triple;

        if keep {
            out.push(*ev);
        }
    }

    out
}
