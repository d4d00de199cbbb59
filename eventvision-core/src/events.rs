//! Event data model shared by codecs, surfaces and filters.

/// Pixel address of an event. Used as the key of sparse time surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Column
    pub x: u16,
    /// Row
    pub y: u16,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    /// Timestamp in microseconds
    pub t: i64,
    /// X-coordinate (column)
    pub x: u16,
    /// Y-coordinate (row)
    pub y: u16,
    /// Polarity: 1 for a brightness increase, 0 for a decrease.
    pub p: u8,
}

impl Event {
    #[inline]
    pub const fn new(x: u16, y: u16, t: i64, p: u8) -> Self {
        Self { t, x, y, p }
    }

    #[inline]
    pub const fn coords(&self) -> Coordinate {
        Coordinate { x: self.x, y: self.y }
    }
}

/// Ordered events plus the scene bounds they were captured in.
///
/// Invariants:
/// - Events are expected in non-decreasing timestamp order. Codecs keep file
///   order and filters keep input order; nothing re-sorts.
/// - `width`/`height` are declared bounds. Decoders set them to max observed
///   coordinate + 1; filters carry the input bounds through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStream {
    pub events: Vec<Event>,
    pub width: usize,
    pub height: usize,
}

impl EventStream {
    /// Builds a stream whose bounds are the max observed coordinate + 1.
    /// An empty stream gets 1x1 bounds.
    pub fn from_events(events: Vec<Event>) -> Self {
        let (max_x, max_y) = events
            .iter()
            .fold((0u16, 0u16), |(mx, my), e| (mx.max(e.x), my.max(e.y)));
        Self {
            events,
            width: max_x as usize + 1,
            height: max_y as usize + 1,
        }
    }

    /// New stream with the same bounds as `self` and the given events.
    #[inline]
    pub fn with_events(&self, events: Vec<Event>) -> Self {
        Self {
            events,
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Returns whether timestamps are non-decreasing.
    pub fn is_time_sorted(&self) -> bool {
        self.events.windows(2).all(|w| w[0].t <= w[1].t)
    }
}

impl<'a> IntoIterator for &'a EventStream {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
