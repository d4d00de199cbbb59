//! Stream-to-stream transforms over [`EventStream`].
//!
//! Each filter kernel has a parameter struct implementing [`Transform`];
//! a [`Pipeline`] chains them in order.
//!
//! Notes
//! - Transforms are pure: same input and parameters, same output. Working
//!   state lives for the duration of one `apply` call.
//! - Output bounds (`width`/`height`) are those of the input stream.
//! - Inputs are expected time-sorted (non-decreasing t).

use std::fmt;

use tracing::debug;

use crate::events::EventStream;
use crate::kernels::denoise::spatio_temporal;
use crate::kernels::refractory_period::refractory_period;
use crate::kernels::time_ops::by_time;

/// Pure transform over an event stream.
pub trait Transform: fmt::Debug {
    fn apply(&self, stream: &EventStream) -> EventStream;
}

/// Keeps events with `start <= t <= end`. See [`by_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByTime {
    pub start: i64,
    pub end: i64,
}

impl ByTime {
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

impl Transform for ByTime {
    fn apply(&self, stream: &EventStream) -> EventStream {
        let out = by_time(&stream.events, self.start, self.end);
        debug!(
            start = self.start,
            end = self.end,
            input = stream.len(),
            kept = out.len(),
            "time range filter"
        );
        stream.with_events(out)
    }
}

/// Per-pixel refractory period in microseconds. See [`refractory_period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefractoryPeriod {
    pub window: i64,
}

impl RefractoryPeriod {
    pub const fn new(window: i64) -> Self {
        Self { window }
    }
}

impl Transform for RefractoryPeriod {
    fn apply(&self, stream: &EventStream) -> EventStream {
        let out = refractory_period(&stream.events, self.window);
        debug!(
            window = self.window,
            input = stream.len(),
            kept = out.len(),
            "refractory filter"
        );
        stream.with_events(out)
    }
}

/// Background-activity filter. See [`spatio_temporal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatioTemporal {
    /// Largest column considered when clipping neighborhoods.
    pub x_max: usize,
    /// Largest row considered when clipping neighborhoods.
    pub y_max: usize,
    /// Correlation window in microseconds.
    pub window: i64,
}

impl SpatioTemporal {
    pub const fn new(x_max: usize, y_max: usize, window: i64) -> Self {
        Self { x_max, y_max, window }
    }

    /// Clips neighborhoods to the stream's own bounds.
    pub fn for_stream(stream: &EventStream, window: i64) -> Self {
        Self {
            x_max: stream.width.saturating_sub(1),
            y_max: stream.height.saturating_sub(1),
            window,
        }
    }
}

impl Transform for SpatioTemporal {
    fn apply(&self, stream: &EventStream) -> EventStream {
        let out = spatio_temporal(&stream.events, self.x_max, self.y_max, self.window);
        debug!(
            x_max = self.x_max,
            y_max = self.y_max,
            window = self.window,
            input = stream.len(),
            kept = out.len(),
            "background activity filter"
        );
        stream.with_events(out)
    }
}

/// Ordered chain of transforms.
#[derive(Debug, Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    pub fn with<T: Transform + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Transform for Pipeline {
    /// Runs every stage in order. An empty pipeline returns a copy of the input.
    fn apply(&self, stream: &EventStream) -> EventStream {
        let mut current = stream.clone();
        for stage in &self.stages {
            current = stage.apply(&current);
        }
        current
    }
}
