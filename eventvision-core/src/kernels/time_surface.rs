use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::events::{Coordinate, Event};

/// Accumulation policy for surfaces of active events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// cell += t
    Additive,
    /// cell = t (last event in stream order wins)
    Recent,
}

impl Method {
    pub const fn name(self) -> &'static str {
        match self {
            Method::Additive => "additive",
            Method::Recent => "recent",
        }
    }

    /// Per-cell fold for this policy, resolved once per call outside the
    /// event loop.
    #[inline]
    pub fn accumulator(self) -> fn(&mut i64, i64) {
        fn additive(cell: &mut i64, t: i64) {
            *cell = cell.wrapping_add(t);
        }
        fn recent(cell: &mut i64, t: i64) {
            *cell = t;
        }
        match self {
            Method::Additive => additive,
            Method::Recent => recent,
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "additive" => Ok(Method::Additive),
            "recent" => Ok(Method::Recent),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dense surface of active events, row-major over (H, W): idx = y * W + x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceMatrix {
    width: usize,
    height: usize,
    cells: Vec<i64>,
}

impl SurfaceMatrix {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`; `None` outside the matrix.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<i64> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, i64> {
        self.cells.chunks_exact(self.width)
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.rows().map(<[i64]>::to_vec).collect()
    }
}

/// Builds a `height x width` matrix surface.
///
/// Semantics:
/// - Cells start at 0.
/// - Events with x >= width or y >= height are skipped.
/// - Each in-bounds event is folded into its cell with `method`.
///
/// Errors with `InvalidDimension` when either dimension is zero.
pub fn create_matrix(
    events: &[Event],
    method: Method,
    width: usize,
    height: usize,
) -> Result<SurfaceMatrix> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    let len = width
        .checked_mul(height)
        .ok_or(Error::InvalidDimension { width, height })?;

    let fold = method.accumulator();
    let mut cells = vec![0i64; len];
    for ev in events {
        let x = ev.x as usize;
        let y = ev.y as usize;
        if x >= width || y >= height {
            continue;
        }
        fold(&mut cells[y * width + x], ev.t);
    }

    Ok(SurfaceMatrix { width, height, cells })
}

/// Sparse surface of active events: only coordinates that received an event
/// (or were explicitly set) are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseSurface(HashMap<Coordinate, i64>);

impl SparseSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, c: Coordinate) -> Option<i64> {
        self.0.get(&c).copied()
    }

    #[inline]
    pub fn insert(&mut self, c: Coordinate, value: i64) -> Option<i64> {
        self.0.insert(c, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, i64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    #[inline]
    pub(crate) fn entry(&mut self, c: Coordinate) -> &mut i64 {
        self.0.entry(c).or_insert(0)
    }
}

impl FromIterator<(Coordinate, i64)> for SparseSurface {
    fn from_iter<I: IntoIterator<Item = (Coordinate, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds a sparse surface from every event (no bounds check), folding
/// repeated coordinates with `method`.
pub fn create_map(events: &[Event], method: Method) -> SparseSurface {
    let fold = method.accumulator();
    let mut surface = SparseSurface::new();
    for ev in events {
        fold(surface.entry(ev.coords()), ev.t);
    }
    surface
}
