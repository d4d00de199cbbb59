use crate::events::Coordinate;
use crate::kernels::time_surface::SparseSurface;

/// Exclusive upper bound of the coordinate space.
const COORD_LIMIT: usize = u16::MAX as usize + 1;

/// Clamps the half-open span [start, start + len) to the coordinate space.
#[inline]
fn span(start: usize, len: usize) -> std::ops::Range<usize> {
    let lo = start.min(COORD_LIMIT);
    let hi = start.saturating_add(len).min(COORD_LIMIT);
    lo..hi
}

impl SparseSurface {
    /// Present entries inside [x, x+width) x [y, y+height), visited row by row.
    ///
    /// Does not allocate; meant for small neighborhoods.
    pub fn window(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (Coordinate, i64)> + '_ {
        let xs = span(x, width);
        span(y, height).flat_map(move |row| {
            xs.clone().filter_map(move |col| {
                let c = Coordinate::new(col as u16, row as u16);
                self.get(c).map(|v| (c, v))
            })
        })
    }

    /// New surface holding only the entries inside
    /// [x, x+width) x [y, y+height). Absent coordinates stay absent.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> SparseSurface {
        let (xs, ys) = (span(x, width), span(y, height));
        let area = xs.len().saturating_mul(ys.len());
        if area <= self.len() {
            return self.window(x, y, width, height).collect();
        }
        // Window larger than the surface: scan entries instead of cells.
        self.iter()
            .filter(|(c, _)| xs.contains(&(c.x as usize)) && ys.contains(&(c.y as usize)))
            .collect()
    }
}

/// Free-function form of [`SparseSurface::crop`].
#[inline]
pub fn crop_window(
    surface: &SparseSurface,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> SparseSurface {
    surface.crop(x, y, width, height)
}
