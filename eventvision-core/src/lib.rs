/*!
Event-camera stream processing: ATIS AER and Prophesee DAT codecs, surfaces of
active events, and spatiotemporal filters.
*/

pub mod codecs;
pub mod error;
pub mod events;
pub mod kernels;
pub mod transform;

pub use error::{Error, Result};
pub use events::{Coordinate, Event, EventStream};
pub use kernels::time_surface::{Method, SparseSurface, SurfaceMatrix};
