pub mod time_surface;
pub mod crop;
pub mod denoise;
pub mod refractory_period;
pub mod time_ops;
