// Re-export glam for convenience
pub use glam::*;

// Lux math types
mod interval;
mod onb;
mod ray;

pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
