pub mod geo;
pub mod vec2d;
#[cfg(test)]
mod tests;

pub use geo::GeoPoint;
pub use vec2d::Vec2D;
