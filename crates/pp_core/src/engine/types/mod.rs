pub mod vec2;

pub use vec2::{point_to_segment_distance, Vec2, EPSILON};
