//! World geometry: block coordinates, bounding boxes and block scans

pub mod aabb;
pub mod block_pos;
pub mod scan;

pub use aabb::Aabb;
pub use block_pos::BlockPos;
pub use scan::OutwardScan;
