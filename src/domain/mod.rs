pub mod clock;
pub mod event;
pub mod geometry;
pub mod puzzle;
