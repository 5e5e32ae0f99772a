pub mod drop_math;
pub mod level_curve;
pub mod rng;

pub use drop_math::*;
pub use level_curve::*;
pub use rng::*;
