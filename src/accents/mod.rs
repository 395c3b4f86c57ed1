//! Scene accents that sit outside the morphing formation

pub mod snow;
pub mod star;

pub use snow::{SnowField, SnowSpec, SNOW_STRIDE};
pub use star::{StarSpec, TopStar};
