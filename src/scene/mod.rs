pub mod formation;
pub mod state;

pub use formation::Formation;
pub use state::{Arrangement, SceneState};
