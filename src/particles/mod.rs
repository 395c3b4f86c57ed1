pub mod dust;

pub use dust::{DustField, DustSpec, DustUniforms, DUST_STRIDE};
