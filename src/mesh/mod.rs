pub mod shapes;
pub mod vertex;

pub use vertex::{Mesh, Vertex, VERTEX_STRIDE};
