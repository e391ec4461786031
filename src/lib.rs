pub mod errors;
pub mod graph;
pub mod io;
pub mod log;
pub mod trace;
pub mod utils;

pub mod prelude {
    pub use super::errors::*;
    pub use super::graph::*;
    pub use super::io::*;
    pub use super::trace::{
        ChangeRecord, ContractionTrace, EdgeMove, EdgeShrink, Endpoint, OrientationIndex,
    };
    pub use super::utils::*;
}

#[cfg(test)]
mod testing;
