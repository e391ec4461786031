pub mod contraction_sequence;

pub use contraction_sequence::*;
