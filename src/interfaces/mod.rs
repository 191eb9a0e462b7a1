//! Wire formats at the edge of the engine.

pub mod csv;
pub mod json;
