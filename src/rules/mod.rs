//! Move rules: directions and the move resolver.
//!
//! `Direction::rules` is the strategy table that parameterises the single
//! pass algorithm in `MoveResolver`.

pub mod direction;
pub mod resolver;

pub use direction::{Axis, Direction, Rules};
pub use resolver::{Merge, MoveOutcome, MoveResolver, Settlement};
