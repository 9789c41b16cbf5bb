//! Rule building blocks: conditions, rules, and resolved transitions.
//!
//! Rules describe state changes declaratively. The evaluation engine reads
//! them; nothing in this module touches a board on its own.

pub mod occupation;
pub mod rule;
pub mod transition;

pub use occupation::OccupationState;
pub use rule::{Conditions, TransitionRule};
pub use transition::{Diff, Transition};
