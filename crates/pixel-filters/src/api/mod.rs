//! Public pipeline API.
//!
//! [`Operation`] is one flag-selected step, [`FilterContext`] carries the
//! state that outlives a single step (current sample mode, tuning, RNG), and
//! [`FilterError`] is the error every fallible call returns.

mod context;
pub(crate) mod error;
mod operation;

pub use context::{FilterContext, Tuning};
pub use error::FilterError;
pub use operation::Operation;
