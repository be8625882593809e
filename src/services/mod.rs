pub mod pipeline;
pub mod sink;

pub use pipeline::{Pipeline, RunSummary};
pub use sink::{deliver, Sink, StagedOutput};
