use std::time::Instant;

use pixel_filters::{FilterContext, PixelBuffer};

use crate::error::ProcessError;
use crate::models::{EngineConfig, Invocation, Step};
use crate::rendering::{self, OutputFormat};
use crate::services::sink::{self, Sink, StagedOutput};

/// Result of a completed run
#[derive(Debug)]
pub struct RunSummary {
    /// Number of transform steps applied
    pub filters_applied: usize,
    /// Final image dimensions
    pub final_dims: (u32, u32),
    /// Sinks written, in order
    pub delivered: Vec<Sink>,
}

/// Runs an [`Invocation`]: decode → steps in order → deliver outputs.
pub struct Pipeline {
    config: EngineConfig,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Decode the input, apply every step and deliver the staged outputs.
    ///
    /// Nothing is written unless every step succeeds and every output can
    /// be delivered.
    pub fn run(&self, invocation: &Invocation) -> Result<RunSummary, ProcessError> {
        let image = rendering::read_image(&invocation.input)?;
        tracing::info!(
            input = %invocation.input.display(),
            width = image.width(),
            height = image.height(),
            "Decoded input"
        );

        let (image, staged) = self.process(image, &invocation.steps)?;

        sink::deliver(&staged)?;
        for output in &staged {
            tracing::info!(sink = %output.sink, bytes = output.bytes.len(), "Wrote output");
        }

        Ok(RunSummary {
            filters_applied: invocation
                .steps
                .iter()
                .filter(|s| matches!(s, Step::Filter(_)))
                .count(),
            final_dims: image.dims(),
            delivered: staged.into_iter().map(|s| s.sink).collect(),
        })
    }

    /// Apply `steps` to `image` without touching the filesystem.
    ///
    /// Returns the final image and the encoded outputs in step order.
    pub fn process(
        &self,
        image: PixelBuffer,
        steps: &[Step],
    ) -> Result<(PixelBuffer, Vec<StagedOutput>), ProcessError> {
        let mut ctx = FilterContext::new(self.config.tuning(), self.config.seed);
        let mut current = image;
        let mut staged = Vec::new();

        for (index, step) in steps.iter().enumerate() {
            match step {
                Step::Filter(op) => {
                    let started = Instant::now();
                    current = op.apply(current, &mut ctx)?;
                    tracing::debug!(
                        step = index,
                        operation = %op,
                        width = current.width(),
                        height = current.height(),
                        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                        "Applied operation"
                    );
                }
                Step::Output(path) => {
                    let format = OutputFormat::from_path(path)?;
                    let bytes = rendering::encode(&current, format, self.config.optimize_png)?;
                    tracing::debug!(
                        step = index,
                        path = %path.display(),
                        bytes = bytes.len(),
                        "Staged output"
                    );
                    staged.push(StagedOutput {
                        sink: Sink::File(path.clone()),
                        bytes,
                    });
                }
                Step::Pipe(cmd) => {
                    let bytes = rendering::encode_jpeg(&current)?;
                    tracing::debug!(step = index, %cmd, bytes = bytes.len(), "Staged pipe");
                    staged.push(StagedOutput {
                        sink: Sink::Command(cmd.clone()),
                        bytes,
                    });
                }
            }
        }

        Ok((current, staged))
    }
}
