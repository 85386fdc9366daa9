use crate::domain::model::RunSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct NormalizeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> NormalizeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting batch normalization");

        // Extract
        let samples = self.pipeline.extract()?;
        tracing::debug!("Extracted {} samples", samples.len());

        // Transform
        let normalized = self.pipeline.transform(samples)?;
        tracing::debug!("Normalized {} samples", normalized.len());

        // Load
        let summary = self.pipeline.load(&normalized)?;
        tracing::info!(
            "✅ Wrote {} records ({} valid) to {}",
            summary.records,
            summary.valid,
            summary.destination
        );

        Ok(summary)
    }
}
