use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting menu import...");

        // Extract
        let documents = self.pipeline.extract().await?;
        tracing::info!("📄 Extracted {} documents", documents.len());

        // Transform
        let result = self.pipeline.transform(documents).await?;
        tracing::info!(
            "🍽️ Parsed {} menus ({} failed)",
            result.menus.len(),
            result.failures.len()
        );
        for failure in &result.failures {
            tracing::warn!("⚠️ {} rejected ({}): {}", failure.source, failure.kind, failure.message);
        }

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
