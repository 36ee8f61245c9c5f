//! Main extraction service.

use docsift_core::{
    DocumentReference, Error, ExtractError, ExtractionOptions, ExtractionOutput, FetchConfig,
    FetchError, HttpFetcher, Result,
};
use docsift_extract::{ExtractorRegistry, effective_extension, resolve_format};
use docsift_fetch::{HttpClient, SourceResolver};
use std::sync::Arc;
use tracing::{debug, info};

use crate::postprocess::build_output;

/// Resolves, detects, extracts and post-processes documents.
///
/// Holds only shared immutable state, so one pipeline can serve any number
/// of concurrent extractions.
pub struct ExtractionPipeline {
    resolver: SourceResolver,
    registry: Arc<ExtractorRegistry>,
}

impl ExtractionPipeline {
    /// Create a pipeline with the default extractors.
    #[must_use]
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self::with_registry(fetcher, Arc::new(ExtractorRegistry::with_defaults()))
    }

    /// Create a pipeline with a custom extractor registry.
    #[must_use]
    pub fn with_registry(fetcher: Arc<dyn HttpFetcher>, registry: Arc<ExtractorRegistry>) -> Self {
        Self {
            resolver: SourceResolver::new(fetcher),
            registry,
        }
    }

    /// Create a pipeline backed by a real HTTP client.
    pub fn from_fetch_config(config: FetchConfig) -> Result<Self> {
        let client = HttpClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Extract the text of one document.
    pub async fn extract(
        &self,
        reference: &DocumentReference,
        options: &ExtractionOptions,
    ) -> Result<ExtractionOutput> {
        let file_size = reference.size()?;

        let raw = self.resolver.resolve(reference).await?;
        if raw.is_empty() {
            return Err(FetchError::EmptyContent(reference.label().to_string()).into());
        }

        let declared = reference.declared_extension();
        let (data, hint) = raw.into_parts();
        let format = resolve_format(declared.as_deref(), hint.as_deref(), &data)?;
        let reported = effective_extension(declared.as_deref(), hint.as_deref())
            .unwrap_or_else(|| format.extension().to_string());
        debug!(
            "Extracting {} as {} ({} bytes)",
            reference.label(),
            format,
            data.len()
        );

        let registry = Arc::clone(&self.registry);
        let content = tokio::task::spawn_blocking(move || registry.extract(format, &data))
            .await
            .map_err(|e| ExtractError::Failed(format!("Task join error: {e}")))??;

        let output = build_output(content, &reported, reference, file_size, options);
        info!(
            "Extracted {} ({}, {} words)",
            reference.label(),
            output.format,
            output.word_count
        );
        Ok(output)
    }

    /// Extract several documents concurrently, preserving input order.
    pub async fn extract_all(
        self: &Arc<Self>,
        references: Vec<DocumentReference>,
        options: ExtractionOptions,
    ) -> Vec<Result<ExtractionOutput>> {
        let handles: Vec<_> = references
            .into_iter()
            .map(|reference| {
                let pipeline = Arc::clone(self);
                tokio::spawn(async move { pipeline.extract(&reference, &options).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap_or_else(|e| {
                Err(Error::Extraction(ExtractError::Failed(format!(
                    "Task join error: {e}"
                ))))
            }));
        }
        results
    }
}
