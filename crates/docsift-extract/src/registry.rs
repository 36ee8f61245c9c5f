//! Extractor registry for managing content extractors.

use docsift_core::{ContentExtractor, DocumentFormat, ExtractError, ExtractedContent};
use std::collections::HashMap;
use std::sync::Arc;

use crate::{DocxExtractor, HtmlExtractor, PdfExtractor, TextExtractor, XmlExtractor};

/// Registry of content extractors.
pub struct ExtractorRegistry {
    /// Named extractors
    extractors: HashMap<String, Arc<dyn ContentExtractor>>,
    /// Extension to extractor name mapping
    extension_mapping: HashMap<String, String>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            extension_mapping: HashMap::new(),
        }
    }

    /// Create a registry holding an extractor for every [`DocumentFormat`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("pdf", PdfExtractor::new());
        registry.register("docx", DocxExtractor::new());
        registry.register("html", HtmlExtractor::new());
        registry.register("xml", XmlExtractor::new());
        registry.register("txt", TextExtractor::new());
        registry
    }

    /// Register an extractor. A later registration takes over any
    /// extensions it shares with an earlier one.
    pub fn register<E: ContentExtractor + 'static>(&mut self, name: &str, extractor: E) {
        let extractor = Arc::new(extractor);
        for ext in extractor.supported_extensions() {
            self.extension_mapping
                .insert(ext.to_ascii_lowercase(), name.to_string());
        }
        self.extractors.insert(name.to_string(), extractor);
    }

    /// Get an extractor for an extension.
    #[must_use]
    pub fn get_for_extension(&self, extension: &str) -> Option<Arc<dyn ContentExtractor>> {
        self.extension_mapping
            .get(&extension.to_ascii_lowercase())
            .and_then(|name| self.extractors.get(name))
            .cloned()
    }

    /// Extract content with the extractor registered for a format.
    pub fn extract(
        &self,
        format: DocumentFormat,
        data: &[u8],
    ) -> Result<ExtractedContent, ExtractError> {
        let extractor = self
            .get_for_extension(format.extension())
            .ok_or_else(|| ExtractError::UnsupportedFormat(format.to_string()))?;

        extractor.extract_bytes(data)
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.extension_mapping.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
