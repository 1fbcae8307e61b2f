//! Format adapters: one flow policy per output medium.
//!
//! An adapter only supplies configuration; the flow core is shared. Adapters
//! are registered by extension and by name so callers can pick one from a
//! file name or a CLI flag.
//!
//! # Example
//!
//! ```
//! use narraflow::adapters::AdapterRegistry;
//!
//! let registry = AdapterRegistry::with_defaults();
//! let adapter = registry.resolve("pptx").unwrap();
//! assert_eq!(adapter.name(), "slides");
//! assert_eq!(adapter.policy().max_rows_per_table_page, Some(14));
//! ```

mod flowing_document;
mod page_document;
mod slide_deck;

pub use flowing_document::FlowingDocumentAdapter;
pub use page_document::PageDocumentAdapter;
pub use slide_deck::SlideDeckAdapter;

use crate::error::{Error, Result};
use crate::layout::FlowPolicy;
use crate::parser::ParseOptions;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait for output format adapters.
///
/// Implement this trait to add a new output medium.
pub trait FormatAdapter: Send + Sync {
    /// Get the name of this adapter.
    fn name(&self) -> &str;

    /// Get the output extensions this adapter serves.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Short human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// Get the flow policy for this medium.
    fn policy(&self) -> FlowPolicy;

    /// Get the parse options for this medium.
    fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
    }

    /// Check if this adapter serves the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for format adapters.
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn FormatAdapter>>,
    by_name: HashMap<String, Arc<dyn FormatAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the page, slide and flowing document adapters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PageDocumentAdapter::new()));
        registry.register(Arc::new(SlideDeckAdapter::new()));
        registry.register(Arc::new(FlowingDocumentAdapter::new()));
        registry
    }

    /// Register an adapter for all its extensions and its name.
    pub fn register(&mut self, adapter: Arc<dyn FormatAdapter>) {
        for ext in adapter.supported_extensions() {
            self.adapters.insert(ext.to_lowercase(), adapter.clone());
        }
        self.by_name.insert(adapter.name().to_lowercase(), adapter);
    }

    /// Get an adapter by extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn FormatAdapter>> {
        let ext = ext.trim_start_matches('.');
        self.adapters.get(&ext.to_lowercase()).cloned()
    }

    /// Get an adapter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn FormatAdapter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get an adapter by name, falling back to extension.
    pub fn resolve(&self, format: &str) -> Result<Arc<dyn FormatAdapter>> {
        self.get_by_name(format)
            .or_else(|| self.get_by_extension(format))
            .ok_or_else(|| Error::UnknownFormat(format.to_string()))
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.get_by_extension(ext).is_some()
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.adapters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Get all registered adapters, sorted by name.
    pub fn adapters(&self) -> Vec<Arc<dyn FormatAdapter>> {
        let mut names: Vec<&String> = self.by_name.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.by_name.get(name).cloned())
            .collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
