//! # narraflow
//!
//! Flow LLM-generated analysis narrative into paginated output.
//!
//! Narrative text mixes markdown-like prose with loosely formatted tables.
//! This crate recovers the tables, parses the prose into typed blocks and
//! lays everything out in a single column across fixed-size pages or slides.
//! Drawing is left to a [`render::RenderBackend`].
//!
//! ## Quick Start
//!
//! ```
//! use narraflow::adapters::SlideDeckAdapter;
//! use narraflow::render_narrative;
//!
//! fn main() -> narraflow::Result<()> {
//!     let text = "# Summary\n\nRevenue grew.\n\n[[\"Region\",\"Q1\"],[\"East\",\"12\"]]";
//!     let output = render_narrative(text, &SlideDeckAdapter::new())?;
//!
//!     assert_eq!(output.page_count, 1);
//!     assert_eq!(output.stats.table_count, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table recovery**: fenced `json:table` blocks, bare 2-D bracket
//!   literals, markdown pipe tables and `key: value` runs
//! - **Script-aware wrapping**: narrower lines for CJK text
//! - **Space and count pagination**: per-format policies with header
//!   repetition across breaks
//! - **Backend replay**: placed instructions drive any drawing surface
//! - **Parallel batches**: independent documents rendered with Rayon

pub mod adapters;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use adapters::{AdapterRegistry, FormatAdapter};
pub use error::{Error, Result};
pub use layout::{FlowListener, FlowOutput, FlowPolicy, FlowStats, PageFlowEngine};
pub use model::{ContentBlock, ImageBlock, PlacedInstruction, TableGrid};
pub use parser::{
    ExtractOptions, MarkdownBlockParser, NormalizeOptions, ParseOptions, TableBlockExtractor,
    TextNormalizer,
};
pub use render::{replay, to_json, to_outline, JsonFormat, RenderBackend};
pub use text::WrapPolicy;

use rayon::prelude::*;

/// Parse raw narrative into content blocks with default options.
///
/// Extracted grids follow the text blocks as [`ContentBlock::Table`].
///
/// # Example
///
/// ```
/// use narraflow::{parse_narrative, ContentBlock};
///
/// let blocks = parse_narrative("## Outlook\nStable.");
/// assert!(matches!(blocks[0], ContentBlock::Heading { level: 2, .. }));
/// assert_eq!(blocks[1].text(), Some("Stable."));
/// ```
pub fn parse_narrative(text: &str) -> Vec<ContentBlock> {
    Narraflow::new().blocks(text)
}

/// Parse raw narrative with custom options.
pub fn parse_narrative_with(
    text: &str,
    normalize: &NormalizeOptions,
    extract: &ExtractOptions,
    parse: &ParseOptions,
) -> Vec<ContentBlock> {
    let normalized = TextNormalizer::new(normalize.clone()).process(text);
    let (cleaned, grids) = TableBlockExtractor::with_options(extract.clone()).extract(&normalized);

    let mut blocks = MarkdownBlockParser::with_options(parse.clone()).parse(&cleaned);
    if !grids.is_empty() {
        log::debug!("appending {} extracted table(s)", grids.len());
    }
    blocks.extend(grids.into_iter().map(ContentBlock::Table));
    blocks
}

/// Flow blocks onto pages with the given policy.
///
/// # Errors
///
/// Returns [`Error::InvalidPolicy`] if the policy fails validation.
pub fn layout(blocks: &[ContentBlock], policy: &FlowPolicy) -> Result<FlowOutput> {
    let mut engine = PageFlowEngine::new(policy)?;
    engine.place_all(blocks);
    Ok(engine.finish())
}

/// Parse and lay out one narrative for an output format.
///
/// # Example
///
/// ```
/// use narraflow::adapters::PageDocumentAdapter;
/// use narraflow::render_narrative;
///
/// let output = render_narrative("Hello.", &PageDocumentAdapter::new()).unwrap();
/// assert_eq!(output.lines().collect::<Vec<_>>(), vec!["Hello."]);
/// ```
pub fn render_narrative(text: &str, adapter: &dyn FormatAdapter) -> Result<FlowOutput> {
    Narraflow::for_adapter(adapter).render(text)
}

/// Render independent narratives in parallel.
///
/// Results keep the input order. Each document gets its own engine.
pub fn render_batch<S>(texts: &[S], adapter: &dyn FormatAdapter) -> Vec<Result<FlowOutput>>
where
    S: AsRef<str> + Sync,
{
    Narraflow::for_adapter(adapter).render_batch(texts)
}

/// Builder-style API for configuring the render pipeline.
///
/// # Example
///
/// ```
/// use narraflow::{FlowPolicy, Narraflow, ParseOptions};
///
/// let output = Narraflow::new()
///     .with_policy(FlowPolicy::new().with_max_items_per_page(2))
///     .with_parse_options(ParseOptions::new().core_only())
///     .render("one\ntwo\nthree")
///     .unwrap();
/// assert_eq!(output.page_count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Narraflow {
    normalize_options: NormalizeOptions,
    extract_options: ExtractOptions,
    parse_options: ParseOptions,
    policy: FlowPolicy,
}

impl Narraflow {
    /// Create a pipeline with default options and an A4 page policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline configured by a format adapter.
    pub fn for_adapter(adapter: &dyn FormatAdapter) -> Self {
        Self::new()
            .with_policy(adapter.policy())
            .with_parse_options(adapter.parse_options())
    }

    /// Set the flow policy.
    pub fn with_policy(mut self, policy: FlowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set the table extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set the normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize_options = options;
        self
    }

    /// Only normalize Unicode and line endings.
    pub fn minimal_normalization(mut self) -> Self {
        self.normalize_options = NormalizeOptions::minimal();
        self
    }

    /// Get the flow policy.
    pub fn policy(&self) -> &FlowPolicy {
        &self.policy
    }

    /// Parse narrative into blocks without laying them out.
    pub fn blocks(&self, text: &str) -> Vec<ContentBlock> {
        parse_narrative_with(
            text,
            &self.normalize_options,
            &self.extract_options,
            &self.parse_options,
        )
    }

    /// Parse and lay out one narrative.
    pub fn render(&self, text: &str) -> Result<FlowOutput> {
        layout(&self.blocks(text), &self.policy)
    }

    /// Parse and lay out one narrative, reporting progress to a listener.
    pub fn render_with_listener(
        &self,
        text: &str,
        listener: &mut dyn FlowListener,
    ) -> Result<FlowOutput> {
        let blocks = self.blocks(text);
        let mut engine = PageFlowEngine::new(&self.policy)?.with_listener(listener);
        engine.place_all(&blocks);
        Ok(engine.finish())
    }

    /// Lay out one narrative and replay it onto a backend.
    pub fn render_to(&self, text: &str, backend: &mut dyn RenderBackend) -> Result<FlowOutput> {
        let output = self.render(text)?;
        replay(&output, backend)?;
        Ok(output)
    }

    /// Render independent narratives in parallel, keeping input order.
    pub fn render_batch<S>(&self, texts: &[S]) -> Vec<Result<FlowOutput>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.render(text.as_ref()))
            .collect()
    }
}
