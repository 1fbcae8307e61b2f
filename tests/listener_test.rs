//! Integration tests for flow listeners.

use narraflow::layout::{
    CompositeListener, DefaultListener, FlowAction, FlowListener, FlowPolicy, LineHeights, Margins,
    PageFlowEngine,
};
use narraflow::model::{ContentBlock, ImageBlock, TableGrid};
use narraflow::Narraflow;

/// Listener that records every callback.
#[derive(Default)]
struct RecordingListener {
    breaks: Vec<usize>,
    headers: Vec<(usize, bool)>,
    placed: Vec<(String, usize)>,
}

impl FlowListener for RecordingListener {
    fn on_page_break(&mut self, page: usize) {
        self.breaks.push(page);
    }

    fn on_table_header(&mut self, page: usize, repeated: bool) {
        self.headers.push((page, repeated));
    }

    fn on_block_placed(&mut self, block: &ContentBlock, page: usize) {
        let label = block.text().unwrap_or("-").to_string();
        self.placed.push((label, page));
    }
}

/// Listener that drops headings.
struct SkipHeadings;

impl FlowListener for SkipHeadings {
    fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
        if block.is_heading() {
            FlowAction::Skip
        } else {
            FlowAction::Continue
        }
    }
}

/// Listener that upper-cases paragraph text.
struct Shout;

impl FlowListener for Shout {
    fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
        match block {
            ContentBlock::Paragraph { text } => {
                FlowAction::Replace(ContentBlock::paragraph(text.to_uppercase()))
            }
            _ => FlowAction::Continue,
        }
    }
}

fn small_policy() -> FlowPolicy {
    FlowPolicy::new()
        .with_page_size(300.0, 140.0)
        .with_margins(Margins::uniform(20.0))
        .with_line_heights(LineHeights::uniform(20.0))
}

#[test]
fn test_recording_listener_sees_breaks_and_headers() {
    let grid = TableGrid::from_rows((0..8).map(|i| vec![format!("k{i}"), format!("v{i}")]));
    let blocks = vec![ContentBlock::paragraph("intro"), ContentBlock::Table(grid)];

    let policy = small_policy();
    let mut listener = RecordingListener::default();
    let mut engine = PageFlowEngine::new(&policy)
        .unwrap()
        .with_listener(&mut listener);
    engine.place_all(&blocks);
    let output = engine.finish();

    // Five rows of 20pt fit in the 100pt content area.
    assert_eq!(output.page_count, 2);
    assert_eq!(listener.breaks, vec![1]);
    assert_eq!(listener.headers, vec![(0, false), (1, true)]);
    assert_eq!(
        listener.placed,
        vec![("intro".to_string(), 0), ("-".to_string(), 1)]
    );
}

#[test]
fn test_skip_listener_removes_blocks() {
    let mut listener = SkipHeadings;
    let output = Narraflow::new()
        .render_with_listener("# Title\nBody\n## Sub\nMore", &mut listener)
        .unwrap();

    assert_eq!(output.lines().collect::<Vec<_>>(), vec!["Body", "More"]);
    assert_eq!(output.stats.heading_count, 0);
    assert_eq!(output.stats.paragraph_count, 2);
}

#[test]
fn test_replace_listener_changes_content() {
    let mut listener = Shout;
    let output = Narraflow::new()
        .render_with_listener("# Title\nquiet words", &mut listener)
        .unwrap();

    assert_eq!(output.lines().collect::<Vec<_>>(), vec!["Title", "QUIET WORDS"]);
}

#[test]
fn test_composite_first_decision_wins() {
    let mut composite = CompositeListener::new()
        .with_listener(DefaultListener::new())
        .with_listener(SkipHeadings)
        .with_listener(Shout);
    assert_eq!(composite.len(), 3);

    let blocks = vec![
        ContentBlock::heading(1, "Gone"),
        ContentBlock::paragraph("loud"),
        ContentBlock::Image(ImageBlock::new("chart.png").with_caption("Figure 1")),
    ];
    let policy = FlowPolicy::new();
    let mut engine = PageFlowEngine::new(&policy)
        .unwrap()
        .with_listener(&mut composite);
    engine.place_all(&blocks);
    let output = engine.finish();

    assert_eq!(output.lines().collect::<Vec<_>>(), vec!["LOUD", "Figure 1"]);
    assert_eq!(output.stats.image_count, 1);
}

#[test]
fn test_empty_composite_is_transparent() {
    let mut composite = CompositeListener::new();
    assert!(composite.is_empty());

    let output = Narraflow::new()
        .render_with_listener("a\nb", &mut composite)
        .unwrap();
    assert_eq!(output.lines().count(), 2);
}
