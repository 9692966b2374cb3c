//! Data structures describing the logical content of the guide.
//!
//! The types in this module mirror the building blocks that end up as
//! [`genpdf::elements`], but they intentionally avoid referencing the rendering
//! crate so the content can be assembled and inspected without loading fonts.
//! Order is significant everywhere: the sequence of blocks in a
//! [`DocumentContent`] is the order in which they are laid out on the page.

use std::fmt;

/// Named text styles understood by the [`crate::styles::StyleSheet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// Large, centred document title.
    Title,
    /// Section heading.
    Heading,
    /// Body text.
    Normal,
    /// Preformatted monospace text that is never reflowed.
    Code,
    /// Centred closing line.
    Footer,
}

impl TextStyle {
    /// Short lowercase name used in outlines and log messages.
    pub fn name(self) -> &'static str {
        match self {
            TextStyle::Title => "title",
            TextStyle::Heading => "heading",
            TextStyle::Normal => "normal",
            TextStyle::Code => "code",
            TextStyle::Footer => "footer",
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A string of content together with the style it is rendered in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledTextBlock {
    text: String,
    style: TextStyle,
}

impl StyledTextBlock {
    /// Creates a new block with the given text and style.
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Returns the raw text of the block.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the style applied to the block.
    pub fn style(&self) -> TextStyle {
        self.style
    }
}

/// An ordered, non-empty list of items rendered as bullet points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListBlock {
    items: Vec<StyledTextBlock>,
}

impl ListBlock {
    /// Wraps every string in `items` as a body-text block.
    ///
    /// Returns `None` when `items` yields nothing.
    pub fn from_items<I, S>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<_> = items
            .into_iter()
            .map(|item| StyledTextBlock::new(item, TextStyle::Normal))
            .collect();

        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    /// Returns the list items in order.
    pub fn items(&self) -> &[StyledTextBlock] {
        &self.items
    }
}

/// A vertical gap measured in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpacerBlock {
    height: f64,
}

impl SpacerBlock {
    /// Creates a spacer of `height` points.
    ///
    /// Returns `None` unless the height is positive and finite.
    pub fn new(height: f64) -> Option<Self> {
        if height.is_finite() && height > 0.0 {
            Some(Self { height })
        } else {
            None
        }
    }

    /// Returns the height of the gap in points.
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// A single unit of content placed on the page.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled text: title, heading, paragraph, code or footer.
    Text(StyledTextBlock),
    /// Bulleted list.
    List(ListBlock),
    /// Vertical gap.
    Spacer(SpacerBlock),
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Text(text) => {
                let mut lines = text.text().lines();
                let first = lines.next().unwrap_or_default();
                let remaining = lines.count();
                write!(f, "{:<8} {}", text.style().name(), first)?;
                if remaining > 0 {
                    write!(f, " (+{} lines)", remaining)?;
                }
                Ok(())
            }
            Block::List(list) => write!(f, "{:<8} {} items", "list", list.items().len()),
            Block::Spacer(spacer) => write!(f, "{:<8} {}pt", "spacer", spacer.height()),
        }
    }
}

/// Ordered sequence of blocks that make up a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentContent {
    blocks: Vec<Block>,
}

impl DocumentContent {
    /// Creates an empty content sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block at the end of the sequence.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Returns the blocks in layout order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns whether no block has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over the heading texts in layout order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Text(text) if text.style() == TextStyle::Heading => Some(text.text()),
            _ => None,
        })
    }
}

impl IntoIterator for DocumentContent {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentContent {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, DocumentContent, ListBlock, SpacerBlock, StyledTextBlock, TextStyle};

    #[test]
    fn list_requires_items() {
        assert!(ListBlock::from_items(Vec::<String>::new()).is_none());

        let list = ListBlock::from_items(["one", "two"]).expect("non-empty list");
        assert_eq!(list.items().len(), 2);
        assert!(list
            .items()
            .iter()
            .all(|item| item.style() == TextStyle::Normal));
    }

    #[test]
    fn spacer_rejects_non_positive_heights() {
        assert!(SpacerBlock::new(0.0).is_none());
        assert!(SpacerBlock::new(-4.0).is_none());
        assert!(SpacerBlock::new(f64::NAN).is_none());
        assert!(SpacerBlock::new(f64::INFINITY).is_none());
        assert_eq!(SpacerBlock::new(12.0).map(|s| s.height()), Some(12.0));
    }

    #[test]
    fn headings_follow_insertion_order() {
        let mut content = DocumentContent::new();
        content.push(Block::Text(StyledTextBlock::new("Title", TextStyle::Title)));
        content.push(Block::Text(StyledTextBlock::new("First", TextStyle::Heading)));
        content.push(Block::Text(StyledTextBlock::new("body", TextStyle::Normal)));
        content.push(Block::Text(StyledTextBlock::new("Second", TextStyle::Heading)));

        assert_eq!(content.headings().collect::<Vec<_>>(), ["First", "Second"]);
    }

    #[test]
    fn display_summarises_multiline_text() {
        let block = Block::Text(StyledTextBlock::new("npm run dev\n# open", TextStyle::Code));
        assert_eq!(block.to_string(), "code     npm run dev (+1 lines)");
    }
}
