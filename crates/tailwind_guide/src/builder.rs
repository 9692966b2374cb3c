//! Document construction and rendering.
//!
//! [`DocumentBuilder`] accumulates an ordered [`DocumentContent`] through its `append_*`
//! methods and converts it into `genpdf` elements in a single pass when the document is
//! rendered.  Layout, wrapping and pagination are left to `genpdf`.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use genpdf::elements::{Paragraph, UnorderedList};
use genpdf::error::Error;
use genpdf::fonts::{Font, FontFamily};
use genpdf::style;
use genpdf::{Element, Margins, PageDecorator, PaperSize, Size};
use log::{debug, info, warn};

use crate::elements::{ContentMarker, PageLog, PageMarker, Preformatted, Spacer};
use crate::error::BuildError;
use crate::fonts;
use crate::model::{Block, DocumentContent, ListBlock, SpacerBlock, StyledTextBlock, TextStyle};
use crate::styles::{points, StyleSheet};

/// Glyph placed in front of every bullet list item.
pub const BULLET: &str = "\u{2022}";

/// Page margin applied on every side, in points.
pub const DEFAULT_MARGIN_PT: f64 = 72.0;

/// Accumulates the content of a document and renders it to PDF.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    title: String,
    paper_size: Size,
    margins: Margins,
    style_sheet: StyleSheet,
    content: DocumentContent,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

impl DocumentBuilder {
    /// Creates an empty A4 document whose PDF metadata carries `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paper_size: PaperSize::A4.into(),
            margins: Margins::all(points(DEFAULT_MARGIN_PT)),
            style_sheet: StyleSheet::default(),
            content: DocumentContent::new(),
            #[cfg(feature = "bookmarks")]
            bookmarks: false,
        }
    }

    /// Sets the paper size.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Replaces the style sheet used to present the named styles.
    pub fn with_style_sheet(mut self, style_sheet: StyleSheet) -> Self {
        self.style_sheet = style_sheet;
        self
    }

    /// Adds an outline entry for every heading to the rendered PDF.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content accumulated so far.
    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    /// Consumes the builder and returns the accumulated content.
    pub fn into_content(self) -> DocumentContent {
        self.content
    }

    /// Appends text in the given named style.
    pub fn append_text(&mut self, text: impl Into<String>, style: TextStyle) -> &mut Self {
        self.content.push(Block::Text(StyledTextBlock::new(text, style)));
        self
    }

    /// Appends the document title.
    pub fn append_title(&mut self, text: impl Into<String>) -> &mut Self {
        self.append_text(text, TextStyle::Title)
    }

    /// Appends a section heading.
    pub fn append_heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.append_text(text, TextStyle::Heading)
    }

    /// Appends a body paragraph.
    pub fn append_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.append_text(text, TextStyle::Normal)
    }

    /// Appends a code listing. Line breaks are kept and lines are never wrapped.
    pub fn append_code_block(&mut self, text: impl Into<String>) -> &mut Self {
        self.append_text(text, TextStyle::Code)
    }

    /// Appends the closing footer line.
    pub fn append_footer(&mut self, text: impl Into<String>) -> &mut Self {
        self.append_text(text, TextStyle::Footer)
    }

    /// Appends a bulleted list with one body-text item per entry of `items`.
    ///
    /// An empty `items` is rejected with [`BuildError::EmptyList`] and leaves the content
    /// untouched.
    pub fn append_bullet_list<I, S>(&mut self, items: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = ListBlock::from_items(items).ok_or(BuildError::EmptyList)?;
        self.content.push(Block::List(list));
        Ok(self)
    }

    /// Appends a vertical gap of `height` points.
    ///
    /// Heights that are not positive and finite are rejected with
    /// [`BuildError::InvalidSpacer`].
    pub fn append_spacer(&mut self, height: f64) -> Result<&mut Self, BuildError> {
        let spacer = SpacerBlock::new(height).ok_or(BuildError::InvalidSpacer { height })?;
        self.content.push(Block::Spacer(spacer));
        Ok(self)
    }

    /// Lays out the content and returns the PDF bytes without touching the filesystem.
    pub fn render_to_bytes(self) -> Result<RenderedPdf, BuildError> {
        let font_family = fonts::default_font_family().map_err(BuildError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);
        document.set_title(self.title.as_str());
        document.set_paper_size(self.paper_size);
        document.set_font_size(self.style_sheet.normal.font_size);
        document.set_line_spacing(self.style_sheet.normal.line_spacing);

        let monospace = match fonts::monospace_font_family() {
            Ok(family) => Some(document.add_font_family(family)),
            Err(err) => {
                warn!("Code listings use the body font: {}", err);
                None
            }
        };

        let log = PageLog::shared();
        document.set_page_decorator(GuidePageDecorator::new(self.margins, Rc::clone(&log)));

        let headings: Vec<String> = self.content.headings().map(str::to_owned).collect();
        let block_count = self.content.len();
        let mut elements = ElementFactory {
            sheet: self.style_sheet,
            monospace,
            log: &log,
            pending_gap: 0.0,
        };
        for block in self.content {
            elements.push(&mut document, block);
        }
        elements.finish(&mut document);

        debug!("Rendering '{}' with {} blocks", self.title, block_count);
        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(BuildError::Render)?;

        let heading_pages: Vec<HeadingPage> = headings
            .into_iter()
            .zip(log.marks())
            .map(|(title, page)| HeadingPage { title, page })
            .collect();

        #[cfg(feature = "bookmarks")]
        if self.bookmarks {
            bytes = crate::bookmarks::apply_heading_bookmarks(&bytes, &heading_pages)?;
        }

        Ok(RenderedPdf {
            bytes,
            page_count: log.page_count(),
            heading_pages,
        })
    }

    /// Renders the document and writes it to `path`, replacing any existing file.
    ///
    /// The PDF is produced in memory before the file is opened, so a failed render leaves the
    /// destination untouched.  A missing or read-only parent directory yields
    /// [`BuildError::Io`].
    pub fn render(self, path: impl AsRef<Path>) -> Result<RenderSummary, BuildError> {
        let path = path.as_ref();
        let pdf = self.render_to_bytes()?;
        fs::write(path, &pdf.bytes).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Wrote {} ({} bytes, {} pages)",
            path.display(),
            pdf.bytes.len(),
            pdf.page_count
        );

        Ok(RenderSummary {
            path: path.to_path_buf(),
            bytes: pdf.bytes.len(),
            page_count: pdf.page_count,
        })
    }
}

/// In-memory result of [`DocumentBuilder::render_to_bytes`].
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// The serialized PDF document.
    pub bytes: Vec<u8>,
    /// Number of pages laid out.
    pub page_count: usize,
    /// Page each heading starts on, in document order.
    pub heading_pages: Vec<HeadingPage>,
}

/// A heading together with the page it was rendered on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingPage {
    /// Heading text.
    pub title: String,
    /// 1-based page number, `None` if the heading produced no output.
    pub page: Option<usize>,
}

/// Summary of a document written by [`DocumentBuilder::render`].
#[derive(Clone, Debug)]
pub struct RenderSummary {
    /// Destination of the PDF.
    pub path: PathBuf,
    /// Size of the written file in bytes.
    pub bytes: usize,
    /// Number of pages laid out.
    pub page_count: usize,
}

/// Maps content blocks to `genpdf` elements.
///
/// Adjacent spacers are merged into a single gap before they reach the document.
struct ElementFactory<'a> {
    sheet: StyleSheet,
    monospace: Option<FontFamily<Font>>,
    log: &'a Rc<PageLog>,
    pending_gap: f64,
}

impl ElementFactory<'_> {
    fn push(&mut self, document: &mut genpdf::Document, block: Block) {
        match block {
            Block::Spacer(spacer) => self.pending_gap += spacer.height(),
            Block::Text(text) => {
                self.flush_gap(document);
                self.push_text(document, text);
            }
            Block::List(list) => {
                self.flush_gap(document);
                self.push_list(document, list);
            }
        }
    }

    fn finish(&mut self, document: &mut genpdf::Document) {
        self.flush_gap(document);
    }

    fn flush_gap(&mut self, document: &mut genpdf::Document) {
        if self.pending_gap > 0.0 {
            document.push(Spacer::new(points(self.pending_gap), self.log));
            self.pending_gap = 0.0;
        }
    }

    fn push_list(&mut self, document: &mut genpdf::Document, list: ListBlock) {
        let attributes = self.sheet.normal;
        let mut elements = UnorderedList::with_bullet(BULLET);
        for item in list.items() {
            let item_attributes = self.sheet.attributes(item.style());
            let mut paragraph = Paragraph::new(item.text());
            paragraph.set_alignment(item_attributes.alignment);
            let style = item_attributes.style(self.monospace.as_ref());
            elements.push(paragraph.styled(style));
        }
        let style = attributes.style(self.monospace.as_ref());
        document.push(
            ContentMarker::new(elements.styled(style), self.log).padded(attributes.margins()),
        );
    }

    fn push_text(&mut self, document: &mut genpdf::Document, text: StyledTextBlock) {
        let attributes = *self.sheet.attributes(text.style());
        let style = attributes.style(self.monospace.as_ref());
        let margins = attributes.margins();

        match text.style() {
            TextStyle::Code => {
                let listing = Preformatted::new(text.text()).styled(style);
                document.push(ContentMarker::new(listing, self.log).padded(margins));
            }
            TextStyle::Heading => {
                let mut paragraph = Paragraph::new(text.text());
                paragraph.set_alignment(attributes.alignment);
                document
                    .push(PageMarker::new(paragraph.styled(style), self.log).padded(margins));
            }
            TextStyle::Title | TextStyle::Normal | TextStyle::Footer => {
                let mut paragraph = Paragraph::new(text.text());
                paragraph.set_alignment(attributes.alignment);
                document
                    .push(ContentMarker::new(paragraph.styled(style), self.log).padded(margins));
            }
        }
    }
}

/// Applies the page margins and counts pages for the [`PageLog`].
struct GuidePageDecorator {
    margins: Margins,
    log: Rc<PageLog>,
}

impl GuidePageDecorator {
    fn new(margins: Margins, log: Rc<PageLog>) -> Self {
        Self { margins, log }
    }
}

impl PageDecorator for GuidePageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let page = self.log.start_page();
        debug!("Starting page {}", page);
        area.add_margins(self.margins);
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentBuilder;
    use crate::error::BuildError;
    use crate::model::{Block, TextStyle};

    #[test]
    fn appends_keep_insertion_order() {
        let mut builder = DocumentBuilder::new("Order");
        builder
            .append_title("Title")
            .append_heading("Heading")
            .append_paragraph("Body")
            .append_code_block("a\nb");
        builder.append_spacer(10.0).expect("valid spacer");
        builder
            .append_bullet_list(["one", "two"])
            .expect("non-empty list")
            .append_footer("Bye");

        let styles: Vec<_> = builder
            .content()
            .blocks()
            .iter()
            .map(|block| match block {
                Block::Text(text) => text.style().name(),
                Block::List(_) => "list",
                Block::Spacer(_) => "spacer",
            })
            .collect();

        assert_eq!(
            styles,
            ["title", "heading", "normal", "code", "spacer", "list", "footer"]
        );
    }

    #[test]
    fn empty_bullet_list_is_rejected() {
        let mut builder = DocumentBuilder::new("Lists");
        builder.append_paragraph("before");

        let result = builder.append_bullet_list(Vec::<&str>::new());
        assert!(matches!(result, Err(BuildError::EmptyList)));
        assert_eq!(builder.content().len(), 1);
    }

    #[test]
    fn invalid_spacers_are_rejected() {
        let mut builder = DocumentBuilder::new("Spacers");
        for height in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                builder.append_spacer(height),
                Err(BuildError::InvalidSpacer { .. })
            ));
        }
        assert!(builder.content().is_empty());
    }

    #[test]
    fn code_blocks_are_stored_verbatim() {
        let source = "@tailwind base;\n@tailwind components;\n@tailwind utilities;";
        let mut builder = DocumentBuilder::new("Code");
        builder.append_code_block(source);

        match builder.into_content().blocks() {
            [Block::Text(text)] => {
                assert_eq!(text.style(), TextStyle::Code);
                assert_eq!(text.text(), source);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }
}
