//! Element implementations built on top of `genpdf` primitives.
//!
//! `genpdf` ships wrapping paragraphs and line breaks measured in lines of text.  The guide also
//! needs fixed gaps measured in points, verbatim code listings that are never reflowed, and a way
//! to learn which page a heading landed on.  This module provides those elements together with
//! the [`PageLog`] they share.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use genpdf::elements::Text;
use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

/// A vertical gap of fixed height.
///
/// When less space than the requested height remains on the page the gap consumes what is left
/// instead of pushing content onto a new page.  A gap that lands on a page without content
/// collapses to nothing, so it never opens a page on its own.
#[derive(Debug)]
pub struct Spacer {
    height: Mm,
    log: Rc<PageLog>,
}

impl Spacer {
    /// Creates a gap of the given height.
    pub fn new(height: impl Into<Mm>, log: &Rc<PageLog>) -> Self {
        Self {
            height: height.into(),
            log: Rc::clone(log),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if !self.log.page_has_content() {
            Mm::default()
        } else if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Verbatim multi-line text.
///
/// Every source line is printed as exactly one output line in the incoming style; lines are
/// neither wrapped nor joined and leading whitespace is kept.  Listings longer than the remaining
/// page continue on the next page with the first line that did not fit.
#[derive(Clone, Debug)]
pub struct Preformatted {
    lines: Vec<String>,
    next_line: usize,
}

impl Preformatted {
    /// Splits `text` on line breaks and prepares it for rendering.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            lines: text.as_ref().lines().map(str::to_owned).collect(),
            next_line: 0,
        }
    }

    /// Returns the source lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Element for Preformatted {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let line_height = style.line_height(&context.font_cache);

        while let Some(line) = self.lines.get(self.next_line) {
            if line_height > area.size().height {
                result.has_more = true;
                return Ok(result);
            }

            let mut text = Text::new(line.as_str());
            let line_result = text.render(context, area.clone(), style)?;
            if line_result.has_more {
                result.has_more = true;
                return Ok(result);
            }

            result.size = result
                .size
                .stack_vertical(Size::new(line_result.size.width, line_height));
            area.add_offset(Position::new(0, line_height));
            self.next_line += 1;
        }

        Ok(result)
    }
}

/// Page bookkeeping shared between the page decorator and [`PageMarker`]s.
#[derive(Debug, Default)]
pub struct PageLog {
    current: Cell<usize>,
    has_content: Cell<bool>,
    marks: RefCell<Vec<Option<usize>>>,
}

impl PageLog {
    /// Creates an empty log wrapped for sharing.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Records that a new page was started and returns its 1-based number.
    pub fn start_page(&self) -> usize {
        let page = self.current.get() + 1;
        self.current.set(page);
        self.has_content.set(false);
        page
    }

    /// Returns whether anything other than a gap was drawn on the current page.
    pub fn page_has_content(&self) -> bool {
        self.has_content.get()
    }

    fn note_content(&self) {
        self.has_content.set(true);
    }

    /// Returns the number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.current.get()
    }

    /// Reserves a slot for a marker and returns its index.
    fn register(&self) -> usize {
        let mut marks = self.marks.borrow_mut();
        marks.push(None);
        marks.len() - 1
    }

    fn mark(&self, index: usize) {
        let mut marks = self.marks.borrow_mut();
        if let Some(slot) = marks.get_mut(index) {
            if slot.is_none() {
                *slot = Some(self.current.get());
            }
        }
    }

    /// Returns the page recorded for every marker, in registration order.
    pub fn marks(&self) -> Vec<Option<usize>> {
        self.marks.borrow().clone()
    }
}

/// Wraps an element and tells the [`PageLog`] when it draws on the current page.
pub struct ContentMarker<E> {
    inner: E,
    log: Rc<PageLog>,
}

impl<E: Element> ContentMarker<E> {
    /// Wraps `inner`, reporting its output to `log`.
    pub fn new(inner: E, log: &Rc<PageLog>) -> Self {
        Self {
            inner,
            log: Rc::clone(log),
        }
    }
}

impl<E: Element> Element for ContentMarker<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        if result.size.height > Mm::default() {
            self.log.note_content();
        }
        Ok(result)
    }
}

/// Wraps an element and records the page it first produces output on.
pub struct PageMarker<E> {
    inner: E,
    log: Rc<PageLog>,
    index: usize,
}

impl<E: Element> PageMarker<E> {
    /// Wraps `inner` and registers a slot in `log`.
    pub fn new(inner: E, log: &Rc<PageLog>) -> Self {
        Self {
            inner,
            index: log.register(),
            log: Rc::clone(log),
        }
    }
}

impl<E: Element> Element for PageMarker<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        if result.size.height > Mm::default() {
            self.log.note_content();
            self.log.mark(self.index);
        }
        Ok(result)
    }
}
