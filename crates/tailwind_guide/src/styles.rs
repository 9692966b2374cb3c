//! Presentation attributes for the named [`TextStyle`]s.
//!
//! A [`StyleSheet`] maps every named style to a font size, line spacing, colour, alignment and
//! vertical spacing.  Distances are stored in points, the unit the guide's layout was designed
//! in, and converted to millimetres with [`points`] when elements are built.

use genpdf::fonts::{Font, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Margins, Mm};

use crate::model::TextStyle;

const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Accent colour used for the title and the footer (`#2563EB`).
pub const ACCENT: Color = Color::Rgb(0x25, 0x63, 0xEB);

/// Converts a length in points into a `genpdf` length.
pub fn points(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value * MM_PER_POINT))
}

/// Attributes applied to a single named style.
#[derive(Clone, Copy, Debug)]
pub struct TextAttributes {
    /// Font size in points.
    pub font_size: u8,
    /// Line height as a multiple of the font size.
    pub line_spacing: f64,
    /// Text colour, inherited from the document when `None`.
    pub color: Option<Color>,
    /// Whether the bold variant of the family is used.
    pub bold: bool,
    /// Horizontal alignment of the text.
    pub alignment: Alignment,
    /// Whether the text is set in the monospace family.
    pub monospace: bool,
    /// Gap above the block in points.
    pub space_before: f64,
    /// Gap below the block in points.
    pub space_after: f64,
    /// Left indent in points.
    pub left_indent: f64,
}

impl TextAttributes {
    const fn body(font_size: u8) -> Self {
        Self {
            font_size,
            line_spacing: 1.2,
            color: None,
            bold: false,
            alignment: Alignment::Left,
            monospace: false,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
        }
    }

    /// Builds the `genpdf` style for these attributes.
    ///
    /// `monospace` is the family installed for code; when it is `None` the document family is
    /// used instead.
    pub fn style(&self, monospace: Option<&FontFamily<Font>>) -> Style {
        let mut style = Style::new()
            .with_font_size(self.font_size)
            .with_line_spacing(self.line_spacing);
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        if self.monospace {
            if let Some(family) = monospace {
                style.set_font_family(family.clone());
            }
        }
        style
    }

    /// Returns the padding that realises the vertical spacing and indent.
    pub fn margins(&self) -> Margins {
        Margins::trbl(
            points(self.space_before),
            points(0.0),
            points(self.space_after),
            points(self.left_indent),
        )
    }
}

/// Attribute table for all named styles.
#[derive(Clone, Copy, Debug)]
pub struct StyleSheet {
    /// Document title.
    pub title: TextAttributes,
    /// Section headings.
    pub heading: TextAttributes,
    /// Body text and list items.
    pub normal: TextAttributes,
    /// Preformatted code.
    pub code: TextAttributes,
    /// Closing line.
    pub footer: TextAttributes,
}

impl StyleSheet {
    /// Returns the attributes for `style`.
    pub fn attributes(&self, style: TextStyle) -> &TextAttributes {
        match style {
            TextStyle::Title => &self.title,
            TextStyle::Heading => &self.heading,
            TextStyle::Normal => &self.normal,
            TextStyle::Code => &self.code,
            TextStyle::Footer => &self.footer,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: TextAttributes {
                line_spacing: 26.0 / 22.0,
                color: Some(ACCENT),
                bold: true,
                alignment: Alignment::Center,
                space_after: 6.0,
                ..TextAttributes::body(22)
            },
            heading: TextAttributes {
                line_spacing: 18.0 / 14.0,
                bold: true,
                space_before: 12.0,
                space_after: 6.0,
                ..TextAttributes::body(14)
            },
            normal: TextAttributes::body(10),
            code: TextAttributes {
                line_spacing: 1.1,
                monospace: true,
                left_indent: 36.0,
                ..TextAttributes::body(8)
            },
            footer: TextAttributes {
                color: Some(ACCENT),
                alignment: Alignment::Center,
                ..TextAttributes::body(10)
            },
        }
    }
}
