//! Core entry point for the `tailwind_guide` crate.
//!
//! The crate assembles the TailwindCSS setup guide as an ordered list of content blocks
//! ([`model`]) and hands it to [`genpdf`] through the [`builder::DocumentBuilder`].

pub mod builder;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod styles;
pub mod tutorial;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{DocumentBuilder, HeadingPage, RenderSummary, RenderedPdf};
pub use error::BuildError;
pub use genpdf::PaperSize;
pub use model::{Block, DocumentContent, ListBlock, SpacerBlock, StyledTextBlock, TextStyle};
