use std::fs;

use genpdf::Margins;
use sha2::{Digest, Sha256};
use tailwind_guide::fonts;
use tailwind_guide::styles::{points, StyleSheet};
use tailwind_guide::tutorial;
use tailwind_guide::{BuildError, DocumentBuilder};

const SKIP_NOTE: &str =
    "no body fonts available. Set TAILWIND_GUIDE_FONTS_DIR or install Liberation/DejaVu fonts.";

fn fonts_ready(test: &str) -> bool {
    let available = fonts::default_fonts_available();
    if !available {
        eprintln!("Skipping {}: {}", test, SKIP_NOTE);
    }
    available
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

fn numbered_listing(lines: usize) -> String {
    (1..=lines)
        .map(|line| format!("  line {:03}: @apply fade-in;", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn page_count(builder: DocumentBuilder) -> usize {
    builder.render_to_bytes().expect("render document").page_count
}

#[test]
fn guide_renders_to_a_pdf_file() {
    if !fonts_ready("guide_renders_to_a_pdf_file") {
        return;
    }

    let directory = tempfile::tempdir().expect("create temp dir");
    let path = directory.path().join(tutorial::DEFAULT_OUTPUT_FILE);

    let summary = tutorial::tailwind_setup_guide()
        .expect("guide content")
        .render(&path)
        .expect("render guide");

    let bytes = fs::read(&path).expect("read rendered guide");
    assert!(!bytes.is_empty(), "rendered PDF should not be empty");
    assert!(bytes.starts_with(b"%PDF-"), "missing PDF header");
    assert_eq!(summary.bytes, bytes.len());
    assert_eq!(summary.path, path);
    assert!(summary.page_count >= 1);
}

#[test]
fn empty_document_renders() {
    if !fonts_ready("empty_document_renders") {
        return;
    }

    let pdf = DocumentBuilder::new("Empty")
        .render_to_bytes()
        .expect("render empty document");
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert!(pdf.heading_pages.is_empty());
}

#[test]
fn any_number_of_blocks_renders() {
    if !fonts_ready("any_number_of_blocks_renders") {
        return;
    }

    for count in [1, 7, 120] {
        let mut builder = DocumentBuilder::new("Blocks");
        for index in 0..count {
            match index % 4 {
                0 => {
                    builder.append_heading(format!("Heading {}", index));
                }
                1 => {
                    builder.append_paragraph("Body text that is long enough to wrap across the line at least once when rendered on A4 paper.");
                }
                2 => {
                    builder.append_code_block("line one\n    indented line\n\nafter a blank line");
                }
                _ => {
                    builder.append_spacer(8.0).expect("valid spacer");
                }
            }
        }

        let pdf = builder
            .render_to_bytes()
            .unwrap_or_else(|err| panic!("render {} blocks: {}", count, err));
        assert!(pdf.bytes.starts_with(b"%PDF-"));
    }
}

#[test]
fn gaps_never_open_a_page_on_their_own() {
    if !fonts_ready("gaps_never_open_a_page_on_their_own") {
        return;
    }

    let mut only_gaps = DocumentBuilder::new("Gaps");
    only_gaps.append_spacer(1e6).expect("valid spacer");
    only_gaps.append_spacer(1e6).expect("valid spacer");
    assert_eq!(page_count(only_gaps), 1);

    let mut trailing_gaps = DocumentBuilder::new("Trailing gaps");
    trailing_gaps.append_paragraph("a");
    trailing_gaps.append_spacer(1e6).expect("valid spacer");
    trailing_gaps.append_spacer(1e6).expect("valid spacer");
    assert_eq!(page_count(trailing_gaps), 1);

    let mut gap_then_text = DocumentBuilder::new("Gap then text");
    gap_then_text.append_paragraph("a");
    gap_then_text.append_spacer(1e6).expect("valid spacer");
    gap_then_text.append_paragraph("b");
    assert_eq!(page_count(gap_then_text), 2);
}

#[test]
fn long_code_listing_continues_on_the_next_page() {
    if !fonts_ready("long_code_listing_continues_on_the_next_page") {
        return;
    }

    let mut builder = DocumentBuilder::new("Listing");
    builder
        .append_heading("Listing")
        .append_code_block(numbered_listing(200))
        .append_paragraph("after the listing");

    let pdf = builder.render_to_bytes().expect("render long listing");
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert!(pdf.page_count > 1, "200 lines fit on {} page", pdf.page_count);
    assert_eq!(pdf.heading_pages[0].page, Some(1));
}

#[test]
fn margins_and_style_sheet_shape_the_layout() {
    if !fonts_ready("margins_and_style_sheet_shape_the_layout") {
        return;
    }

    let listing = numbered_listing(150);
    let guide = |mut builder: DocumentBuilder| {
        builder.append_code_block(listing.as_str());
        builder
    };

    let default_pages = page_count(guide(DocumentBuilder::new("Default")));

    let narrow = Margins::trbl(points(250.0), points(72.0), points(250.0), points(72.0));
    let narrow_pages = page_count(guide(DocumentBuilder::new("Margins").with_margins(narrow)));
    assert!(
        narrow_pages > default_pages,
        "{} pages with tall margins, {} by default",
        narrow_pages,
        default_pages
    );

    let mut sheet = StyleSheet::default();
    sheet.code.font_size = 16;
    let large_pages = page_count(guide(DocumentBuilder::new("Large").with_style_sheet(sheet)));
    assert!(
        large_pages > default_pages,
        "{} pages with large code, {} by default",
        large_pages,
        default_pages
    );
}

#[test]
fn headings_are_placed_on_pages() {
    if !fonts_ready("headings_are_placed_on_pages") {
        return;
    }

    let pdf = tutorial::tailwind_setup_guide()
        .expect("guide content")
        .render_to_bytes()
        .expect("render guide");

    assert_eq!(pdf.heading_pages.len(), 7);
    let pages: Vec<usize> = pdf
        .heading_pages
        .iter()
        .map(|heading| heading.page.expect("heading was rendered"))
        .collect();
    assert!(pages.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(pages.iter().all(|page| *page >= 1 && *page <= pdf.page_count));
}

#[test]
fn missing_parent_directory_fails_without_creating_a_file() {
    if !fonts_ready("missing_parent_directory_fails_without_creating_a_file") {
        return;
    }

    let directory = tempfile::tempdir().expect("create temp dir");
    let path = directory.path().join("missing").join("guide.pdf");

    let err = tutorial::tailwind_setup_guide()
        .expect("guide content")
        .render(&path)
        .expect_err("render into a missing directory");

    match err {
        BuildError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected an I/O error, got {other}"),
    }
    assert!(!path.exists());
    assert!(!path.parent().expect("parent").exists());
}

#[test]
fn rerendering_overwrites_with_identical_content() {
    if !fonts_ready("rerendering_overwrites_with_identical_content") {
        return;
    }

    let directory = tempfile::tempdir().expect("create temp dir");
    let path = directory.path().join("guide.pdf");
    fs::write(&path, b"stale contents").expect("seed existing file");

    tutorial::tailwind_setup_guide()
        .expect("guide content")
        .render(&path)
        .expect("first render");
    let first = fs::read(&path).expect("read first render");

    tutorial::tailwind_setup_guide()
        .expect("guide content")
        .render(&path)
        .expect("second render");
    let second = fs::read(&path).expect("read second render");

    assert!(first.starts_with(b"%PDF-"), "stale contents were not replaced");
    assert_eq!(first.len(), second.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first),
        normalized_hash(&second),
        "renders must match after metadata normalization"
    );
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_add_an_outline() {
    if !fonts_ready("bookmarks_add_an_outline") {
        return;
    }

    let pdf = tutorial::tailwind_setup_guide()
        .expect("guide content")
        .with_bookmarks(true)
        .render_to_bytes()
        .expect("render guide with bookmarks");

    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert!(pdf
        .bytes
        .windows(b"/Outlines".len())
        .any(|window| window == b"/Outlines"));
}
