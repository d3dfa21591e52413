use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extraction::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraph text from a DOCX (OOXML) document, one line per paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::Docx(format!("not a zip container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART} missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART} unreadable: {e}")))?;

    let paragraphs = collect_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

/// Walks `word/document.xml` and returns the text of every `w:p` in document order.
///
/// Only `w:t` content counts as text. `w:tab`, `w:br` and `w:cr` count only inside a
/// run (`w:r`); the same element names inside paragraph properties describe tab stops.
/// Paragraphs nested in text boxes are emitted before the paragraph that anchors them.
fn collect_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            ExtractionError::Docx(format!(
                "malformed XML at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" if run_depth > 0 => push_to_top(&mut open, "\t"),
                b"br" | b"cr" if run_depth > 0 => push_to_top(&mut open, "\n"),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("bad text escape: {e}")))?;
                push_to_top(&mut open, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_to_top(open: &mut [String], text: &str) {
    if let Some(current) = open.last_mut() {
        current.push_str(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// Builds a minimal DOCX container around the given body XML.
    pub(crate) fn build_docx(body: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn para(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
    }

    #[test]
    fn test_paragraphs_joined_by_newline_in_order() {
        let body = format!("{}{}{}", para("Jane Doe"), para("Skills"), para("python docker"));
        let text = extract_docx_text(&build_docx(&body)).unwrap();
        assert_eq!(text, "Jane Doe\nSkills\npython docker");
    }

    #[test]
    fn test_runs_within_paragraph_are_concatenated() {
        let body = r#"<w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>Rust</w:t></w:r><w:r><w:t> Engineer</w:t></w:r></w:p>"#;
        let text = extract_docx_text(&build_docx(body)).unwrap();
        assert_eq!(text, "Senior Rust Engineer");
    }

    #[test]
    fn test_empty_paragraph_keeps_its_line() {
        let body = format!("{}<w:p/>{}", para("top"), para("bottom"));
        let text = extract_docx_text(&build_docx(&body)).unwrap();
        assert_eq!(text, "top\n\nbottom");
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs() {
        let body = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>2020</w:t><w:tab/><w:t>Acme</w:t><w:br/><w:t>Berlin</w:t></w:r></w:p>"#;
        let text = extract_docx_text(&build_docx(body)).unwrap();
        assert_eq!(text, "2020\tAcme\nBerlin");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let text = extract_docx_text(&build_docx(&para("R&amp;D &lt;team&gt;"))).unwrap();
        assert_eq!(text, "R&D <team>");
    }

    #[test]
    fn test_table_cell_paragraphs_are_included() {
        let body = format!(
            "<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>",
            para("python"),
            para("kubernetes")
        );
        let text = extract_docx_text(&build_docx(&body)).unwrap();
        assert_eq!(text, "python\nkubernetes");
    }

    #[test]
    fn test_non_zip_bytes_fail() {
        let err = extract_docx_text(b"this is not a zip").unwrap_err();
        assert!(matches!(err, ExtractionError::Docx(_)));
    }

    #[test]
    fn test_zip_without_document_part_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("hello.txt", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(err.to_string().contains(DOCUMENT_PART));
    }
}
