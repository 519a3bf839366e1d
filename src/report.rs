//! Hierarchical plain-text rendering of an assembled tour
//!
//! Pure formatting: one explicit function per entity, no decisions beyond
//! layout. The printer also collects every page body so the run can write
//! the body-summary file after the report.

use crate::error::{Error, Result};
use crate::types::{Media, Note, Page, Section, Tour};
use std::io::Write;
use std::path::Path;

/// Divider between pages in the report and between bodies in the summary
pub const SEPARATOR: &str = "-------------------------";

/// Renders a [`Tour`] to a writer and accumulates page bodies
pub struct Printer {
    bodies: Vec<String>,
    pages_so_far: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// Create an empty printer
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            pages_so_far: 0,
        }
    }

    /// Render the whole tour
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the writer fails.
    pub fn print_tour<W: Write>(&mut self, out: &mut W, tour: &Tour) -> Result<()> {
        line(out, 0, &format!("CONTENT FOR TOUR ID {}", tour.id))?;
        line(out, 0, &format!("MODULE TITLE: {}", tour.module_title))?;
        line(out, 0, &format!("TOUR TITLE: {}", tour.title))?;
        for (index, section) in tour.sections.iter().enumerate() {
            self.print_section(out, section, index + 1)?;
        }
        Ok(())
    }

    /// Write the body-summary file: every collected page body joined by the
    /// separator line
    ///
    /// # Errors
    ///
    /// Writing a summary for a tour with zero pages is a bad-arguments
    /// error, not an empty file.
    pub fn write_summary(&self, path: &Path) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(Error::BadArguments(
                "no page bodies to summarize".to_string(),
            ));
        }
        let divider = format!("\n{SEPARATOR}\n");
        let joined = self
            .bodies
            .iter()
            .map(|body| normalize(body))
            .collect::<Vec<_>>()
            .join(&divider);
        std::fs::write(path, joined)?;
        Ok(())
    }

    fn print_section<W: Write>(&mut self, out: &mut W, section: &Section, number: usize) -> Result<()> {
        line(out, 0, &format!("Section #{number}, title: {}", section.title))?;
        line(out, 0, "Pages:")?;
        for (index, page) in section.pages.iter().enumerate() {
            self.pages_so_far += 1;
            line(
                out,
                4,
                &format!(
                    "Page #{} (id {}, {} in section):",
                    self.pages_so_far,
                    page.id,
                    index + 1
                ),
            )?;
            self.bodies.push(format!("Page {}: {}", page.id, page.body));
            print_page(out, page)?;
        }
        Ok(())
    }
}

fn print_page<W: Write>(out: &mut W, page: &Page) -> Result<()> {
    line(out, 8, "Body:")?;
    line(out, 10, &page.body)?;
    line(out, 8, "Questions:")?;
    for question in &page.questions {
        line(out, 10, question)?;
    }
    line(out, 8, "Dictionary words:")?;
    for word in &page.vocabulary {
        line(out, 10, word)?;
    }
    print_media(out, &page.media)?;
    print_notes(out, &page.notes)?;
    line(out, 0, SEPARATOR)?;
    Ok(())
}

fn print_media<W: Write>(out: &mut W, media: &[Media]) -> Result<()> {
    line(out, 8, "Media:")?;
    for (index, item) in media.iter().enumerate() {
        line(out, 12, &format!("Element #{}", index + 1))?;
        line(out, 14, &format!("Media type: {}", item.kind))?;
        line(out, 14, &format!("Remote path: {}", item.remote_path))?;
        line(
            out,
            14,
            &format!("Archive path: {}", display_opt(&item.archive_path)),
        )?;
        line(
            out,
            14,
            &format!(
                "Local path: {}",
                item.local_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(none)".to_string())
            ),
        )?;
        line(out, 14, &format!("Title: {}", display_opt(&item.title)))?;
        line(out, 14, &format!("Caption: {}", display_opt(&item.caption)))?;
    }
    Ok(())
}

fn print_notes<W: Write>(out: &mut W, notes: &[Note]) -> Result<()> {
    line(out, 8, "Notes:")?;
    for note in notes {
        line(out, 12, &format!("Text: {}", note.text))?;
        line(out, 12, &format!("Date: {}", note.timestamp))?;
        line(
            out,
            12,
            &format!(
                "Submitted by: {} {}",
                note.first_name.as_deref().unwrap_or_default(),
                note.last_name.as_deref().unwrap_or_default()
            ),
        )?;
    }
    Ok(())
}

/// One indented line, normalized
fn line<W: Write>(out: &mut W, indent: usize, text: &str) -> Result<()> {
    writeln!(out, "{:indent$}{}", "", normalize(text))?;
    Ok(())
}

/// Source-data cleanup: vertical bars stand in for apostrophes upstream
fn normalize(text: &str) -> String {
    text.replace('|', "'")
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(none)")
}
