//! Rendering of contacts for terminal output.

use std::fmt::Write as _;

use crate::cli::OutputFormat;
use crate::contact::Contact;
use crate::error::Result;

const TABLE_HEADERS: [&str; 4] = ["NAME", "PHONE", "EMAIL", "TAGS"];

/// Render a list of contacts in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_contacts(contacts: &[&Contact], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(contacts)),
        OutputFormat::Table => Ok(render_table(contacts)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(contacts)?),
    }
}

/// Render a single contact in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_contact(contact: &Contact, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(contact)?),
        _ => render_contacts(&[contact], format),
    }
}

fn render_plain(contacts: &[&Contact]) -> String {
    let mut out = String::new();
    for (idx, contact) in contacts.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", contact.name);
        let _ = writeln!(out, "  Phone: {}", contact.phone);
        let _ = writeln!(out, "  Email: {}", contact.email);
        let _ = writeln!(out, "  Tags:  {}", contact.tags.join(", "));
    }
    out
}

fn render_table(contacts: &[&Contact]) -> String {
    let rows: Vec<[String; 4]> = contacts
        .iter()
        .map(|c| {
            [
                c.name.clone(),
                c.phone.clone(),
                c.email.clone(),
                c.tags.join(", "),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (idx, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell.as_ref());
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
