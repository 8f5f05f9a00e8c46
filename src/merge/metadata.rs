//! PDF metadata management.
//!
//! This module handles the document Info dictionary: title, author,
//! subject and keywords chosen by the user, plus the producer and
//! modification date stamped on every merged output.

use chrono::{DateTime, Local, Offset, TimeZone};
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::config::Metadata;
use crate::error::{PdfToolsError, Result};
use crate::utils::{decode_pdf_text_string, pdf_text_string};

/// Name written into the Producer field.
pub const PRODUCER: &str = "pdftools";

/// Manager for PDF metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataManager;

impl MetadataManager {
    pub fn new() -> Self {
        Self
    }

    /// Set metadata on a document.
    ///
    /// Only non-empty fields are written; existing values for other fields
    /// are kept.
    pub fn set_metadata(&self, doc: &mut Document, metadata: &Metadata) -> Result<()> {
        if metadata.is_empty() {
            return Ok(());
        }

        let info = self.info_dictionary_mut(doc)?;

        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                info.set(key, pdf_text_string(value));
            }
        }

        Ok(())
    }

    /// Record pdftools as producer and stamp the modification date.
    pub fn stamp_producer(&self, doc: &mut Document) -> Result<()> {
        let now = format_pdf_date(&Local::now());
        let info = self.info_dictionary_mut(doc)?;

        info.set("Producer", pdf_text_string(PRODUCER));
        if !info.has(b"CreationDate") {
            info.set("CreationDate", pdf_text_string(&now));
        }
        info.set("ModDate", pdf_text_string(&now));

        Ok(())
    }

    /// Read title, author, subject and keywords from the Info dictionary.
    pub fn get_metadata(&self, doc: &Document) -> Metadata {
        let Some(info) = info_id(doc).and_then(|id| doc.get_dictionary(id).ok()) else {
            return Metadata::default();
        };

        let field = |key: &[u8]| {
            info.get(key)
                .and_then(Object::as_str)
                .ok()
                .and_then(decode_pdf_text_string)
        };

        Metadata::new(
            field(b"Title"),
            field(b"Author"),
            field(b"Subject"),
            field(b"Keywords"),
        )
    }

    fn info_dictionary_mut<'a>(&self, doc: &'a mut Document) -> Result<&'a mut Dictionary> {
        let id = match info_id(doc) {
            Some(id) if doc.get_dictionary(id).is_ok() => id,
            _ => {
                let id = doc.add_object(Dictionary::new());
                doc.trailer.set("Info", Object::Reference(id));
                id
            }
        };

        doc.get_dictionary_mut(id)
            .map_err(|e| PdfToolsError::MetadataFailed {
                reason: format!("Info dictionary unavailable: {e}"),
            })
    }
}

fn info_id(doc: &Document) -> Option<ObjectId> {
    doc.trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok()
}

/// Format a timestamp as a PDF date string: `D:YYYYMMDDHHmmSS+HH'mm'`.
pub fn format_pdf_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    let offset_minutes = time.offset().fix().local_minus_utc() / 60;
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let offset_minutes = offset_minutes.abs();

    format!(
        "D:{}{}{:02}'{:02}'",
        time.naive_local().format("%Y%m%d%H%M%S"),
        sign,
        offset_minutes / 60,
        offset_minutes % 60
    )
}
