//! Password removal.

use log::debug;
use lopdf::{Document, Object};
use std::path::Path;

use crate::error::{PdfToolsError, Result};

/// Strips the security handler from encrypted documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decryptor;

impl Decryptor {
    pub fn new() -> Self {
        Self
    }

    /// Decrypt `doc` in place so it saves as a plain PDF.
    ///
    /// `path` is only used in error messages. A document whose user
    /// password is empty is already readable after loading and is
    /// unlocked regardless of `password`.
    ///
    /// # Errors
    ///
    /// - [`PdfToolsError::NotEncrypted`] if the document has no security handler
    /// - [`PdfToolsError::IncorrectPassword`] if `password` does not open it
    /// - [`PdfToolsError::CorruptedPdf`] if the unlocked document has no pages
    pub fn decrypt_document(&self, doc: &mut Document, password: &str, path: &Path) -> Result<()> {
        let encrypt_dict_id = doc
            .trailer
            .get(b"Encrypt")
            .and_then(Object::as_reference)
            .ok();

        if doc.encryption_state.is_none() {
            if !doc.is_encrypted() {
                return Err(PdfToolsError::not_encrypted(path.to_path_buf()));
            }

            doc.decrypt(password).map_err(|e| {
                debug!("Decryption of {} rejected: {e}", path.display());
                PdfToolsError::incorrect_password(path.to_path_buf())
            })?;
        }

        if let Some(id) = encrypt_dict_id {
            doc.objects.remove(&id);
        }
        doc.trailer.remove(b"Encrypt");
        doc.encryption_state = None;

        if doc.catalog().is_err() || doc.get_pages().is_empty() {
            return Err(PdfToolsError::corrupted_pdf(
                path.to_path_buf(),
                "no pages could be read after decryption",
            ));
        }

        debug!("Removed security handler from {}", path.display());
        Ok(())
    }
}
