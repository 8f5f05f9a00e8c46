//! Password protection with the standard security handler.

use log::debug;
use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};

use crate::config::KeyLength;
use crate::error::{PdfToolsError, Result};

/// First PDF version that allows RC4 keys longer than 40 bits.
const MIN_VERSION_FOR_LONG_KEYS: &str = "1.4";

/// Encrypts documents with an RC4 (`V2`) security handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encryptor;

impl Encryptor {
    pub fn new() -> Self {
        Self
    }

    /// Encrypt `doc` in place.
    ///
    /// All permissions are granted to holders of the user password. The
    /// document must not be compressed or renumbered afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`PdfToolsError::EncryptionFailed`] if lopdf rejects the
    /// security handler or fails to encrypt an object.
    pub fn encrypt_document(
        &self,
        doc: &mut Document,
        user_password: &str,
        owner_password: &str,
        key_length: KeyLength,
    ) -> Result<()> {
        ensure_document_id(doc);

        if key_length == KeyLength::Bits128 && doc.version.as_str() < MIN_VERSION_FOR_LONG_KEYS {
            doc.version = MIN_VERSION_FOR_LONG_KEYS.to_string();
        }

        let version = EncryptionVersion::V2 {
            document: &*doc,
            owner_password,
            user_password,
            key_length: key_length.bits(),
            permissions: Permissions::all(),
        };

        let state = EncryptionState::try_from(version).map_err(|e| {
            PdfToolsError::encryption_failed(format!("Cannot build security handler: {e}"))
        })?;

        doc.encrypt(&state)
            .map_err(|e| PdfToolsError::encryption_failed(e.to_string()))?;

        debug!("Encrypted document with a {}-bit key", key_length.bits());
        Ok(())
    }
}

/// Give the trailer a file identifier if it has none.
///
/// The identifier feeds the encryption key, so it is required before
/// encrypting.
pub fn ensure_document_id(doc: &mut Document) {
    let has_id = doc
        .trailer
        .get(b"ID")
        .and_then(Object::as_array)
        .map(|id| !id.is_empty())
        .unwrap_or(false);

    if has_id {
        return;
    }

    let id: [u8; 16] = rand::random();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.to_vec(), StringFormat::Hexadecimal),
            Object::String(id.to_vec(), StringFormat::Hexadecimal),
        ]),
    );
}
