//! Stream compression for loaded documents.

use log::debug;
use lopdf::{Document, Object};
use serde::Serialize;

use crate::config::CompressionLevel;

/// What a compression pass changed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStatistics {
    /// Level that was applied.
    pub level: CompressionLevel,

    /// Object count before the pass.
    pub objects_before: usize,

    /// Object count after the pass.
    pub objects_after: usize,

    /// Streams that gained a Flate filter.
    pub streams_compressed: usize,

    /// Unreachable objects removed (maximum level only).
    pub objects_pruned: usize,
}

impl CompressionStatistics {
    /// Whether the pass touched the document at all.
    pub fn applied(&self) -> bool {
        self.level != CompressionLevel::None
    }
}

/// Applies a [`CompressionLevel`] to a document in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compressor;

impl Compressor {
    pub fn new() -> Self {
        Self
    }

    /// Compress `doc` according to `level`.
    ///
    /// `Standard` Flate-compresses every stream that has no filter yet.
    /// `Maximum` first drops objects unreachable from the trailer, then
    /// compresses, then renumbers the remaining objects densely.
    ///
    /// Must not be called on a document that has already been encrypted.
    pub fn apply(&self, doc: &mut Document, level: CompressionLevel) -> CompressionStatistics {
        let objects_before = doc.objects.len();

        let objects_pruned = if level == CompressionLevel::Maximum {
            doc.prune_objects().len()
        } else {
            0
        };

        let unfiltered_before = count_unfiltered_streams(doc);
        if level != CompressionLevel::None {
            doc.compress();
        }
        if level == CompressionLevel::Maximum {
            doc.renumber_objects();
        }

        let stats = CompressionStatistics {
            level,
            objects_before,
            objects_after: doc.objects.len(),
            streams_compressed: unfiltered_before.saturating_sub(count_unfiltered_streams(doc)),
            objects_pruned,
        };

        debug!(
            "Compression ({level}): {} -> {} objects, {} stream(s) compressed, {} pruned",
            stats.objects_before, stats.objects_after, stats.streams_compressed, stats.objects_pruned
        );

        stats
    }
}

/// Number of streams stored without any filter.
pub fn count_unfiltered_streams(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter(|object| matches!(object, Object::Stream(stream) if !stream.dict.has(b"Filter")))
        .count()
}
