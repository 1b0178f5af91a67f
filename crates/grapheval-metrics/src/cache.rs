//! Ontology extraction cache.
//!
//! Auto-extracting namespaces and evaluable predicates from a large ontology
//! is the only repeatable cost in configuration completion, so the result can
//! be cached. The cache is an injected abstraction rather than a fixed
//! filesystem location; keys combine a content digest with the file's
//! modification time so edits invalidate stale entries. A corrupted entry is
//! never an error: it is discarded and the extraction recomputed.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// The cacheable result of ontology inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSchema {
    pub namespaces: BTreeMap<String, String>,
    pub predicates_by_namespace: BTreeMap<String, Vec<String>>,
}

/// Cache key: SHA-256 of the ontology bytes plus the file mtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive a key from an ontology file. Returns `None` when the file
    /// cannot be read; callers then simply skip the cache.
    pub fn from_path(path: &Path) -> Option<CacheKey> {
        let bytes = std::fs::read(path).ok()?;
        let mtime = std::fs::metadata(path)
            .ok()?
            .modified()
            .ok()?
            .duration_since(UNIX_EPOCH)
            .ok()?
            .as_secs();

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hasher.update(mtime.to_le_bytes());
        Some(CacheKey(format!("{:x}", hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Storage for extraction results, injected into configuration completion.
pub trait ExtractionCache {
    fn load(&self, key: &CacheKey) -> Option<ExtractedSchema>;
    fn store(&self, key: &CacheKey, schema: &ExtractedSchema);
}

/// Filesystem-backed cache: one JSON file per key under an explicit
/// directory.
#[derive(Debug, Clone)]
pub struct FsExtractionCache {
    dir: PathBuf,
}

impl FsExtractionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsExtractionCache { dir: dir.into() }
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl ExtractionCache for FsExtractionCache {
    fn load(&self, key: &CacheKey) -> Option<ExtractedSchema> {
        let path = self.entry_path(key);
        let data = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&data) {
            Ok(schema) => Some(schema),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "discarding corrupted extraction cache entry"
                );
                None
            }
        }
    }

    fn store(&self, key: &CacheKey, schema: &ExtractedSchema) {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!(error = %err, "could not create extraction cache directory");
            return;
        }
        let path = self.entry_path(key);
        match serde_json::to_string_pretty(schema) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&path, json) {
                    tracing::warn!(path = %path.display(), error = %err, "cache write failed");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "cache serialization failed");
            }
        }
    }
}
