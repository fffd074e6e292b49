//! Sound asset access
//!
//! The registry never reads files itself; it goes through an [`AssetStore`]
//! supplied by the host application. A store maps the file name recorded in
//! the manifest to the encoded audio bytes.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::AssetError;

/// Encoded audio bytes for one sound resource.
///
/// Cheap to clone; the underlying buffer is shared between the clip and any
/// live device session decoding from it.
#[derive(Clone)]
pub struct SoundData(Arc<Vec<u8>>);

impl SoundData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SoundData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SoundData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SoundData").field(&self.len()).finish()
    }
}

/// Resource-opening capability supplied by the host environment.
///
/// Failure to open is a normal, expected condition; the clip treats it as a
/// setup failure, not something worth crashing over.
pub trait AssetStore: Send + Sync {
    /// Open the encoded bytes for one sound file.
    fn open(&self, file: &str) -> Result<SoundData, AssetError>;
}

/// Asset store backed by a directory on disk.
pub struct DirAssetStore {
    base: PathBuf,
}

impl DirAssetStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl AssetStore for DirAssetStore {
    fn open(&self, file: &str) -> Result<SoundData, AssetError> {
        let path = self.base.join(file);

        if !path.exists() {
            return Err(AssetError::NotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = std::fs::read(&path).map_err(|source| AssetError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!("Loaded sound asset {} ({} bytes)", path.display(), bytes.len());
        Ok(SoundData::new(bytes))
    }
}

/// Asset store holding preloaded sound data in memory.
///
/// Useful for sounds embedded with `include_bytes!` and for tests.
#[derive(Default)]
pub struct MemoryAssetStore {
    entries: HashMap<String, SoundData>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(file.into(), SoundData::new(bytes));
    }
}

impl AssetStore for MemoryAssetStore {
    fn open(&self, file: &str) -> Result<SoundData, AssetError> {
        self.entries
            .get(file)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                path: file.to_string(),
            })
    }
}
