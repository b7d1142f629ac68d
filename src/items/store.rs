use std::path::{Path, PathBuf};

use crate::assets::sniff::ImageKind;
use crate::foundation::error::{BoardError, BoardResult};
use crate::items::descriptor::{ItemDescriptor, ItemSource};

/// Name of the sticker database inside the data directory.
pub const DATABASE_FILE: &str = "database.json";

#[derive(Debug, Default, serde::Deserialize)]
struct DatabaseRoot {
    #[serde(default)]
    stickers: Vec<StoredSticker>,
}

// Uploader metadata (name, message, address, created) is not needed to draw the board.
#[derive(Debug, serde::Deserialize)]
struct StoredSticker {
    #[serde(default)]
    visible: bool,
    offset_x: i32,
    offset_y: i32,
    image_scale: f64,
    image_type: ImageKind,
    image_hash: String,
}

impl From<StoredSticker> for ItemDescriptor {
    fn from(s: StoredSticker) -> Self {
        Self {
            hash: s.image_hash,
            kind: s.image_type,
            offset_x: s.offset_x,
            offset_y: s.offset_y,
            scale: s.image_scale,
            visible: s.visible,
        }
    }
}

/// File-backed item source: `<dir>/database.json` plus one blob file per content hash.
#[derive(Clone, Debug)]
pub struct JsonItemStore {
    dir: PathBuf,
}

impl JsonItemStore {
    /// Open a store rooted at `dir`. Nothing is read until [`ItemSource::snapshot`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Data directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, hash: &str) -> BoardResult<PathBuf> {
        let plain = !hash.is_empty()
            && hash
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !plain {
            return Err(BoardError::validation(format!(
                "invalid blob hash '{hash}'"
            )));
        }
        Ok(self.dir.join(hash))
    }
}

impl ItemSource for JsonItemStore {
    fn snapshot(&self) -> BoardResult<Vec<ItemDescriptor>> {
        let path = self.dir.join(DATABASE_FILE);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no sticker database, board is empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(BoardError::decode(format!(
                    "read '{}': {e}",
                    path.display()
                )));
            }
        };

        let root: DatabaseRoot = serde_json::from_slice(&bytes)
            .map_err(|e| BoardError::decode(format!("parse '{}': {e}", path.display())))?;
        Ok(root
            .stickers
            .into_iter()
            .filter(|s| s.visible)
            .map(ItemDescriptor::from)
            .collect())
    }

    fn read_blob(&self, hash: &str) -> BoardResult<Vec<u8>> {
        let path = self.blob_path(hash)?;
        std::fs::read(&path)
            .map_err(|e| BoardError::decode(format!("read blob '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/items/store.rs"]
mod tests;
