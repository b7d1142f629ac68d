use std::collections::HashMap;

use crate::assets::normalize::Placement;
use crate::assets::sniff::ImageKind;
use crate::foundation::error::{BoardError, BoardResult};

/// One placed sticker as the engine sees it: a blob reference plus placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ItemDescriptor {
    /// Content hash naming the original upload blob.
    pub hash: String,
    /// Container format recorded at upload time.
    pub kind: ImageKind,
    /// Horizontal offset from the left edge.
    pub offset_x: i32,
    /// Vertical offset from the bottom edge.
    pub offset_y: i32,
    /// Uniform scale factor.
    pub scale: f64,
    /// Moderation outcome; hidden items never reach a snapshot.
    pub visible: bool,
}

impl ItemDescriptor {
    /// Placement parameters for the sprite normalizer.
    pub fn placement(&self) -> Placement {
        Placement {
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            scale: self.scale,
        }
    }
}

/// Supplies the board's items and their original bytes.
///
/// Implementations must return a consistent snapshot: the order of `snapshot` is the z-order,
/// first item drawn first.
pub trait ItemSource: Sync {
    /// Visible items, in stored order.
    fn snapshot(&self) -> BoardResult<Vec<ItemDescriptor>>;
    /// Original upload bytes for `hash`.
    fn read_blob(&self, hash: &str) -> BoardResult<Vec<u8>>;
}

/// In-memory item source for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryItemSource {
    items: Vec<ItemDescriptor>,
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryItemSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item backed by `bytes`.
    pub fn push(&mut self, item: ItemDescriptor, bytes: Vec<u8>) {
        self.blobs.insert(item.hash.clone(), bytes);
        self.items.push(item);
    }

    /// Builder form of [`MemoryItemSource::push`].
    pub fn with_item(mut self, item: ItemDescriptor, bytes: Vec<u8>) -> Self {
        self.push(item, bytes);
        self
    }
}

impl ItemSource for MemoryItemSource {
    fn snapshot(&self) -> BoardResult<Vec<ItemDescriptor>> {
        Ok(self.items.iter().filter(|i| i.visible).cloned().collect())
    }

    fn read_blob(&self, hash: &str) -> BoardResult<Vec<u8>> {
        self.blobs
            .get(hash)
            .cloned()
            .ok_or_else(|| BoardError::decode(format!("no blob stored for '{hash}'")))
    }
}
