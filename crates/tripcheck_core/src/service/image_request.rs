//! Latest-request-wins guard for image fetches.
//!
//! Each fetch is tagged with a token bound to `(item_id, image_version)`.
//! A result may be applied only while its token is still the newest one for
//! the state the view currently wants; `cancel` retires every token.

use crate::model::item::ItemId;

/// Tag for one in-flight image fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRequestToken {
    sequence: u64,
    item_id: ItemId,
    image_version: Option<u32>,
}

impl ImageRequestToken {
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn image_version(&self) -> Option<u32> {
        self.image_version
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageRequestGuard {
    sequence: u64,
    desired: Option<(ItemId, Option<u32>)>,
}

impl ImageRequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch for the given identity, superseding older tokens.
    pub fn begin(&mut self, item_id: ItemId, image_version: Option<u32>) -> ImageRequestToken {
        self.sequence += 1;
        self.desired = Some((item_id, image_version));
        ImageRequestToken {
            sequence: self.sequence,
            item_id,
            image_version,
        }
    }

    pub fn is_current(&self, token: &ImageRequestToken) -> bool {
        token.sequence == self.sequence
            && self.desired == Some((token.item_id, token.image_version))
    }

    /// Passes `value` through only when `token` is still current.
    pub fn resolve<T>(&self, token: &ImageRequestToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }

    /// Invalidates every outstanding token (the consumer went away).
    pub fn cancel(&mut self) {
        self.sequence += 1;
        self.desired = None;
    }
}
