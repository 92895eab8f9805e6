//! Checklist use-case service (the item store).
//!
//! # Responsibility
//! - Own the ordered item collection for one session.
//! - Persist the whole collection through `KeyValueStore` after every change.
//! - Keep the image store consistent with the collection on delete, clear,
//!   reset and import.
//!
//! # Invariants
//! - A mutation is only visible after its persistence write succeeded.
//! - Item ids stay unique; fresh ids come from a seeded `IdAllocator`.
//! - Clear, reset and import empty the image store so no blob is orphaned.

use crate::defaults::default_items;
use crate::model::id_alloc::IdAllocator;
use crate::model::item::{image_key, ChecklistItem, FieldUpdate, ItemId, ScoreField};
use crate::model::score::ScoreInput;
use crate::repo::image_repo::{ImageBlob, ImageStore};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::{RepoError, RepoResult};
use crate::service::score_draft::ScoreDraft;
use crate::transfer::export::{export_document, ExportDocument};
use crate::transfer::import::{parse_import, ImportError};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Key under which the serialized collection is stored.
pub const STORAGE_KEY: &str = "travel-checklist";

/// Progress counters for the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistSummary {
    pub total: usize,
    pub checked: usize,
}

/// Item store over injected persistence collaborators.
pub struct ChecklistService<K: KeyValueStore, I: ImageStore> {
    kv: K,
    images: I,
    items: Vec<ChecklistItem>,
    ids: IdAllocator,
}

impl<K: KeyValueStore, I: ImageStore> ChecklistService<K, I> {
    /// Loads the persisted collection, falling back to the bundled defaults
    /// when nothing (or only whitespace) is stored.
    ///
    /// # Errors
    /// - Returns `RepoError::InvalidData` when the stored value does not
    ///   decode as an item array.
    pub fn open(kv: K, images: I) -> RepoResult<Self> {
        let mut ids = IdAllocator::new();
        let stored = kv.get(STORAGE_KEY)?;
        let items = match stored.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                serde_json::from_str::<Vec<ChecklistItem>>(text).map_err(|err| {
                    RepoError::InvalidData(format!("stored checklist under `{STORAGE_KEY}`: {err}"))
                })?
            }
            _ => {
                info!("event=checklist_open module=service status=seeded reason=empty_storage");
                load_defaults(&mut ids)?
            }
        };

        for item in &items {
            ids.observe(item.id);
        }
        info!(
            "event=checklist_open module=service status=ok item_count={}",
            items.len()
        );

        Ok(Self {
            kv,
            images,
            items,
            ids,
        })
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn summary(&self) -> ChecklistSummary {
        ChecklistSummary {
            total: self.items.len(),
            checked: self.items.iter().filter(|item| item.checked).count(),
        }
    }

    /// Appends a new unchecked item.
    ///
    /// Returns `Ok(None)` without touching storage when `label` is blank.
    pub fn add(&mut self, label: impl Into<String>) -> RepoResult<Option<ItemId>> {
        let label = label.into();
        if label.trim().is_empty() {
            debug!("event=item_add module=service status=skipped reason=blank_label");
            return Ok(None);
        }

        let id = self.ids.next_id();
        let mut next = self.items.clone();
        next.push(ChecklistItem::new(id, label));
        self.commit(next)?;

        info!("event=item_add module=service status=ok item_id={id}");
        Ok(Some(id))
    }

    /// Flips `checked`; returns whether the item existed.
    pub fn toggle(&mut self, id: ItemId) -> RepoResult<bool> {
        self.modify(id, "toggle", |item| item.checked = !item.checked)
    }

    /// Applies one field edit; returns whether the item existed.
    pub fn update_field(&mut self, id: ItemId, update: FieldUpdate) -> RepoResult<bool> {
        let field = update.field_name();
        let changed = self.modify(id, "update_field", move |item| update.apply_to(item))?;
        if changed {
            debug!("event=item_update module=service status=ok item_id={id} field={field}");
        }
        Ok(changed)
    }

    /// Commits a buffered score edit into the item.
    pub fn commit_score_draft(
        &mut self,
        id: ItemId,
        field: ScoreField,
        draft: &mut ScoreDraft,
    ) -> RepoResult<bool> {
        let score = draft.commit();
        self.update_field(
            id,
            FieldUpdate::Score(field, ScoreInput::Number(score.value())),
        )
    }

    /// Removes an item and, best effort, its image.
    ///
    /// An image store failure is logged and does not keep the item alive.
    pub fn delete(&mut self, id: ItemId) -> RepoResult<bool> {
        let Some(position) = self.position(id) else {
            debug!("event=item_delete module=service status=skipped reason=not_found item_id={id}");
            return Ok(false);
        };

        if let Err(err) = self.images.delete(&image_key(id)) {
            warn!("event=image_delete module=service status=error item_id={id} error={err}");
        }

        let mut next = self.items.clone();
        next.remove(position);
        self.commit(next)?;

        info!("event=item_delete module=service status=ok item_id={id}");
        Ok(true)
    }

    /// Empties the collection and the image store.
    pub fn clear(&mut self) -> RepoResult<()> {
        self.images.clear_all()?;
        self.commit(Vec::new())?;
        info!("event=checklist_clear module=service status=ok");
        Ok(())
    }

    /// Replaces the collection with the bundled defaults.
    ///
    /// Every resulting item gets an image version newer than any version the
    /// same id carried before, so image views refetch.
    pub fn reset(&mut self) -> RepoResult<()> {
        let previous: HashMap<ItemId, u32> = self
            .items
            .iter()
            .filter_map(|item| item.image_version.map(|version| (item.id, version)))
            .collect();

        let mut next = load_defaults(&mut self.ids)?;
        for item in &mut next {
            if let Some(version) = previous.get(&item.id) {
                let bumped = version.saturating_add(1);
                item.image_version = Some(item.image_version.unwrap_or(0).max(bumped));
            }
        }

        self.images.clear_all()?;
        self.commit(next)?;
        info!(
            "event=checklist_reset module=service status=ok item_count={}",
            self.items.len()
        );
        Ok(())
    }

    /// Replaces the collection with an imported document.
    ///
    /// Parsing and image decoding finish before any store is touched, so a
    /// payload that fails to parse or decode leaves both the collection and
    /// the images unchanged. A storage failure while restoring images can
    /// leave the image store partly restored; the collection is only
    /// replaced once every image has been saved.
    /// Returns the number of imported items.
    pub fn import_json(&mut self, text: &str) -> Result<usize, ImportError> {
        let bundle = match parse_import(text, &mut self.ids) {
            Ok(bundle) => bundle,
            Err(err) => {
                warn!("event=checklist_import module=service status=error error={err}");
                return Err(err);
            }
        };

        self.images.clear_all()?;
        for (key, blob) in &bundle.images {
            self.images.save(key, blob)?;
        }

        let count = bundle.items.len();
        self.commit(bundle.items)?;
        info!(
            "event=checklist_import module=service status=ok item_count={count} image_count={}",
            bundle.images.len()
        );
        Ok(count)
    }

    /// Builds the portable export document for the current collection.
    pub fn export(&self) -> RepoResult<ExportDocument> {
        let document = export_document(&self.items, &self.images)?;
        info!(
            "event=checklist_export module=service status=ok item_count={} image_count={}",
            document.items.len(),
            document.images.len()
        );
        Ok(document)
    }

    /// Stores an image for an item and bumps its image version.
    pub fn set_image(&mut self, id: ItemId, blob: &ImageBlob) -> RepoResult<bool> {
        if self.position(id).is_none() {
            return Ok(false);
        }
        self.images.save(&image_key(id), blob)?;
        self.modify(id, "set_image", ChecklistItem::bump_image_version)
    }

    /// Deletes an item's image and bumps its image version.
    pub fn remove_image(&mut self, id: ItemId) -> RepoResult<bool> {
        if self.position(id).is_none() {
            return Ok(false);
        }
        self.images.delete(&image_key(id))?;
        self.modify(id, "remove_image", ChecklistItem::bump_image_version)
    }

    pub fn image(&self, id: ItemId) -> RepoResult<Option<ImageBlob>> {
        self.images.get(&image_key(id))
    }

    pub fn kv_store(&self) -> &K {
        &self.kv
    }

    pub fn image_store(&self) -> &I {
        &self.images
    }

    /// Releases the underlying stores.
    pub fn into_stores(self) -> (K, I) {
        (self.kv, self.images)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn modify(
        &mut self,
        id: ItemId,
        action: &str,
        edit: impl FnOnce(&mut ChecklistItem),
    ) -> RepoResult<bool> {
        let Some(position) = self.position(id) else {
            debug!("event=item_{action} module=service status=skipped reason=not_found item_id={id}");
            return Ok(false);
        };

        let mut next = self.items.clone();
        edit(&mut next[position]);
        self.commit(next)?;
        Ok(true)
    }

    fn commit(&mut self, next: Vec<ChecklistItem>) -> RepoResult<()> {
        let payload = serde_json::to_string(&next)?;
        self.kv.set(STORAGE_KEY, &payload)?;
        self.items = next;
        Ok(())
    }
}

fn load_defaults(ids: &mut IdAllocator) -> RepoResult<Vec<ChecklistItem>> {
    default_items(ids).map_err(|err| RepoError::InvalidData(format!("bundled defaults: {err}")))
}
