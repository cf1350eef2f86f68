//! Cart aggregator: the single writer of cart state
//!
//! Every mutation leaves the cart consistent (no duplicate keys, extended
//! price = unit price x quantity) and writes the full state to storage.
//! Failed operations leave the cart exactly as it was.

use super::item::{CartEntry, ConfiguredItem};
use super::key::CanonicalKey;
use super::state::{CartState, CartSummary};
use crate::config::EngineConfig;
use crate::error::{OrderError, Result};
use crate::menu::{validate, Catalog, MenuItem, SelectedOption};
use crate::reconcile::PersistedOrderItem;
use crate::storage::CartStorage;
use tracing::{debug, warn};

/// Cart aggregator over a storage backend
pub struct Cart<S: CartStorage> {
    state: CartState,
    storage: S,
    config: EngineConfig,
    /// Bumped on every mutation; not persisted
    revision: u64,
}

impl<S: CartStorage> Cart<S> {
    /// Empty cart. Storage is not read.
    pub fn new(storage: S, config: EngineConfig) -> Self {
        Self {
            state: CartState::new(),
            storage,
            config,
            revision: 0,
        }
    }

    /// Restore the snapshot saved under the configured key.
    ///
    /// A missing snapshot gives an empty cart. A corrupt one (unparseable,
    /// or violating cart invariants) is discarded and also gives an empty
    /// cart; restoring never fails.
    pub fn restore(storage: S, config: EngineConfig) -> Self {
        let mut cart = Self::new(storage, config);

        match cart.read_snapshot() {
            Ok(Some(state)) => {
                debug!(entries = state.len(), "restored cart snapshot");
                cart.state = state;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, key = %cart.config.storage_key, "discarding corrupt cart snapshot");
                if let Err(err) = cart.storage.remove(&cart.config.storage_key) {
                    warn!(error = %err, "failed to erase corrupt cart snapshot");
                }
            }
        }

        cart
    }

    fn read_snapshot(&self) -> Result<Option<CartState>> {
        let bytes = match self.storage.get(&self.config.storage_key)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let state: CartState = serde_json::from_slice(&bytes)?;
        if !state.is_consistent() {
            return Err(OrderError::Serialization(
                "cart snapshot violates cart invariants".to_string(),
            ));
        }
        Ok(Some(state))
    }

    fn check_quantity(&self, quantity: i64) -> Result<u32> {
        if quantity < 1 || quantity > i64::from(self.config.max_line_quantity) {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        Ok(quantity as u32)
    }

    /// Add a configured item, merging into an existing line with the same
    /// canonical key.
    ///
    /// Returns the line's key. A merge keeps the existing note unless it is
    /// empty and `note` is not.
    pub fn add_item(
        &mut self,
        menu_item: &MenuItem,
        selections: &[SelectedOption],
        quantity: i64,
        note: Option<String>,
    ) -> Result<CanonicalKey> {
        let quantity = self.check_quantity(quantity)?;
        validate(&menu_item.option_groups, selections)?.into_result()?;

        let mut item = ConfiguredItem::new(menu_item.id, selections, quantity);
        item.note = note.filter(|n| !n.trim().is_empty());
        let key = item.key();

        match self.state.position(&key) {
            Some(index) => {
                let merged = i64::from(self.state.entries[index].quantity()) + i64::from(quantity);
                let merged = self.check_quantity(merged)?;

                let entry = &mut self.state.entries[index];
                entry.set_quantity(merged);
                if entry.item.note.is_none() {
                    entry.item.note = item.note;
                }
                debug!(%key, quantity = merged, "merged cart line");
            }
            None => {
                debug!(%key, quantity, "new cart line");
                self.state.entries.push(CartEntry::priced(menu_item, item));
            }
        }

        self.touch();
        Ok(key)
    }

    /// Set a line's quantity; zero or below removes the line
    pub fn update_quantity(&mut self, key: &CanonicalKey, new_quantity: i64) -> Result<()> {
        let index = self
            .state
            .position(key)
            .ok_or_else(|| OrderError::NotFound { key: key.clone() })?;

        if new_quantity <= 0 {
            self.state.entries.remove(index);
        } else {
            let quantity = self.check_quantity(new_quantity)?;
            self.state.entries[index].set_quantity(quantity);
        }

        self.touch();
        Ok(())
    }

    /// Remove a line. An absent key is [`OrderError::NotFound`].
    pub fn remove_item(&mut self, key: &CanonicalKey) -> Result<CartEntry> {
        let index = self
            .state
            .position(key)
            .ok_or_else(|| OrderError::NotFound { key: key.clone() })?;

        let removed = self.state.entries.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Empty the cart and erase the durable snapshot
    pub fn clear(&mut self) {
        self.state.entries.clear();
        self.revision += 1;
        if let Err(err) = self.storage.remove(&self.config.storage_key) {
            warn!(error = %err, "failed to erase cart snapshot");
        }
    }

    /// Replace the cart with the lines of a persisted order, for editing
    /// an order that was already submitted.
    ///
    /// Base prices come from `catalog`, option deltas from the persisted
    /// assignments. Persisted rows with the same configuration are merged.
    pub fn load_persisted(&mut self, catalog: &Catalog, persisted: &[PersistedOrderItem]) -> Result<()> {
        let mut state = CartState::new();

        for row in persisted {
            let menu_item = catalog.require(row.menu_item_id)?;
            let selections = row.selections();
            // Server state is the truth; only a stale schema aborts
            validate(&menu_item.option_groups, &selections)?;

            if row.quantity == 0 {
                continue;
            }

            let item = ConfiguredItem::new(row.menu_item_id, &selections, row.quantity);
            match state.position(&item.key()) {
                Some(index) => {
                    let entry = &mut state.entries[index];
                    let merged = i64::from(entry.quantity()) + i64::from(row.quantity);
                    let merged = self.check_quantity(merged)?;
                    entry.set_quantity(merged);
                }
                None => {
                    self.check_quantity(i64::from(row.quantity))?;
                    state.entries.push(CartEntry::priced(menu_item, item));
                }
            }
        }

        self.state = state;
        self.touch();
        Ok(())
    }

    /// Success path of a submission: drop the lines the server now holds
    /// exactly as submitted.
    ///
    /// A line added or edited while the request was in flight stays at its
    /// current quantity, so the next cycle sends the diner's latest value.
    pub(crate) fn settle_submitted(&mut self, snapshot: &CartState, snapshot_revision: u64) {
        if self.revision == snapshot_revision {
            self.clear();
            return;
        }

        for submitted in &snapshot.entries {
            let key = submitted.key();
            if let Some(index) = self.state.position(&key) {
                if self.state.entries[index].quantity() == submitted.quantity() {
                    self.state.entries.remove(index);
                }
            }
        }

        debug!(remaining = self.state.len(), "kept lines changed during submission");
        if self.state.is_empty() {
            self.clear();
        } else {
            self.touch();
        }
    }

    pub fn summary(&self) -> CartSummary {
        self.state.summary()
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.state.entries
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&CartEntry> {
        self.state.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.persist();
    }

    /// Write-through; a failed write is logged and otherwise ignored
    fn persist(&mut self) {
        let payload = match serde_json::to_vec(&self.state) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to encode cart snapshot");
                return;
            }
        };

        if let Err(err) = self.storage.set(&self.config.storage_key, &payload) {
            warn!(error = %err, "failed to persist cart snapshot");
        }
    }
}
