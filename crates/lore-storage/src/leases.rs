//! Per-id write leases: at most one writer per entity id at a time.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use lore_core::errors::{LoreError, LoreResult};

/// Registry of ids currently being written, validated or synthesized.
#[derive(Debug, Default)]
pub struct WriteLeases {
    held: DashMap<String, ()>,
}

impl WriteLeases {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Take the lease for `id`, failing fast with `WriteConflict` if held.
    pub fn acquire(self: &Arc<Self>, id: &str) -> LoreResult<WriteLease> {
        match self.held.entry(id.to_string()) {
            Entry::Occupied(_) => {
                debug!(id, "write lease already held");
                Err(LoreError::WriteConflict { id: id.to_string() })
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(WriteLease {
                    registry: Arc::clone(self),
                    id: id.to_string(),
                })
            }
        }
    }

    pub fn is_held(&self, id: &str) -> bool {
        self.held.contains_key(id)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}

/// Exclusive right to write one id. Released on drop.
#[derive(Debug)]
pub struct WriteLease {
    registry: Arc<WriteLeases>,
    id: String,
}

impl WriteLease {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn belongs_to(&self, registry: &Arc<WriteLeases>) -> bool {
        Arc::ptr_eq(&self.registry, registry)
    }
}

impl Drop for WriteLease {
    fn drop(&mut self) {
        self.registry.held.remove(&self.id);
    }
}
