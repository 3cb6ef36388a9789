//! Tradable item catalog: internal item id -> links and localized names.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use kupo_core::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::file::{read_json_or_default, write_json_atomic};

/// Item identifier as used in market URLs. Numeric ids sort numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub item_en: String,
    /// Localized display name; the key users search by.
    #[serde(default)]
    pub item_jp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, ItemRecord>,
}

impl ItemCatalog {
    pub async fn load(path: &Path) -> Result<Self> {
        let catalog: Self = read_json_or_default(path).await?;
        info!(path = %path.display(), count = catalog.len(), "Loaded item catalog");
        Ok(catalog)
    }

    /// Persist sorted by item id.
    pub async fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self).await
    }

    /// Exact match on the localized name; lowest id wins.
    pub fn find_by_local_name(&self, name: &str) -> Option<(&ItemId, &ItemRecord)> {
        self.items.iter().find(|(_, record)| record.item_jp == name)
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemRecord> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn insert(&mut self, id: ItemId, record: ItemRecord) {
        self.items.insert(id, record);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
