//! Generic response envelopes.
//!
//! The Web API wraps sequences in two pagination styles that callers must be
//! able to tell apart: offset-based [`Paging`] and cursor-based
//! [`CursorPaging`]. Some endpoints additionally nest the sequence under a
//! top-level key named after the resource (`{"albums": {...}}`); the keyed
//! wrappers ([`ItemList`], [`PagingResponse`], [`CursorPagingResponse`])
//! unwrap whichever of [`CONTAINER_KEYS`] is present.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level keys a keyed envelope may use, in lookup order.
pub const CONTAINER_KEYS: [&str; 8] = [
    "categories",
    "albums",
    "artists",
    "tracks",
    "shows",
    "episodes",
    "audiobooks",
    "chapters",
];

/// Keys under which a saved-item wrapper carries its payload.
const SAVED_ITEM_KEYS: [&str; 5] = ["show", "track", "album", "episode", "audiobook"];

/// Offset-based page of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paging<T> {
    pub href: String,
    pub items: Vec<T>,
    pub limit: u32,
    pub next: Option<String>,
    pub offset: u32,
    pub previous: Option<String>,
    /// Total number of items available, may exceed `items.len()`
    pub total: u32,
}

impl<T> Paging<T> {
    /// Whether the server advertises a following page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Offset to request for the following page, if there is one.
    ///
    /// `None` as well when the offset would not fit in a `u32`.
    pub fn next_offset(&self) -> Option<u32> {
        if !self.has_next() {
            return None;
        }
        u32::try_from(self.items.len())
            .ok()
            .and_then(|len| self.offset.checked_add(len))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Opaque position markers for cursor-based pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

/// Cursor-based page of items.
///
/// There is no `offset`: the only way forward is the `after` cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPaging<T> {
    pub href: String,
    pub items: Vec<T>,
    pub limit: u32,
    pub next: Option<String>,
    #[serde(default)]
    pub cursors: Cursors,
    pub total: u32,
}

impl<T> CursorPaging<T> {
    /// Whether the server advertises a following page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Cursor to pass as `after` for the following page.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next() {
            self.cursors.after.as_deref()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Flat list nested under one of [`CONTAINER_KEYS`].
///
/// Entries are optional because batch lookups return `null` for unknown IDs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemList<T> {
    pub items: Vec<Option<T>>,
}

impl<T> ItemList<T> {
    /// Drop the `null` entries.
    pub fn into_present(self) -> Vec<T> {
        self.items.into_iter().flatten().collect()
    }
}

/// [`Paging`] nested under one of [`CONTAINER_KEYS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagingResponse<T> {
    pub page: Paging<T>,
}

impl<T> PagingResponse<T> {
    pub fn into_page(self) -> Paging<T> {
        self.page
    }
}

/// [`CursorPaging`] nested under one of [`CONTAINER_KEYS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorPagingResponse<T> {
    pub page: CursorPaging<T>,
}

impl<T> CursorPagingResponse<T> {
    pub fn into_page(self) -> CursorPaging<T> {
        self.page
    }
}

/// Library entry: when it was saved plus the saved object itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedItem<T> {
    pub added_at: DateTime<Utc>,
    pub item: T,
}

/// Remove the first of `keys` present in `map` and decode it as `V`.
///
/// A map holding none of the keys is an error, never an empty result.
fn take_keyed<V, E>(map: &mut Map<String, Value>, keys: &[&str]) -> std::result::Result<V, E>
where
    V: DeserializeOwned,
    E: DeError,
{
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return serde_json::from_value(value)
                .map_err(|e| E::custom(format!("invalid `{}` container: {}", key, e)));
        }
    }
    Err(E::custom(format!(
        "expected one of the keys [{}], found [{}]",
        keys.join(", "),
        map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    )))
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ItemList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            items: take_keyed(&mut map, &CONTAINER_KEYS)?,
        })
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for PagingResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            page: take_keyed(&mut map, &CONTAINER_KEYS)?,
        })
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for CursorPagingResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            page: take_keyed(&mut map, &CONTAINER_KEYS)?,
        })
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for SavedItem<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let added_at = map
            .remove("added_at")
            .ok_or_else(|| D::Error::missing_field("added_at"))?;
        let added_at = serde_json::from_value(added_at).map_err(D::Error::custom)?;
        Ok(Self {
            added_at,
            item: take_keyed(&mut map, &SAVED_ITEM_KEYS)?,
        })
    }
}
