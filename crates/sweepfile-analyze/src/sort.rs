//! Record ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use sweepfile_core::FileRecord;

/// Column to sort by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Base name.
    Name,
    /// Size in bytes (default for a cleanup view).
    #[default]
    Size,
    /// Last modification time.
    Date,
    /// Parent directory.
    Origin,
}

/// Sort direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum SortOrder {
    /// Smallest, oldest or A-Z first.
    #[strum(serialize = "ascending", to_string = "asc")]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    /// Largest, newest or Z-A first.
    #[default]
    #[strum(serialize = "descending", to_string = "desc")]
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current sort column and direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Active column.
    pub key: SortKey,
    /// Active direction.
    pub order: SortOrder,
}

impl SortState {
    /// Create a new sort state.
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Column header click: the active column flips direction, a new column
    /// starts descending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.reverse();
        } else {
            self.key = key;
            self.order = SortOrder::Descending;
        }
    }

    /// Sort records in place (stable).
    pub fn sort(&self, records: &mut [FileRecord]) {
        sort_records(records, self.key, self.order);
    }
}

/// Compare two records by a single column, ascending.
pub fn compare(a: &FileRecord, b: &FileRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Size => a.size.cmp(&b.size),
        SortKey::Date => a.modified_at.cmp(&b.modified_at),
        SortKey::Origin => a.origin.as_os_str().cmp(b.origin.as_os_str()),
    }
}

/// Sort records in place (stable).
pub fn sort_records(records: &mut [FileRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}
