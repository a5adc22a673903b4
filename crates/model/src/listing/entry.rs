use crate::core::utils::join_path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Collection,
    DataObject,
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingKind::Collection => write!(f, "collections"),
            ListingKind::DataObject => write!(f, "data_objects"),
        }
    }
}

/// A child of a collection, as shown in a browsable listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub kind: ListingKind,
    pub name: String,
    pub parent_path: String,
    pub id: u64,
    pub owner_name: String,
    pub owner_zone: String,
    /// Always 0 for collections.
    pub data_size: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,

    // Paging fields inherited from the row that produced the entry.
    pub row_count_so_far: u64,
    pub is_last_row_overall: bool,
    pub total_records: u64,
}

impl ListingEntry {
    pub fn new(kind: ListingKind, parent_path: &str, name: &str) -> Self {
        ListingEntry {
            kind,
            name: name.to_string(),
            parent_path: parent_path.to_string(),
            id: 0,
            owner_name: String::new(),
            owner_zone: String::new(),
            data_size: 0,
            created_at: None,
            modified_at: None,
            row_count_so_far: 0,
            is_last_row_overall: false,
            total_records: 0,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.kind == ListingKind::Collection
    }

    pub fn absolute_path(&self) -> String {
        join_path(&self.parent_path, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path() {
        let entry = ListingEntry::new(ListingKind::DataObject, "/tempZone/home/rods", "a.txt");
        assert_eq!(entry.absolute_path(), "/tempZone/home/rods/a.txt");
        assert!(!entry.is_collection());
    }
}
