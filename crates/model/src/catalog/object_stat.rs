use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of catalog object a path resolves to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Collection,
    DataObject,
    Unknown,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Collection => write!(f, "collection"),
            ObjectType::DataObject => write!(f, "data object"),
            ObjectType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Special (mounted or linked) collection flavours reported by the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialType {
    #[default]
    Normal,
    LinkedCollection,
    MountedCollection,
    StructuredFile,
}

/// Resolved identity and type metadata for a catalog path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ObjectStat {
    /// The path the caller asked about.
    pub absolute_path: String,

    /// The path the catalog actually stores the object under. Differs from
    /// `absolute_path` for linked collections.
    pub object_path: String,

    pub object_type: ObjectType,
    pub special_type: SpecialType,
    pub id: u64,
    pub owner_name: String,
    pub owner_zone: String,
    pub data_size: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl ObjectStat {
    /// Stat for a plain collection at `path`.
    pub fn collection(path: &str) -> Self {
        Self::new(path, ObjectType::Collection)
    }

    /// Stat for a plain data object at `path`.
    pub fn data_object(path: &str, data_size: u64) -> Self {
        ObjectStat {
            data_size,
            ..Self::new(path, ObjectType::DataObject)
        }
    }

    fn new(path: &str, object_type: ObjectType) -> Self {
        ObjectStat {
            absolute_path: path.to_string(),
            object_path: path.to_string(),
            object_type,
            special_type: SpecialType::Normal,
            id: 0,
            owner_name: String::new(),
            owner_zone: String::new(),
            data_size: 0,
            created_at: None,
            modified_at: None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.object_type == ObjectType::Collection
    }

    /// The path used in parent-path equality conditions when listing
    /// children. Linked collections are listed through their target.
    pub fn canonical_path(&self) -> &str {
        match self.special_type {
            SpecialType::LinkedCollection if !self.object_path.is_empty() => &self.object_path,
            _ => &self.absolute_path,
        }
    }
}
