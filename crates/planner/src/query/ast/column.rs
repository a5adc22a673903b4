use crate::error::GenQueryError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A catalog column that can be selected, filtered or ordered on.
///
/// The built-in variants are the fixed catalog vocabulary. `Extension` names a
/// column from a server-side extension table; its wire id is only known to a
/// translator configured with that table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogColumn {
    ZoneId,
    ZoneName,

    DataId,
    DataCollId,
    DataName,
    DataReplNum,
    DataVersion,
    DataTypeName,
    DataSize,
    DataRescName,
    DataPath,
    DataOwnerName,
    DataOwnerZone,
    DataReplStatus,
    DataStatus,
    DataChecksum,
    DataCreateTime,
    DataModifyTime,

    CollId,
    CollName,
    CollParentName,
    CollOwnerName,
    CollOwnerZone,
    CollCreateTime,
    CollModifyTime,
    CollType,
    CollInfo1,
    CollInfo2,

    Extension(String),
}

/// Every built-in column, in wire id order.
pub static BUILTIN_COLUMNS: [CatalogColumn; 28] = [
    CatalogColumn::ZoneId,
    CatalogColumn::ZoneName,
    CatalogColumn::DataId,
    CatalogColumn::DataCollId,
    CatalogColumn::DataName,
    CatalogColumn::DataReplNum,
    CatalogColumn::DataVersion,
    CatalogColumn::DataTypeName,
    CatalogColumn::DataSize,
    CatalogColumn::DataRescName,
    CatalogColumn::DataPath,
    CatalogColumn::DataOwnerName,
    CatalogColumn::DataOwnerZone,
    CatalogColumn::DataReplStatus,
    CatalogColumn::DataStatus,
    CatalogColumn::DataChecksum,
    CatalogColumn::DataCreateTime,
    CatalogColumn::DataModifyTime,
    CatalogColumn::CollId,
    CatalogColumn::CollName,
    CatalogColumn::CollParentName,
    CatalogColumn::CollOwnerName,
    CatalogColumn::CollOwnerZone,
    CatalogColumn::CollCreateTime,
    CatalogColumn::CollModifyTime,
    CatalogColumn::CollType,
    CatalogColumn::CollInfo1,
    CatalogColumn::CollInfo2,
];

impl CatalogColumn {
    /// The catalog's name for the column, e.g. `COLL_NAME`.
    pub fn name(&self) -> &str {
        match self {
            CatalogColumn::ZoneId => "ZONE_ID",
            CatalogColumn::ZoneName => "ZONE_NAME",
            CatalogColumn::DataId => "D_DATA_ID",
            CatalogColumn::DataCollId => "D_COLL_ID",
            CatalogColumn::DataName => "DATA_NAME",
            CatalogColumn::DataReplNum => "DATA_REPL_NUM",
            CatalogColumn::DataVersion => "DATA_VERSION",
            CatalogColumn::DataTypeName => "DATA_TYPE_NAME",
            CatalogColumn::DataSize => "DATA_SIZE",
            CatalogColumn::DataRescName => "D_RESC_NAME",
            CatalogColumn::DataPath => "D_DATA_PATH",
            CatalogColumn::DataOwnerName => "D_OWNER_NAME",
            CatalogColumn::DataOwnerZone => "D_OWNER_ZONE",
            CatalogColumn::DataReplStatus => "D_REPL_STATUS",
            CatalogColumn::DataStatus => "D_DATA_STATUS",
            CatalogColumn::DataChecksum => "D_DATA_CHECKSUM",
            CatalogColumn::DataCreateTime => "D_CREATE_TIME",
            CatalogColumn::DataModifyTime => "D_MODIFY_TIME",
            CatalogColumn::CollId => "COLL_ID",
            CatalogColumn::CollName => "COLL_NAME",
            CatalogColumn::CollParentName => "COLL_PARENT_NAME",
            CatalogColumn::CollOwnerName => "COLL_OWNER_NAME",
            CatalogColumn::CollOwnerZone => "COLL_OWNER_ZONE",
            CatalogColumn::CollCreateTime => "COLL_CREATE_TIME",
            CatalogColumn::CollModifyTime => "COLL_MODIFY_TIME",
            CatalogColumn::CollType => "COLL_TYPE",
            CatalogColumn::CollInfo1 => "COLL_INFO1",
            CatalogColumn::CollInfo2 => "COLL_INFO2",
            CatalogColumn::Extension(name) => name,
        }
    }

    /// The wire identifier of a built-in column. Extension columns have none
    /// of their own.
    pub fn builtin_id(&self) -> Option<u32> {
        let id = match self {
            CatalogColumn::ZoneId => 101,
            CatalogColumn::ZoneName => 102,
            CatalogColumn::DataId => 401,
            CatalogColumn::DataCollId => 402,
            CatalogColumn::DataName => 403,
            CatalogColumn::DataReplNum => 404,
            CatalogColumn::DataVersion => 405,
            CatalogColumn::DataTypeName => 406,
            CatalogColumn::DataSize => 407,
            CatalogColumn::DataRescName => 409,
            CatalogColumn::DataPath => 410,
            CatalogColumn::DataOwnerName => 411,
            CatalogColumn::DataOwnerZone => 412,
            CatalogColumn::DataReplStatus => 413,
            CatalogColumn::DataStatus => 414,
            CatalogColumn::DataChecksum => 415,
            CatalogColumn::DataCreateTime => 419,
            CatalogColumn::DataModifyTime => 420,
            CatalogColumn::CollId => 500,
            CatalogColumn::CollName => 501,
            CatalogColumn::CollParentName => 502,
            CatalogColumn::CollOwnerName => 503,
            CatalogColumn::CollOwnerZone => 504,
            CatalogColumn::CollCreateTime => 508,
            CatalogColumn::CollModifyTime => 509,
            CatalogColumn::CollType => 510,
            CatalogColumn::CollInfo1 => 511,
            CatalogColumn::CollInfo2 => 512,
            CatalogColumn::Extension(_) => return None,
        };
        Some(id)
    }

    /// Looks up a built-in column by wire id.
    pub fn from_builtin_id(id: u32) -> Option<CatalogColumn> {
        BUILTIN_COLUMNS
            .iter()
            .find(|c| c.builtin_id() == Some(id))
            .cloned()
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, CatalogColumn::Extension(_))
    }

    /// Extension column names follow the catalog's identifier rules:
    /// non-empty, ASCII uppercase letters, digits and underscores.
    pub fn has_valid_name(&self) -> bool {
        let name = self.name();
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    }
}

impl fmt::Display for CatalogColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogColumn {
    type Err = GenQueryError;

    /// Parses a built-in column name, with or without the `COL_` prefix,
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("COL_").unwrap_or(&upper);

        BUILTIN_COLUMNS
            .iter()
            .find(|c| c.name() == name)
            .cloned()
            .ok_or_else(|| {
                GenQueryError::InvalidSpecification(format!("unknown catalog column '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_names() {
        assert_eq!(
            "COLL_NAME".parse::<CatalogColumn>(),
            Ok(CatalogColumn::CollName)
        );
        assert_eq!(
            "col_data_size".parse::<CatalogColumn>(),
            Ok(CatalogColumn::DataSize)
        );
        assert!(matches!(
            "NOT_A_COLUMN".parse::<CatalogColumn>(),
            Err(GenQueryError::InvalidSpecification(_))
        ));
    }

    #[test]
    fn test_builtin_ids_are_unique_and_reversible() {
        for column in BUILTIN_COLUMNS.iter() {
            let id = column.builtin_id().unwrap();
            assert_eq!(CatalogColumn::from_builtin_id(id).as_ref(), Some(column));
        }
        assert_eq!(CatalogColumn::Extension("META_X".into()).builtin_id(), None);
    }

    #[test]
    fn test_extension_name_validation() {
        assert!(CatalogColumn::Extension("AUDIT_TAG_2".into()).has_valid_name());
        assert!(!CatalogColumn::Extension("".into()).has_valid_name());
        assert!(!CatalogColumn::Extension("bad name".into()).has_valid_name());
    }
}
