//! Translates a [`QuerySpec`] into the wire-level encoding the catalog
//! expects: numeric column ids, select flags and rendered predicates.

use crate::{
    error::GenQueryError,
    query::{
        ast::{
            column::CatalogColumn,
            operator::OrderDir,
            options::QueryOptions,
            spec::{QuerySpec, SelectColumn},
        },
        renderer::render_predicate,
    },
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};
use tracing::debug;

/// Select flag for a plain (non-aggregate) column.
pub const SELECT_PLAIN: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSelect {
    pub column_id: u32,
    pub select_flag: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCondition {
    pub column_id: u32,
    pub column_name: String,
    /// `operator 'escaped-literal'`
    pub predicate: String,
}

impl fmt::Display for WireCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column_name, self.predicate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireOrderBy {
    pub column_id: u32,
    pub direction: OrderDir,
}

/// Wire-ready form of a query, plus the row layout used to decode responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedQuery {
    pub selects: Vec<WireSelect>,
    pub conditions: Vec<WireCondition>,
    pub order_by: Vec<WireOrderBy>,
    pub row_limit: usize,
    pub options: QueryOptions,
    layout: Vec<SelectColumn>,
}

impl TranslatedQuery {
    /// The selects in row order.
    pub fn layout(&self) -> &[SelectColumn] {
        &self.layout
    }

    pub fn column_count(&self) -> usize {
        self.selects.len()
    }

    /// Row position of a plain (non-aggregate) select of `column`.
    pub fn position_of(&self, column: &CatalogColumn) -> Option<usize> {
        self.layout
            .iter()
            .position(|s| &s.column == column && s.aggregate.is_none())
    }

    /// Conditions rendered as `COLUMN operator 'literal'`.
    pub fn condition_fragments(&self) -> Vec<String> {
        self.conditions.iter().map(ToString::to_string).collect()
    }
}

/// Maps logical columns to wire ids. Built-in columns always resolve;
/// extension columns resolve only if registered.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    extensions: HashMap<String, u32>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a server extension column.
    pub fn with_extension(mut self, name: &str, column_id: u32) -> Self {
        self.extensions.insert(name.to_string(), column_id);
        self
    }

    pub fn resolve(&self, column: &CatalogColumn) -> Result<u32, GenQueryError> {
        match column {
            CatalogColumn::Extension(name) => self
                .extensions
                .get(name)
                .copied()
                .ok_or_else(|| GenQueryError::UnresolvableColumn(name.clone())),
            builtin => builtin
                .builtin_id()
                .ok_or_else(|| GenQueryError::UnresolvableColumn(builtin.to_string())),
        }
    }

    pub fn translate(&self, spec: &QuerySpec) -> Result<TranslatedQuery, GenQueryError> {
        let selects = spec
            .selects()
            .iter()
            .map(|s| {
                Ok(WireSelect {
                    column_id: self.resolve(&s.column)?,
                    select_flag: s.aggregate.map_or(SELECT_PLAIN, |a| a.select_flag()),
                })
            })
            .collect::<Result<Vec<_>, GenQueryError>>()?;

        let conditions = spec
            .conditions()
            .iter()
            .map(|c| {
                Ok(WireCondition {
                    column_id: self.resolve(&c.column)?,
                    column_name: c.column.to_string(),
                    predicate: render_predicate(c.operator, &c.literal),
                })
            })
            .collect::<Result<Vec<_>, GenQueryError>>()?;

        let order_by = spec
            .order_by()
            .iter()
            .map(|o| {
                Ok(WireOrderBy {
                    column_id: self.resolve(&o.column)?,
                    direction: o.direction,
                })
            })
            .collect::<Result<Vec<_>, GenQueryError>>()?;

        debug!(
            selects = selects.len(),
            conditions = conditions.len(),
            order_by = order_by.len(),
            row_limit = spec.row_limit(),
            "Translated GenQuery"
        );

        Ok(TranslatedQuery {
            selects,
            conditions,
            order_by,
            row_limit: spec.row_limit(),
            options: spec.options(),
            layout: spec.selects().to_vec(),
        })
    }
}
