//! The immutable query specification produced by
//! [`QuerySpecBuilder`](crate::query::builder::spec::QuerySpecBuilder).

use crate::query::ast::{
    column::CatalogColumn,
    operator::{Aggregate, ConditionOperator, Literal, OrderDir},
    options::QueryOptions,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectColumn {
    pub column: CatalogColumn,
    pub aggregate: Option<Aggregate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub column: CatalogColumn,
    pub operator: ConditionOperator,
    pub literal: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: CatalogColumn,
    pub direction: OrderDir,
}

/// A validated GenQuery. The select order defines the row layout of every
/// result batch the query produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub(crate) selects: Vec<SelectColumn>,
    pub(crate) conditions: Vec<Condition>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) row_limit: usize,
    pub(crate) options: QueryOptions,
}

impl QuerySpec {
    pub fn selects(&self) -> &[SelectColumn] {
        &self.selects
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }
}
