use crate::{
    error::GenQueryError,
    query::ast::{
        column::CatalogColumn,
        operator::{Aggregate, ConditionOperator, Literal, OrderDir},
        options::QueryOptions,
        spec::{Condition, OrderBy, QuerySpec, SelectColumn},
    },
};

/// Accumulates selects, conditions and order-bys; all validation happens in
/// [`build`](QuerySpecBuilder::build). Dropping a builder has no effect.
#[derive(Debug, Clone, Default)]
pub struct QuerySpecBuilder {
    ast: QuerySpec,
}

impl QuerySpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_select(mut self, column: CatalogColumn) -> Self {
        self.ast.selects.push(SelectColumn {
            column,
            aggregate: None,
        });
        self
    }

    pub fn add_selects(self, columns: impl IntoIterator<Item = CatalogColumn>) -> Self {
        columns.into_iter().fold(self, |b, c| b.add_select(c))
    }

    pub fn add_select_aggregate(mut self, column: CatalogColumn, aggregate: Aggregate) -> Self {
        self.ast.selects.push(SelectColumn {
            column,
            aggregate: Some(aggregate),
        });
        self
    }

    pub fn add_condition(
        mut self,
        column: CatalogColumn,
        operator: ConditionOperator,
        literal: Literal,
    ) -> Self {
        self.ast.conditions.push(Condition {
            column,
            operator,
            literal,
        });
        self
    }

    pub fn add_order_by(mut self, column: CatalogColumn, direction: OrderDir) -> Self {
        self.ast.order_by.push(OrderBy { column, direction });
        self
    }

    pub fn with_option(mut self, option: QueryOptions) -> Self {
        self.ast.options |= option;
        self
    }

    /// Validates the accumulated parts and freezes them into a [`QuerySpec`].
    pub fn build(mut self, row_limit: usize) -> Result<QuerySpec, GenQueryError> {
        if self.ast.selects.is_empty() {
            return Err(invalid("at least one select column is required"));
        }
        if row_limit == 0 {
            return Err(invalid("row limit must be greater than zero"));
        }

        for (idx, select) in self.ast.selects.iter().enumerate() {
            check_column(&select.column, "select")?;
            if self.ast.selects[..idx].contains(select) {
                return Err(invalid(&format!(
                    "column {} is selected more than once",
                    select.column
                )));
            }
        }

        for condition in &self.ast.conditions {
            check_column(&condition.column, "condition")?;
            if !condition.literal.fits(condition.operator) {
                return Err(invalid(&format!(
                    "operator '{}' on {} does not accept {:?}",
                    condition.operator, condition.column, condition.literal
                )));
            }
        }

        for order in &self.ast.order_by {
            check_column(&order.column, "order by")?;
        }

        // The executor owns the close behavior of each request.
        self.ast.options.remove(QueryOptions::AUTO_CLOSE);
        self.ast.row_limit = row_limit;
        Ok(self.ast)
    }
}

fn check_column(column: &CatalogColumn, clause: &str) -> Result<(), GenQueryError> {
    if column.has_valid_name() {
        Ok(())
    } else {
        Err(invalid(&format!(
            "{clause} references unrecognized column '{column}'"
        )))
    }
}

fn invalid(reason: &str) -> GenQueryError {
    GenQueryError::InvalidSpecification(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_collection_query() {
        let spec = QuerySpecBuilder::new()
            .add_select(CatalogColumn::CollName)
            .add_select(CatalogColumn::CollId)
            .add_condition(
                CatalogColumn::CollParentName,
                ConditionOperator::Equal,
                Literal::single("/tempZone/home"),
            )
            .add_order_by(CatalogColumn::CollName, OrderDir::Asc)
            .with_option(QueryOptions::RETURN_TOTAL_ROW_COUNT)
            .build(500)
            .unwrap();

        assert_eq!(spec.selects().len(), 2);
        assert_eq!(spec.selects()[0].column, CatalogColumn::CollName);
        assert_eq!(spec.conditions().len(), 1);
        assert_eq!(spec.order_by()[0].direction, OrderDir::Asc);
        assert_eq!(spec.row_limit(), 500);
        let options = spec.options();
        assert!(options.contains(QueryOptions::RETURN_TOTAL_ROW_COUNT));
    }

    #[test]
    fn test_no_selects_is_invalid() {
        let err = QuerySpecBuilder::new()
            .add_condition(
                CatalogColumn::CollName,
                ConditionOperator::Equal,
                Literal::single("/z"),
            )
            .build(10)
            .unwrap_err();
        assert!(matches!(err, GenQueryError::InvalidSpecification(_)));
    }

    #[test]
    fn test_zero_row_limit_is_invalid() {
        let result = QuerySpecBuilder::new()
            .add_select(CatalogColumn::DataName)
            .build(0);
        assert!(matches!(result, Err(GenQueryError::InvalidSpecification(_))));
    }

    #[test]
    fn test_duplicate_select_is_invalid() {
        let result = QuerySpecBuilder::new()
            .add_select(CatalogColumn::DataName)
            .add_select(CatalogColumn::DataName)
            .build(10);
        assert!(matches!(result, Err(GenQueryError::InvalidSpecification(_))));

        // Same column under an aggregate is a different select.
        let result = QuerySpecBuilder::new()
            .add_select(CatalogColumn::DataSize)
            .add_select_aggregate(CatalogColumn::DataSize, Aggregate::Sum)
            .build(10);
        assert!(result.is_ok());
    }

    #[test]
    fn test_operator_literal_mismatch_is_invalid() {
        let result = QuerySpecBuilder::new()
            .add_select(CatalogColumn::DataName)
            .add_condition(
                CatalogColumn::DataSize,
                ConditionOperator::Between,
                Literal::single("10"),
            )
            .build(10);
        assert!(matches!(result, Err(GenQueryError::InvalidSpecification(_))));
    }

    #[test]
    fn test_unrecognized_extension_column_is_invalid() {
        let result = QuerySpecBuilder::new()
            .add_select(CatalogColumn::DataName)
            .add_order_by(CatalogColumn::Extension("not valid".into()), OrderDir::Desc)
            .build(10);
        assert!(matches!(result, Err(GenQueryError::InvalidSpecification(_))));
    }

    #[test]
    fn test_auto_close_is_stripped() {
        let spec = QuerySpecBuilder::new()
            .add_select(CatalogColumn::DataName)
            .with_option(QueryOptions::AUTO_CLOSE | QueryOptions::NO_DISTINCT)
            .build(10)
            .unwrap();
        assert_eq!(spec.options(), QueryOptions::NO_DISTINCT);
    }
}
