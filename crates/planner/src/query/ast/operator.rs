use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition operators understood by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
}

impl ConditionOperator {
    /// Longest keywords first so prefix matching picks `not like` over `not`.
    pub const PARSE_ORDER: [ConditionOperator; 11] = [
        ConditionOperator::NotLike,
        ConditionOperator::NotIn,
        ConditionOperator::Between,
        ConditionOperator::Like,
        ConditionOperator::In,
        ConditionOperator::NotEqual,
        ConditionOperator::LessOrEqual,
        ConditionOperator::GreaterOrEqual,
        ConditionOperator::Equal,
        ConditionOperator::LessThan,
        ConditionOperator::GreaterThan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Equal => "=",
            ConditionOperator::NotEqual => "<>",
            ConditionOperator::LessThan => "<",
            ConditionOperator::GreaterThan => ">",
            ConditionOperator::LessOrEqual => "<=",
            ConditionOperator::GreaterOrEqual => ">=",
            ConditionOperator::Like => "like",
            ConditionOperator::NotLike => "not like",
            ConditionOperator::In => "in",
            ConditionOperator::NotIn => "not in",
            ConditionOperator::Between => "between",
        }
    }

    /// Whether the operator takes a literal list (`in`, `not in`).
    pub fn takes_list(&self) -> bool {
        matches!(self, ConditionOperator::In | ConditionOperator::NotIn)
    }

    pub fn takes_range(&self) -> bool {
        matches!(self, ConditionOperator::Between)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    Single(String),
    List(Vec<String>),
    Range(String, String),
}

impl Literal {
    pub fn single(value: impl Into<String>) -> Self {
        Literal::Single(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Literal::List(values.into_iter().map(Into::into).collect())
    }

    pub fn range(low: impl Into<String>, high: impl Into<String>) -> Self {
        Literal::Range(low.into(), high.into())
    }

    /// Checks that the literal's shape fits the operator.
    pub fn fits(&self, op: ConditionOperator) -> bool {
        match self {
            Literal::List(values) => op.takes_list() && !values.is_empty(),
            Literal::Range(_, _) => op.takes_range(),
            Literal::Single(_) => !op.takes_list() && !op.takes_range(),
        }
    }
}

/// Aggregate applied to a selected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregate {
    Min,
    Max,
    Sum,
    Avg,
    Count,
}

impl Aggregate {
    /// Select flag value the catalog expects for the aggregate.
    pub fn select_flag(&self) -> u32 {
        match self {
            Aggregate::Min => 2,
            Aggregate::Max => 3,
            Aggregate::Sum => 4,
            Aggregate::Avg => 5,
            Aggregate::Count => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for OrderDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDir::Asc => write!(f, "asc"),
            OrderDir::Desc => write!(f, "desc"),
        }
    }
}
