//! Quoting and parsing of condition literals.
//!
//! Literals are wrapped in single quotes and an embedded `'` is doubled, so a
//! quote in user data can never close the literal early.

use crate::{
    error::GenQueryError,
    query::ast::{
        column::CatalogColumn,
        operator::{ConditionOperator, Literal},
        spec::Condition,
    },
};

const QUOTE: char = '\'';

/// Wraps a value in single quotes, doubling any embedded quote.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(QUOTE);
    for ch in value.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
    out
}

/// Parses a full `COLUMN operator literal` fragment back into a condition.
pub fn parse_fragment(fragment: &str) -> Result<Condition, GenQueryError> {
    let trimmed = fragment.trim_start();
    let (name, predicate) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| malformed(fragment))?;

    let column = match name.parse::<CatalogColumn>() {
        Ok(column) => column,
        Err(_) => {
            let extension = CatalogColumn::Extension(name.to_string());
            if !extension.has_valid_name() {
                return Err(malformed(fragment));
            }
            extension
        }
    };

    let (operator, literal) = parse_predicate(predicate)?;
    Ok(Condition {
        column,
        operator,
        literal,
    })
}

/// Parses an `operator literal` predicate, rejecting anything trailing the
/// literal.
pub fn parse_predicate(predicate: &str) -> Result<(ConditionOperator, Literal), GenQueryError> {
    let input = predicate.trim_start();
    let operator = ConditionOperator::PARSE_ORDER
        .into_iter()
        .find(|op| starts_with_keyword(input, op.as_str()))
        .ok_or_else(|| malformed(predicate))?;

    let rest = input[operator.as_str().len()..].trim_start();
    let (literal, rest) = if operator.takes_list() {
        parse_list(rest).ok_or_else(|| malformed(predicate))?
    } else if operator.takes_range() {
        let (low, rest) = read_quoted(rest).ok_or_else(|| malformed(predicate))?;
        let (high, rest) = read_quoted(rest.trim_start()).ok_or_else(|| malformed(predicate))?;
        (Literal::Range(low, high), rest)
    } else {
        let (value, rest) = read_quoted(rest).ok_or_else(|| malformed(predicate))?;
        (Literal::Single(value), rest)
    };

    if !rest.trim().is_empty() {
        return Err(malformed(predicate));
    }
    Ok((operator, literal))
}

fn starts_with_keyword(input: &str, keyword: &str) -> bool {
    input
        .get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

fn parse_list(input: &str) -> Option<(Literal, &str)> {
    let mut rest = input.strip_prefix('(')?.trim_start();
    let mut values = Vec::new();

    loop {
        let (value, after) = read_quoted(rest)?;
        values.push(value);
        let after = after.trim_start();
        if let Some(next) = after.strip_prefix(',') {
            rest = next.trim_start();
        } else {
            return after.strip_prefix(')').map(|tail| (Literal::List(values), tail));
        }
    }
}

/// Reads one quoted literal from the start of `input`, undoing the quote
/// doubling. Returns the literal and the remaining input.
fn read_quoted(input: &str) -> Option<(String, &str)> {
    let body = input.strip_prefix(QUOTE)?;
    let mut out = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch != QUOTE {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some((_, next)) if *next == QUOTE => {
                out.push(QUOTE);
                chars.next();
            }
            _ => return Some((out, &body[idx + 1..])),
        }
    }

    None
}

fn malformed(fragment: &str) -> GenQueryError {
    GenQueryError::MalformedFragment(fragment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::renderer::render_predicate;

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("plain"), "'plain'");
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal("''"), "''''''");
    }

    #[test]
    fn test_quoted_value_round_trips() {
        let originals = [
            "O'Brien",
            "' or COLL_NAME like '%",
            "trailing'",
            "'leading",
            "",
            "/tempZone/home/rods/d'ir/file's.txt",
        ];

        for original in originals {
            let predicate = render_predicate(ConditionOperator::Equal, &Literal::single(original));
            let (op, literal) = parse_predicate(&predicate).unwrap();
            assert_eq!(op, ConditionOperator::Equal);
            assert_eq!(literal, Literal::single(original), "predicate: {predicate}");
        }
    }

    #[test]
    fn test_list_and_range_round_trip() {
        let list = Literal::list(["a'b", "c, d", "e)"]);
        let predicate = render_predicate(ConditionOperator::NotIn, &list);
        assert_eq!(
            parse_predicate(&predicate).unwrap(),
            (ConditionOperator::NotIn, list)
        );

        let range = Literal::range("1'0", "2'0");
        let predicate = render_predicate(ConditionOperator::Between, &range);
        assert_eq!(
            parse_predicate(&predicate).unwrap(),
            (ConditionOperator::Between, range)
        );
    }

    #[test]
    fn test_unescaped_quote_is_rejected() {
        // A raw, undoubled quote ends the literal early and leaves a tail.
        let result = parse_predicate("= 'O'Brien'");
        assert!(matches!(result, Err(GenQueryError::MalformedFragment(_))));
    }

    #[test]
    fn test_parse_fragment() {
        let condition = parse_fragment("COLL_PARENT_NAME = '/tempZone/home'").unwrap();
        assert_eq!(condition.column, CatalogColumn::CollParentName);
        assert_eq!(condition.operator, ConditionOperator::Equal);
        assert_eq!(condition.literal, Literal::single("/tempZone/home"));

        let condition = parse_fragment("DATA_NAME not like '%.tmp'").unwrap();
        assert_eq!(condition.operator, ConditionOperator::NotLike);

        assert!(parse_fragment("COLL_NAME").is_err());
        assert!(parse_fragment("COLL_NAME ~ 'x'").is_err());
    }
}
