//! Renders condition predicates into the textual form the catalog expects,
//! e.g. `= '/tempZone/home'` or `in ('a', 'b')`.

use crate::query::ast::operator::{ConditionOperator, Literal};

pub mod literal;

/// A trait for any query node that renders into a wire fragment.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates one fragment while rendering.
#[derive(Debug, Default)]
pub struct Renderer {
    pub fragment: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the renderer and returns the fragment.
    pub fn finish(self) -> String {
        self.fragment
    }

    /// Appends a single-quoted, escaped literal.
    pub fn push_quoted(&mut self, value: &str) {
        self.fragment.push_str(&literal::quote_literal(value));
    }
}

impl Render for ConditionOperator {
    fn render(&self, r: &mut Renderer) {
        r.fragment.push_str(self.as_str());
    }
}

impl Render for Literal {
    fn render(&self, r: &mut Renderer) {
        match self {
            Literal::Single(value) => r.push_quoted(value),
            Literal::List(values) => {
                r.fragment.push('(');
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        r.fragment.push_str(", ");
                    }
                    r.push_quoted(value);
                }
                r.fragment.push(')');
            }
            Literal::Range(low, high) => {
                r.push_quoted(low);
                r.fragment.push(' ');
                r.push_quoted(high);
            }
        }
    }
}

/// Renders `operator literal`, the predicate part of a wire condition.
pub fn render_predicate(op: ConditionOperator, literal: &Literal) -> String {
    let mut renderer = Renderer::new();
    op.render(&mut renderer);
    renderer.fragment.push(' ');
    literal.render(&mut renderer);
    renderer.finish()
}
