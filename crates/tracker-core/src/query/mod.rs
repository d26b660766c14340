//! Search query value model.
//!
//! Queries are plain values: a [`Term`] matches one indexed field value and
//! a [`BooleanQuery`] combines clauses with [`Occur`] flags. They render in
//! the familiar `+field:value (a b)` syntax via `Display`, compare and hash
//! structurally, and serialize to JSON for the REST layer.

pub mod fields;

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a clause participates in a boolean query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// The clause must match.
    Must,
    /// At least one `Should` clause must match when there are no `Must` clauses.
    Should,
    /// The clause must not match.
    MustNot,
}

impl Occur {
    fn prefix(self) -> &'static str {
        match self {
            Self::Must => "+",
            Self::Should => "",
            Self::MustNot => "-",
        }
    }
}

/// A single `field:value` match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Index field name.
    pub field: String,
    /// Exact indexed value.
    pub value: String,
}

impl Term {
    /// Create a term.
    pub fn new(field: impl Into<String>, value: impl ToString) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

/// One clause of a [`BooleanQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BooleanClause {
    /// The nested query.
    pub query: Query,
    /// How it participates.
    pub occur: Occur,
}

/// An ordered list of clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
}

impl BooleanQuery {
    /// Create an empty boolean query. An empty query matches nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause.
    pub fn add(&mut self, query: impl Into<Query>, occur: Occur) -> &mut Self {
        self.clauses.push(BooleanClause {
            query: query.into(),
            occur,
        });
        self
    }

    /// Append a `Must` clause, builder style.
    pub fn must(mut self, query: impl Into<Query>) -> Self {
        self.add(query, Occur::Must);
        self
    }

    /// Append a `Should` clause, builder style.
    pub fn should(mut self, query: impl Into<Query>) -> Self {
        self.add(query, Occur::Should);
        self
    }

    /// Append a `MustNot` clause, builder style.
    pub fn must_not(mut self, query: impl Into<Query>) -> Self {
        self.add(query, Occur::MustNot);
        self
    }

    /// A query with every element of `queries` as a `Should` clause.
    pub fn any_of(queries: impl IntoIterator<Item = Query>) -> Self {
        queries.into_iter().fold(Self::new(), Self::should)
    }

    /// The clauses in insertion order.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    /// Whether there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(clause.occur.prefix())?;
            match &clause.query {
                Query::Boolean(nested) => write!(f, "({nested})")?,
                Query::Term(term) => write!(f, "{term}")?,
            }
        }
        Ok(())
    }
}

/// A search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Single field match.
    Term(Term),
    /// Clause combination.
    Boolean(BooleanQuery),
}

impl Query {
    /// Shorthand for a term query.
    pub fn term(field: impl Into<String>, value: impl ToString) -> Self {
        Self::Term(Term::new(field, value))
    }

    /// Whether this is a boolean query without clauses.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Boolean(b) if b.is_empty())
    }
}

impl From<Term> for Query {
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl From<BooleanQuery> for Query {
    fn from(query: BooleanQuery) -> Self {
        Self::Boolean(query)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => write!(f, "{term}"),
            Self::Boolean(query) => write!(f, "{query}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let query = BooleanQuery::new()
            .must(BooleanQuery::any_of([
                Query::term("projid", 10),
                Query::term("projid", 11),
            ]))
            .must(Query::term("issue_author", "fred"))
            .must_not(Query::term("status", "closed"));
        assert_eq!(
            query.to_string(),
            "+(projid:10 projid:11) +issue_author:fred -status:closed"
        );
    }

    #[test]
    fn test_empty() {
        assert!(Query::from(BooleanQuery::new()).is_empty());
        assert!(!Query::term("projid", 1).is_empty());
        assert_eq!(BooleanQuery::new().to_string(), "");
    }

    #[test]
    fn test_structural_equality() {
        let a = BooleanQuery::new().must(Query::term("projid", 10));
        let b = BooleanQuery::new().must(Query::term("projid", "10"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Query::term("projid", 10)).unwrap();
        assert_eq!(json["type"], "term");
        assert_eq!(json["field"], "projid");
        assert_eq!(json["value"], "10");

        let json = serde_json::to_value(Query::from(BooleanQuery::new().should(Query::term("a", 1)))).unwrap();
        assert_eq!(json["type"], "boolean");
        assert_eq!(json["clauses"][0]["occur"], "should");
    }
}
