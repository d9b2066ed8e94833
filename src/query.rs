//! Structured query model.
//!
//! Engines build `SearchQuery` values; only the store backend interprets
//! them. All engine queries are disjunctions of clauses, with ranking left
//! to the store's default relevance scoring.

/// Edit-distance tolerance for fuzzy clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Tolerance scales with term length: 0 edits below 3 chars, 1 edit
    /// for 3-5 chars, 2 edits above.
    Auto,
    Fixed(u8),
}

impl Fuzziness {
    /// The edit distance allowed for a given term.
    pub fn distance(&self, term: &str) -> u8 {
        match self {
            Fuzziness::Fixed(d) => *d,
            Fuzziness::Auto => match term.chars().count() {
                0..=2 => 0,
                3..=5 => 1,
                _ => 2,
            },
        }
    }
}

/// A single match clause against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Text-level prefix match. Only valid against completion fields.
    Prefix { field: &'static str, value: String },
    /// Exact term match.
    Term { field: &'static str, value: String },
    /// Fuzzy match with bounded term expansion.
    Fuzzy {
        field: &'static str,
        value: String,
        fuzziness: Fuzziness,
        /// Leading characters that must match exactly.
        prefix_length: u8,
        /// Cap on candidate-term fan-out.
        max_expansions: u32,
        /// When set, every whitespace-separated term of `value` must
        /// match (AND semantics) instead of the whole value as one term.
        conjunctive: bool,
    },
}

/// An OR-composition of clauses with a bound on retrieved hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub clauses: Vec<Clause>,
    pub max_hits: usize,
}

impl SearchQuery {
    pub fn disjunction(clauses: Vec<Clause>, max_hits: usize) -> Self {
        Self { clauses, max_hits }
    }
}
