//! Explicit index-schema configuration.
//!
//! Declares each index field once, at startup: its name, how its text is
//! analyzed, and whether it serves prefix completion. The store backend
//! builds its physical schema from this description; engines reference
//! fields by the names declared here.

/// Field names of the token index.
pub const ID: &str = "id";
pub const NAME_VARIANTS: &str = "name_variants";
pub const SYMBOL_VARIANTS: &str = "symbol_variants";
pub const NAME_WORDS: &str = "name_words";
pub const SYMBOL_WORDS: &str = "symbol_words";
/// Stored-only JSON payload holding the full record.
pub const DOC: &str = "doc";

/// How a field's text is analyzed at index time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    /// Indexed verbatim as a single term (identifiers).
    Raw,
    /// One lowercased term per value; whole-string prefix, exact and
    /// fuzzy matching.
    Keyword,
    /// Lowercased word tokens; per-word fuzzy matching.
    Words,
    /// Stored only, never searched.
    Stored,
}

/// One field of the index schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub analysis: Analysis,
    /// Whether the field backs prefix completion. Prefix clauses are only
    /// valid against completion fields.
    pub completion: bool,
}

/// The token index schema.
pub fn index_schema() -> &'static [FieldSpec] {
    const FIELDS: &[FieldSpec] = &[
        FieldSpec { name: ID, analysis: Analysis::Raw, completion: false },
        FieldSpec { name: NAME_VARIANTS, analysis: Analysis::Keyword, completion: true },
        FieldSpec { name: SYMBOL_VARIANTS, analysis: Analysis::Keyword, completion: true },
        FieldSpec { name: NAME_WORDS, analysis: Analysis::Words, completion: false },
        FieldSpec { name: SYMBOL_WORDS, analysis: Analysis::Words, completion: false },
        FieldSpec { name: DOC, analysis: Analysis::Stored, completion: false },
    ];
    FIELDS
}
