//! Tantivy-backed `StoreClient`.
//!
//! The physical schema is built from the declarative config in `schema`:
//! variant fields get a lowercasing keyword tokenizer (the whole string is
//! one term, serving prefix/exact/fuzzy matching), word fields get a
//! lowercasing word tokenizer for conjunctive per-word fuzzy matching, and
//! the full record rides along as one stored JSON payload.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, RawTokenizer, SimpleTokenizer, TextAnalyzer};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use crate::models::Token;
use crate::query::{Clause, SearchQuery};
use crate::schema::{self, Analysis, FieldSpec};
use crate::store::{SearchHit, StoreClient, StoreError, StoreResult};

const KEYWORD_TOKENIZER: &str = "keyword_lc";
const WORD_TOKENIZER: &str = "word_lc";

const WRITER_HEAP_BYTES: usize = 50_000_000;
const IN_MEMORY_WRITER_HEAP_BYTES: usize = 15_000_000;

/// Tantivy index holding the token catalog.
pub struct TantivyStore {
    writer: RwLock<IndexWriter>,
    reader: RwLock<IndexReader>,
    fields: HashMap<&'static str, Field>,
    specs: &'static [FieldSpec],
    id_field: Field,
    doc_field: Field,
}

impl TantivyStore {
    /// Open or create an on-disk index at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(path)?;
        let dir = MmapDirectory::open(path)?;
        let specs = schema::index_schema();
        let index = Index::open_or_create(dir, Self::build_schema(specs))?;
        Self::register_tokenizers(&index);

        let writer = index.writer(WRITER_HEAP_BYTES)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Self::from_parts(writer, reader, specs)
    }

    /// Create an in-memory index (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let specs = schema::index_schema();
        let index = Index::create_in_ram(Self::build_schema(specs));
        Self::register_tokenizers(&index);

        let writer = index.writer(IN_MEMORY_WRITER_HEAP_BYTES)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Self::from_parts(writer, reader, specs)
    }

    fn from_parts(
        writer: IndexWriter,
        reader: IndexReader,
        specs: &'static [FieldSpec],
    ) -> StoreResult<Self> {
        let tantivy_schema = writer.index().schema();
        let mut fields = HashMap::new();
        for spec in specs {
            fields.insert(spec.name, tantivy_schema.get_field(spec.name)?);
        }
        let id_field = fields[schema::ID];
        let doc_field = fields[schema::DOC];
        Ok(Self {
            writer: RwLock::new(writer),
            reader: RwLock::new(reader),
            fields,
            specs,
            id_field,
            doc_field,
        })
    }

    fn build_schema(specs: &[FieldSpec]) -> Schema {
        let mut builder = Schema::builder();
        for spec in specs {
            match spec.analysis {
                Analysis::Raw => {
                    builder.add_text_field(spec.name, STRING | STORED);
                }
                Analysis::Keyword => {
                    let indexing = TextFieldIndexing::default()
                        .set_tokenizer(KEYWORD_TOKENIZER)
                        .set_index_option(IndexRecordOption::Basic);
                    builder.add_text_field(
                        spec.name,
                        TextOptions::default().set_indexing_options(indexing),
                    );
                }
                Analysis::Words => {
                    let indexing = TextFieldIndexing::default()
                        .set_tokenizer(WORD_TOKENIZER)
                        .set_index_option(IndexRecordOption::WithFreqs);
                    builder.add_text_field(
                        spec.name,
                        TextOptions::default().set_indexing_options(indexing),
                    );
                }
                Analysis::Stored => {
                    builder.add_text_field(spec.name, STORED);
                }
            }
        }
        builder.build()
    }

    fn register_tokenizers(index: &Index) {
        let keyword = TextAnalyzer::builder(RawTokenizer::default())
            .filter(LowerCaser)
            .build();
        index.tokenizers().register(KEYWORD_TOKENIZER, keyword);

        let words = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .build();
        index.tokenizers().register(WORD_TOKENIZER, words);
    }

    fn field(&self, name: &str) -> StoreResult<Field> {
        self.fields
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::InvalidQuery(format!("unknown field: {name}")))
    }

    fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Stage one record into the given writer, deleting any previous
    /// version with the same id (upsert semantics).
    fn stage(&self, writer: &IndexWriter, token: &Token) -> StoreResult<()> {
        let id = token.id.as_deref().ok_or(StoreError::MissingId)?;
        writer.delete_term(Term::from_field_text(self.id_field, id));

        let mut doc = TantivyDocument::default();
        doc.add_text(self.id_field, id);
        for variant in &token.name_variants {
            doc.add_text(self.field(schema::NAME_VARIANTS)?, variant);
        }
        for variant in &token.symbol_variants {
            doc.add_text(self.field(schema::SYMBOL_VARIANTS)?, variant);
        }
        doc.add_text(self.field(schema::NAME_WORDS)?, &token.name);
        doc.add_text(self.field(schema::SYMBOL_WORDS)?, &token.symbol);
        doc.add_text(self.doc_field, serde_json::to_string(token)?);

        writer.add_document(doc)?;
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        self.writer.write().commit()?;
        self.reader.write().reload()?;
        Ok(())
    }

    fn translate(&self, query: &SearchQuery) -> StoreResult<Box<dyn Query>> {
        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for clause in &query.clauses {
            subqueries.push((Occur::Should, self.translate_clause(clause)?));
        }
        if subqueries.is_empty() {
            return Err(StoreError::InvalidQuery("query has no clauses".into()));
        }
        Ok(Box::new(BooleanQuery::new(subqueries)))
    }

    /// Map one structured clause to a tantivy query.
    ///
    /// `prefix_length` and `max_expansions` on fuzzy clauses are advisory
    /// here: `FuzzyTermQuery` exposes neither, so only the edit distance
    /// is applied by this backend.
    fn translate_clause(&self, clause: &Clause) -> StoreResult<Box<dyn Query>> {
        match clause {
            Clause::Prefix { field, value } => {
                let completion = self.spec(field).map(|s| s.completion).unwrap_or(false);
                if !completion {
                    return Err(StoreError::InvalidQuery(format!(
                        "field {field} does not serve prefix completion"
                    )));
                }
                let pattern = format!("{}.*", regex::escape(value));
                Ok(Box::new(RegexQuery::from_pattern(
                    &pattern,
                    self.field(field)?,
                )?))
            }
            Clause::Term { field, value } => Ok(Box::new(TermQuery::new(
                Term::from_field_text(self.field(field)?, value),
                IndexRecordOption::Basic,
            ))),
            Clause::Fuzzy {
                field,
                value,
                fuzziness,
                conjunctive,
                ..
            } => {
                let field = self.field(field)?;
                if *conjunctive {
                    let mut parts: Vec<(Occur, Box<dyn Query>)> = Vec::new();
                    for word in value.split_whitespace() {
                        let term = Term::from_field_text(field, word);
                        let distance = fuzziness.distance(word);
                        parts.push((
                            Occur::Must,
                            Box::new(FuzzyTermQuery::new(term, distance, true)),
                        ));
                    }
                    if parts.is_empty() {
                        return Err(StoreError::InvalidQuery(
                            "conjunctive fuzzy clause has no terms".into(),
                        ));
                    }
                    Ok(Box::new(BooleanQuery::new(parts)))
                } else {
                    let term = Term::from_field_text(field, value);
                    let distance = fuzziness.distance(value);
                    Ok(Box::new(FuzzyTermQuery::new(term, distance, true)))
                }
            }
        }
    }

    fn decode(&self, doc: &TantivyDocument) -> StoreResult<Token> {
        let raw = doc
            .get_first(self.doc_field)
            .and_then(|v| v.as_str())
            .unwrap_or("{}");
        Ok(serde_json::from_str(raw)?)
    }

    /// Number of records currently in the index.
    pub fn num_docs(&self) -> u64 {
        self.reader.read().searcher().num_docs()
    }
}

impl StoreClient for TantivyStore {
    fn put_document(&self, token: &Token) -> StoreResult<()> {
        {
            let writer = self.writer.read();
            self.stage(&writer, token)?;
        }
        self.commit()
    }

    fn put_documents(&self, tokens: &[Token]) -> StoreResult<()> {
        {
            let writer = self.writer.read();
            for token in tokens {
                self.stage(&writer, token)?;
            }
        }
        self.commit()
    }

    fn get_all_documents(&self) -> StoreResult<Vec<Token>> {
        let reader = self.reader.read();
        let searcher = reader.searcher();
        let mut tokens = Vec::new();
        for segment in searcher.segment_readers() {
            let store = segment.get_store_reader(1)?;
            for doc_id in segment.doc_ids_alive() {
                let doc: TantivyDocument = store.get(doc_id)?;
                tokens.push(self.decode(&doc)?);
            }
        }
        Ok(tokens)
    }

    fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchHit>> {
        let tantivy_query = self.translate(query)?;
        let reader = self.reader.read();
        let searcher = reader.searcher();

        let top_docs = searcher.search(
            tantivy_query.as_ref(),
            &TopDocs::with_limit(query.max_hits.max(1)),
        )?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address)?;
            hits.push(SearchHit {
                token: self.decode(&doc)?,
                score,
            });
        }
        Ok(hits)
    }
}
