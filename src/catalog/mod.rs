//! The static completion catalog.
//!
//! The catalog is an ordered list of `(predicate, item)` pairs built once at
//! first use and shared read-only for the life of the process. Predicates
//! are evaluated against the lexical context extracted around the cursor;
//! item order in the catalog is the order items appear in responses, so it
//! is fixed data, never hash-map iteration.

use std::sync::LazyLock;

use lsp_types::CompletionItem;

mod builtins;

/// Lexical context a completion request is evaluated against: the shader
/// type declared at the top of the file, the enclosing function, and the
/// tokens on the current line before the word being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionScope {
    pub shader_type: String,
    pub function_name: String,
    pub line_tokens: Vec<String>,
}

impl CompletionScope {
    pub fn last_token(&self) -> &str {
        self.line_tokens.last().map(String::as_str).unwrap_or("")
    }
}

type Predicate = Box<dyn Fn(&CompletionScope) -> bool + Send + Sync>;

/// One catalog row: the item and the context rule that enables it.
pub struct CatalogEntry {
    predicate: Predicate,
    item: CompletionItem,
}

impl CatalogEntry {
    fn new(predicate: Predicate, item: CompletionItem) -> Self {
        Self { predicate, item }
    }

    pub fn item(&self) -> &CompletionItem {
        &self.item
    }

    /// Whether this entry should be offered for the given typed prefix and
    /// context.
    pub fn matches(&self, current_word: &str, scope: &CompletionScope) -> bool {
        self.item.label.starts_with(current_word) && (self.predicate)(scope)
    }
}

static CATALOG: LazyLock<Vec<CatalogEntry>> = LazyLock::new(builtins::build);

/// The full ordered catalog.
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

// Predicate combinators. The vocabulary is closed; everything in the
// catalog is a conjunction/disjunction/negation of the primitives below.

fn and(predicates: Vec<Predicate>) -> Predicate {
    Box::new(move |scope| predicates.iter().all(|p| p(scope)))
}

fn or(predicates: Vec<Predicate>) -> Predicate {
    Box::new(move |scope| predicates.iter().any(|p| p(scope)))
}

fn not(predicate: Predicate) -> Predicate {
    Box::new(move |scope| !predicate(scope))
}

fn always_true() -> Predicate {
    Box::new(|_| true)
}

/// The cursor word is the first token on the line.
fn is_first() -> Predicate {
    Box::new(|scope| scope.line_tokens.is_empty())
}

fn last_token_one_of(tokens: &'static [&'static str]) -> Predicate {
    Box::new(move |scope| tokens.iter().any(|&token| token == scope.last_token()))
}

fn first_token_one_of(tokens: &'static [&'static str]) -> Predicate {
    Box::new(move |scope| {
        scope
            .line_tokens
            .first()
            .is_some_and(|first| tokens.iter().any(|token| first == token))
    })
}

fn tokens_contain(token: &'static str) -> Predicate {
    Box::new(move |scope| scope.line_tokens.iter().any(|t| t == token))
}

fn last_token_is_data_type() -> Predicate {
    Box::new(|scope| builtins::is_data_type(scope.last_token()))
}

fn last_token_is_punctuation() -> Predicate {
    Box::new(|scope| {
        scope
            .last_token()
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_punctuation())
    })
}

fn shader_type_is(name: &'static str) -> Predicate {
    Box::new(move |scope| scope.shader_type == name)
}

fn in_function(name: &'static str) -> Predicate {
    Box::new(move |scope| scope.function_name == name)
}

/// Matches when the line tokens spell out exactly `prefix` followed by
/// `tail`. Models contextual keyword chains such as `else if`.
fn sequence(tail: &'static str, prefix: &'static [&'static str]) -> Predicate {
    Box::new(move |scope| {
        scope.line_tokens.len() == prefix.len() + 1
            && scope.line_tokens[..prefix.len()]
                .iter()
                .zip(prefix)
                .all(|(token, want)| token == want)
            && scope.line_tokens[prefix.len()] == tail
    })
}
