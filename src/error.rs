//! Error taxonomy for authoring, morphology, and generation.
//!
//! Every error renders a plain one-line message through `Display` and a
//! longer annotated form through [`Error::rich_text`]. Parse errors bubble
//! to the nearest [`load_definitions`](crate::parser::ParseDriver::load_definitions)
//! boundary; generation errors abort the current rebuild.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input matched no sentence pattern, or a pattern committed (via
    /// its cut) and a later constituent failed to scan.
    #[error("\"{sentence}\": {expected}")]
    Grammatical {
        /// The offending sentence, as given.
        sentence: String,
        /// Name of the pattern being attempted when the cut was crossed.
        pattern: Option<&'static str>,
        /// Description of the constituent that could not be scanned.
        expected: String,
    },

    /// A new referent would reuse a name already owned by a referent of a
    /// different type, under some inflection.
    #[error("'{name}' already names a {existing}, so it cannot also name a {attempted}")]
    NameCollision {
        name: String,
        existing: &'static str,
        attempted: &'static str,
    },

    /// A locked ontology refused to introduce a new referent.
    #[error("'{name}' is not a known {kind} and no new {kind}s may be introduced")]
    UnknownReferent { name: String, kind: &'static str },

    /// A one-word noun or verb could not be inflected.
    #[error("unable to inflect '{token}'")]
    MorphologyUnknown { token: String },

    /// Constraint compilation found a statically impossible requirement.
    #[error("contradiction involving '{verb}': {detail}")]
    Contradiction {
        verb: String,
        subject_kind: String,
        object_kind: String,
        detail: String,
    },

    /// A statement inside a definition file failed; wraps the underlying
    /// error with its source location.
    #[error("{file}:{line}: {source}")]
    DefinitionLoad {
        file: String,
        line: usize,
        statement: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Annotated multi-line rendering, for surfaces that can afford more
    /// than one line of diagnostics.
    pub fn rich_text(&self) -> String {
        match self {
            Error::Grammatical {
                sentence,
                pattern,
                expected,
            } => {
                let mut out = format!("I didn't understand:\n    {sentence}\n");
                if let Some(p) = pattern {
                    out.push_str(&format!("while reading it as \"{p}\",\n"));
                }
                out.push_str(&format!("expected {expected}"));
                out
            }
            Error::NameCollision {
                name,
                existing,
                attempted,
            } => format!(
                "The name '{name}' is taken.\nIt already refers to a {existing}; \
                 a {attempted} cannot reuse it or any of its inflections."
            ),
            Error::UnknownReferent { name, kind } => format!(
                "'{name}' is not a known {kind}.\nThe ontology is locked, so \
                 statements may only add facts about existing things."
            ),
            Error::MorphologyUnknown { token } => {
                format!("I can't work out the other grammatical number of '{token}'.")
            }
            Error::Contradiction {
                verb,
                subject_kind,
                object_kind,
                detail,
            } => format!(
                "The rules for '{verb}' (from {subject_kind} to {object_kind}) \
                 can never be satisfied:\n{detail}"
            ),
            Error::DefinitionLoad {
                file,
                line,
                statement,
                source,
            } => format!(
                "{file}, line {line}:\n    {statement}\n{}",
                source.rich_text()
            ),
        }
    }

    /// True when the error is a parse-level diagnostic rather than a
    /// model-level one.
    pub fn is_grammatical(&self) -> bool {
        matches!(self, Error::Grammatical { .. })
    }
}
