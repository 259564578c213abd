//! The statement driver: feeds statements through the pattern list,
//! loads definition files, and collects load errors.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::base::tokenize;
use crate::error::{Error, Result};
use crate::ontology::Ontology;

use super::matcher::{MatchFail, Matcher};
use super::patterns::{PATTERNS, PatternCtx};

/// Carries the parse context an ontology-mutating session needs: which
/// files have been loaded, which referent definition files are pending,
/// and whether load errors are collected or rethrown.
#[derive(Debug, Default)]
pub struct ParseDriver {
    /// Collect definition-load errors instead of failing on the first.
    pub collect_errors: bool,
    /// Errors collected while `collect_errors` was set.
    pub errors: Vec<Error>,
    loaded_files: FxHashSet<PathBuf>,
    pending_referents: Vec<crate::base::TokenString>,
}

impl ParseDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an ontology from a definitions directory: every `.gen` file
    /// inside, in name order.
    pub fn load_ontology(&mut self, dir: impl Into<PathBuf>) -> Result<Ontology> {
        let dir = dir.into();
        let mut ontology = Ontology::with_definitions(&dir);
        self.load_definitions(&mut ontology, &dir)?;
        Ok(ontology)
    }

    /// Parse one statement and run the first matching pattern's action.
    ///
    /// Comments (`#`, `//`) and a trailing period are stripped first; a
    /// blank statement is a no-op.
    pub fn parse_and_execute(&mut self, ontology: &mut Ontology, input: &str) -> Result<()> {
        let statement = strip_comment(input).trim().trim_end_matches('.').trim();
        if statement.is_empty() {
            return Ok(());
        }
        let tokens = tokenize(statement);
        if tokens.is_empty() {
            return Ok(());
        }

        let mut cx = PatternCtx::default();
        let mut outcome = Err(Error::Grammatical {
            sentence: statement.to_string(),
            pattern: None,
            expected: "a sentence matching a known pattern".into(),
        });
        for pattern in PATTERNS {
            let mut m = Matcher::new(&tokens, statement, pattern.name);
            match (pattern.run)(&mut m, ontology, &mut cx) {
                Ok(()) => {
                    outcome = Ok(());
                    break;
                }
                Err(MatchFail::Backtrack) => continue,
                Err(MatchFail::Error(e)) => {
                    outcome = Err(e);
                    break;
                }
            }
        }
        self.pending_referents.extend(cx.created);
        if outcome.is_ok() {
            self.flush_pending(ontology);
        }
        outcome
    }

    /// Load every `.gen` file in a directory, in name order. Errors are
    /// collected into `self.errors` when `collect_errors` is set, and
    /// returned on the first failing line otherwise.
    pub fn load_definitions(&mut self, ontology: &mut Ontology, dir: &Path) -> Result<()> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| Error::DefinitionLoad {
                file: dir.display().to_string(),
                line: 0,
                statement: String::new(),
                source: Box::new(Error::Grammatical {
                    sentence: dir.display().to_string(),
                    pattern: None,
                    expected: format!("a readable definitions directory ({e})"),
                }),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "gen"))
            .collect();
        files.sort();
        for file in files {
            self.load_file(ontology, &file)?;
        }
        Ok(())
    }

    fn load_file(&mut self, ontology: &mut Ontology, path: &Path) -> Result<()> {
        if !self.loaded_files.insert(path.to_path_buf()) {
            return Ok(());
        }
        debug!(file = %path.display(), "loading definitions");
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "definition file unreadable");
                return Ok(());
            }
        };
        for (index, line) in text.lines().enumerate() {
            if let Err(e) = self.parse_and_execute(ontology, line) {
                let wrapped = Error::DefinitionLoad {
                    file: path.display().to_string(),
                    line: index + 1,
                    statement: line.trim().to_string(),
                    source: Box::new(e),
                };
                warn!(error = %wrapped, "statement failed");
                if self.collect_errors {
                    self.errors.push(wrapped);
                } else {
                    return Err(wrapped);
                }
            }
        }
        Ok(())
    }

    /// When a statement introduced new referents, look for per-referent
    /// definition files (`<name>.gen`). A missing file is logged at debug
    /// level and skipped.
    fn flush_pending(&mut self, ontology: &mut Ontology) {
        while let Some(name) = self.pending_referents.pop() {
            let Some(dir) = ontology.definitions_dir.clone() else {
                continue;
            };
            let path = dir.join(format!("{name}.gen"));
            if !path.exists() {
                debug!(referent = %name, file = %path.display(), "no definition file");
                continue;
            }
            if let Err(e) = self.load_file(ontology, &path) {
                if self.collect_errors {
                    self.errors.push(e);
                } else {
                    warn!(error = %e, "per-referent definitions failed");
                }
            }
        }
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let bytes = line.as_bytes();
    for i in 0..bytes.len() {
        match bytes[i] {
            b'"' => in_quotes = !in_quotes,
            b'#' if !in_quotes => return &line[..i],
            b'/' if !in_quotes && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
    }
    line
}
