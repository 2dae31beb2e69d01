use std::collections::HashMap;
use std::path::PathBuf;

use log::debug;

use super::value::Value;

/// Error produced by a render context write.
///
/// Contexts are host-owned, so the concrete failure type is theirs; the core
/// only forwards it.
pub type ContextError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Access to the live render being filtered.
///
/// The core never talks to the renderer directly. Everything it needs --
/// reading the current render type, writing an overridden property, wildcard
/// matching, search-path file lookup -- goes through this trait, so the
/// engine can be driven by a host binding or by [`MemoryContext`] in tests.
pub trait RenderContext {
    /// Read the current value of a named property.
    /// Returns `None` if the property is not known to the render.
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Write a property value into the render.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] if the render rejects the write.
    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), ContextError>;

    /// Wildcard-match `candidate` against `pattern`.
    fn pattern_match(&self, pattern: &str, candidate: &str) -> bool;

    /// Resolve a file name against the render search path.
    /// Returns `None` when nothing matches; lookup is best effort.
    fn find_file(&self, name: &str) -> Option<String>;
}

/// An in-memory [`RenderContext`] for tests, demos, and standalone use.
///
/// Properties live in a flat name → value map. Pattern matching follows the
/// host convention: a pattern is a whitespace-separated list of glob tokens,
/// evaluated left to right, where a `^` prefix excludes matches again
/// (`"spot* ^spotBounce"` matches `spotKey` but not `spotBounce`).
#[derive(Debug, Clone, Default)]
pub struct MemoryContext {
    values: HashMap<String, Value>,
    search_path: Vec<PathBuf>,
}

impl MemoryContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value, builder style.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Insert a property value (mutable reference version).
    pub fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    /// Look up a property value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Add a directory to the file search path, builder style.
    #[must_use]
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_path.push(dir.into());
        self
    }
}

impl RenderContext for MemoryContext {
    fn get_property(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), ContextError> {
        self.values.insert(name.to_owned(), value.clone());
        Ok(())
    }

    fn pattern_match(&self, pattern: &str, candidate: &str) -> bool {
        let mut matched = false;

        for token in pattern.split_whitespace() {
            let (negated, token) = match token.strip_prefix('^') {
                Some(rest) => (true, rest),
                None => (false, token),
            };

            let compiled = match glob::Pattern::new(token) {
                Ok(compiled) => compiled,
                Err(err) => {
                    debug!("ignoring unparseable pattern token '{token}': {err}");
                    continue;
                }
            };

            if compiled.matches(candidate) {
                matched = !negated;
            }
        }

        matched
    }

    fn find_file(&self, name: &str) -> Option<String> {
        for dir in &self.search_path {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Some(candidate.to_string_lossy().into_owned());
            }
        }
        None
    }
}
