use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::context::RenderContext;
use super::document::RuleDocument;
use super::error::{ApplyError, DataError};
use super::setter::Setter;
use crate::error::PropFilterError;

/// Builds and owns the stage-indexed setter registry.
///
/// Rule data arrives as parsed [`RuleDocument`]s, inline JSON strings, or
/// files; repeated parses merge by appending, so rules from several sources
/// accumulate in declaration order. Applying a stage runs its setters in that
/// order against the render context.
///
/// # Example
///
/// ```
/// use propfilter::{MemoryContext, PropertySetterManager, Value};
///
/// let mut manager = PropertySetterManager::new();
/// manager
///     .parse_string(r#"{"camera": {"camera:focal": {"value": 50}}}"#)
///     .unwrap();
///
/// let mut ctx = MemoryContext::new();
/// manager.apply("camera", &mut ctx).unwrap();
/// assert_eq!(ctx.get("camera:focal"), Some(&Value::Int(50)));
/// ```
#[derive(Debug, Default)]
pub struct PropertySetterManager {
    properties: HashMap<String, Vec<Setter>>,
}

impl PropertySetterManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a parsed rule document into the registry.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] for a malformed stage or property block. The
    /// failing document may be partially merged; parsing is fail-fast, not
    /// transactional.
    pub fn parse(&mut self, document: RuleDocument) -> Result<(), DataError> {
        crate::compile::load_document(document, &mut self.properties)
    }

    /// Parse rule data from a JSON string and merge it.
    ///
    /// # Errors
    ///
    /// Returns [`PropFilterError`] on invalid JSON or malformed rule data.
    pub fn parse_string(&mut self, text: &str) -> Result<(), PropFilterError> {
        let document: RuleDocument = serde_json::from_str(text)?;
        self.parse(document)?;
        Ok(())
    }

    /// Read rule data from a JSON file and merge it.
    ///
    /// # Errors
    ///
    /// Returns [`PropFilterError`] on I/O failure, invalid JSON, or malformed
    /// rule data.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), PropFilterError> {
        let path = path.as_ref();
        debug!("reading properties from {}", path.display());

        let text = std::fs::read_to_string(path)?;
        self.parse_string(&text)
    }

    /// Apply all setters registered for a stage, in declaration order.
    ///
    /// A stage with no registered setters is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApplyError`] a setter produces; remaining setters
    /// for the stage are not run.
    pub fn apply<C: RenderContext + ?Sized>(
        &mut self,
        stage: &str,
        ctx: &mut C,
    ) -> Result<(), ApplyError> {
        if let Some(setters) = self.properties.get_mut(stage) {
            for setter in setters {
                setter.apply(ctx)?;
            }
        }

        Ok(())
    }

    /// Whether any stage has at least one setter.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        self.properties.values().any(|setters| !setters.is_empty())
    }

    /// The setters registered for a stage, in declaration order.
    #[must_use]
    pub fn stage(&self, stage: &str) -> Option<&[Setter]> {
        self.properties.get(stage).map(Vec::as_slice)
    }

    /// Iterate over the registered stage names.
    pub fn stages(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::context::MemoryContext;
    use crate::types::value::Value;

    const CAMERA_RULES: &str = r#"{"camera": {"camera:focal": {"value": 50}}}"#;

    #[test]
    fn empty_manager_has_no_rules() {
        assert!(!PropertySetterManager::new().has_rules());
    }

    #[test]
    fn parse_string_registers_setters() {
        let mut manager = PropertySetterManager::new();
        manager.parse_string(CAMERA_RULES).unwrap();
        assert!(manager.has_rules());
        assert_eq!(manager.stage("camera").unwrap().len(), 1);
    }

    #[test]
    fn parse_merges_by_appending() {
        let mut manager = PropertySetterManager::new();
        manager.parse_string(CAMERA_RULES).unwrap();
        manager.parse_string(CAMERA_RULES).unwrap();
        assert_eq!(manager.stage("camera").unwrap().len(), 2);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let mut manager = PropertySetterManager::new();
        let err = manager.parse_string("not json").unwrap_err();
        assert!(matches!(err, PropFilterError::Parse(_)));
    }

    #[test]
    fn malformed_block_is_a_data_error() {
        let mut manager = PropertySetterManager::new();
        let err = manager
            .parse_string(r#"{"camera": {"camera:focal": {"enabled": true}}}"#)
            .unwrap_err();
        assert!(matches!(err, PropFilterError::Data(_)));
    }

    #[test]
    fn load_file_missing_path_is_an_io_error() {
        let mut manager = PropertySetterManager::new();
        let err = manager.load_file("/nonexistent/rules.json").unwrap_err();
        assert!(matches!(err, PropFilterError::Io(_)));
    }

    #[test]
    fn apply_unknown_stage_is_a_noop() {
        let mut manager = PropertySetterManager::new();
        manager.parse_string(CAMERA_RULES).unwrap();

        let mut ctx = MemoryContext::new();
        manager.apply("light", &mut ctx).unwrap();
        assert_eq!(ctx.get("camera:focal"), None);
    }

    #[test]
    fn apply_writes_stage_setters() {
        let mut manager = PropertySetterManager::new();
        manager.parse_string(CAMERA_RULES).unwrap();

        let mut ctx = MemoryContext::new();
        manager.apply("camera", &mut ctx).unwrap();
        assert_eq!(ctx.get("camera:focal"), Some(&Value::Int(50)));
    }

    #[test]
    fn parse_after_apply_is_visible_to_later_applies() {
        let mut manager = PropertySetterManager::new();
        manager.parse_string(CAMERA_RULES).unwrap();

        let mut ctx = MemoryContext::new();
        manager.apply("camera", &mut ctx).unwrap();

        manager
            .parse_string(r#"{"camera": {"camera:shutter": {"value": 0.25}}}"#)
            .unwrap();
        manager.apply("camera", &mut ctx).unwrap();
        assert_eq!(ctx.get("camera:shutter"), Some(&Value::Float(0.25)));
    }

    #[test]
    fn stages_lists_registered_names() {
        let mut manager = PropertySetterManager::new();
        manager.parse_string(CAMERA_RULES).unwrap();
        let stages: Vec<&str> = manager.stages().collect();
        assert_eq!(stages, ["camera"]);
    }
}
