use std::path::Path;

use crate::error::PropFilterError;
use crate::types::{ApplyError, PropertySetterManager, RenderContext};

/// Build the argument string handing rule data to a filter process.
///
/// Produces `--properties="<json-with-escaped-quotes>"` and/or
/// `--properties-file=<path>`, space-joined, omitting absent parts. Pure and
/// stateless; the receiving side reverses the quote escaping before parsing.
#[must_use]
pub fn build_arg_string(
    properties: Option<&serde_json::Value>,
    properties_file: Option<&Path>,
) -> String {
    let mut args = Vec::new();

    if let Some(properties) = properties {
        let payload = properties.to_string().replace('"', "\\\"");
        args.push(format!("--properties=\"{payload}\""));
    }

    if let Some(path) = properties_file {
        args.push(format!("--properties-file={}", path.display()));
    }

    args.join(" ")
}

/// The property-override filter operation.
///
/// Owns a [`PropertySetterManager`] and wires it to the host's per-element
/// filter callbacks: the host feeds the repeated `--properties` /
/// `--properties-file` occurrences through [`process_args()`](Self::process_args)
/// once, then invokes the matching `filter_*` method for every element being
/// filtered. Stages without a dedicated callback (`plane`, `fog`) are applied
/// through the manager directly.
#[derive(Debug, Default)]
pub struct SetProperties {
    manager: PropertySetterManager,
}

impl SetProperties {
    /// Create the operation with an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The owned property manager.
    #[must_use]
    pub fn property_manager(&self) -> &PropertySetterManager {
        &self.manager
    }

    /// Mutable access to the owned property manager.
    pub fn property_manager_mut(&mut self) -> &mut PropertySetterManager {
        &mut self.manager
    }

    /// Parse every inline payload and rule file, in the order supplied.
    ///
    /// # Errors
    ///
    /// Returns [`PropFilterError`] on the first payload or file that fails to
    /// parse or load.
    pub fn process_args<P: AsRef<Path>>(
        &mut self,
        properties: &[String],
        property_files: &[P],
    ) -> Result<(), PropFilterError> {
        for text in properties {
            self.manager.parse_string(text)?;
        }

        for path in property_files {
            self.manager.load_file(path)?;
        }

        Ok(())
    }

    /// Whether the operation has any work to do. Purely an optimization for
    /// the host; applying with no rules is already a no-op.
    #[must_use]
    pub fn should_run(&self) -> bool {
        self.manager.has_rules()
    }

    /// Apply camera properties.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if a context write fails.
    pub fn filter_camera<C: RenderContext + ?Sized>(
        &mut self,
        ctx: &mut C,
    ) -> Result<(), ApplyError> {
        self.manager.apply("camera", ctx)
    }

    /// Apply object instance properties.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if a context write fails.
    pub fn filter_instance<C: RenderContext + ?Sized>(
        &mut self,
        ctx: &mut C,
    ) -> Result<(), ApplyError> {
        self.manager.apply("instance", ctx)
    }

    /// Apply light properties.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if a context write fails.
    pub fn filter_light<C: RenderContext + ?Sized>(
        &mut self,
        ctx: &mut C,
    ) -> Result<(), ApplyError> {
        self.manager.apply("light", ctx)
    }
}
