use std::fmt;

use log::debug;

use super::context::RenderContext;
use super::document::PropertyBlock;
use super::error::{ApplyError, DataError};
use super::value::Value;

/// The context property holding the current render pass classification.
pub const RENDERTYPE_PROPERTY: &str = "renderer:rendertype";

/// A single resolved property override.
///
/// Built from a [`PropertyBlock`] by the parse step. The name is fixed at
/// construction; the remaining fields stay plain and mutable so owning code
/// can adjust a setter before it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySetter {
    name: String,
    /// The value to write, after normalization.
    pub value: Value,
    /// Whether applying does anything at all.
    pub enabled: bool,
    /// Resolve the value through the context search path on the next apply.
    /// Cleared after the attempt; resolution is best effort.
    pub find_file: bool,
    /// Pattern gating which render types this applies to.
    pub rendertype: Option<String>,
}

impl PropertySetter {
    /// Build a setter from a property block, normalizing the value.
    #[must_use]
    pub fn new(name: impl Into<String>, block: PropertyBlock) -> Self {
        let mut setter = Self {
            name: name.into(),
            value: block.value,
            enabled: block.enabled,
            find_file: block.find_file,
            rendertype: block.rendertype,
        };
        setter.process_value();
        setter
    }

    /// The name of the property to set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cleanup of the raw value data.
    ///
    /// Numeric and boolean scalars are kept exactly as written. A
    /// single-element list collapses to its sole element, and a list holding
    /// at least one string has every element coerced to its string form.
    fn process_value(&mut self) {
        if self.value.is_plain_scalar() {
            return;
        }

        // A disabled setter never applies, so its value is left raw.
        if !self.enabled {
            return;
        }

        if let Value::List(items) = &mut self.value {
            if items.len() == 1 {
                let sole = items.remove(0);
                self.value = sole;
            }
        }

        if let Value::List(items) = &self.value {
            if items.iter().any(|item| matches!(item, Value::String(_))) {
                let coerced = items
                    .iter()
                    .map(|item| Value::String(item.to_text()))
                    .collect();
                self.value = Value::List(coerced);
            }
        }
    }

    /// Search-path resolution, deferred to apply time because the search
    /// path lives on the render context.
    fn resolve_file<C: RenderContext + ?Sized>(&mut self, ctx: &C) {
        self.find_file = false;

        if let Value::String(name) = &self.value {
            match ctx.find_file(name) {
                Some(found) => self.value = Value::String(found),
                None => debug!("could not resolve file '{name}' for '{}'", self.name),
            }
        }
    }

    /// Write the value into the render context, subject to gating.
    ///
    /// No-op when disabled, or when `rendertype` is set and the current
    /// `renderer:rendertype` does not match it. A missing context property
    /// counts as a non-match.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if the context rejects the write.
    pub fn apply<C: RenderContext + ?Sized>(&mut self, ctx: &mut C) -> Result<(), ApplyError> {
        if !self.enabled {
            return Ok(());
        }

        if self.find_file {
            self.resolve_file(ctx);
        }

        if let Some(pattern) = &self.rendertype {
            let matches = ctx
                .get_property(RENDERTYPE_PROPERTY)
                .is_some_and(|current| ctx.pattern_match(pattern, &current.to_text()));
            if !matches {
                return Ok(());
            }
        }

        debug!("setting property '{}' to {}", self.name, self.value);

        ctx.set_property(&self.name, &self.value)
            .map_err(|source| ApplyError {
                property: self.name.clone(),
                source,
            })
    }
}

/// A property setter gated on a second context property matching a mask.
///
/// The mask property name comes from the stage, not from user data: plane
/// rules mask against `plane:variable`, object-like rules against
/// `object:name`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedPropertySetter {
    setter: PropertySetter,
    mask: String,
    mask_property_name: String,
}

impl MaskedPropertySetter {
    /// Build a masked setter from a block carrying a `mask` key.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingMask`] if the block has no mask. This is
    /// only reachable through the setter factory, so hitting it indicates a
    /// caller defect rather than bad user data.
    pub fn new(
        name: impl Into<String>,
        mut block: PropertyBlock,
        mask_property_name: impl Into<String>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let mask = block
            .mask
            .take()
            .ok_or(DataError::MissingMask { name: name.clone() })?;

        Ok(Self {
            setter: PropertySetter::new(name, block),
            mask,
            mask_property_name: mask_property_name.into(),
        })
    }

    /// The mask pattern.
    #[must_use]
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// The context property the mask is compared against.
    #[must_use]
    pub fn mask_property_name(&self) -> &str {
        &self.mask_property_name
    }

    /// The wrapped plain setter.
    #[must_use]
    pub fn setter(&self) -> &PropertySetter {
        &self.setter
    }

    /// Mutable access to the wrapped plain setter.
    pub fn setter_mut(&mut self) -> &mut PropertySetter {
        &mut self.setter
    }

    /// Apply, first checking the mask against its context property.
    ///
    /// On a match this delegates to [`PropertySetter::apply`], which still
    /// re-checks `enabled` and `rendertype`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if the context rejects the write.
    pub fn apply<C: RenderContext + ?Sized>(&mut self, ctx: &mut C) -> Result<(), ApplyError> {
        let matches = ctx
            .get_property(&self.mask_property_name)
            .is_some_and(|current| ctx.pattern_match(&self.mask, &current.to_text()));
        if !matches {
            return Ok(());
        }

        self.setter.apply(ctx)
    }
}

/// A compiled override: plain or masked.
#[derive(Debug, Clone, PartialEq)]
pub enum Setter {
    Plain(PropertySetter),
    Masked(MaskedPropertySetter),
}

impl Setter {
    /// Apply this setter against the context.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] if the context rejects the write.
    pub fn apply<C: RenderContext + ?Sized>(&mut self, ctx: &mut C) -> Result<(), ApplyError> {
        match self {
            Setter::Plain(setter) => setter.apply(ctx),
            Setter::Masked(setter) => setter.apply(ctx),
        }
    }

    /// The name of the property being set.
    #[must_use]
    pub fn name(&self) -> &str {
        self.setter().name()
    }

    /// The underlying plain setter for either variant.
    #[must_use]
    pub fn setter(&self) -> &PropertySetter {
        match self {
            Setter::Plain(setter) => setter,
            Setter::Masked(masked) => masked.setter(),
        }
    }

    /// Mutable access to the underlying plain setter.
    pub fn setter_mut(&mut self) -> &mut PropertySetter {
        match self {
            Setter::Plain(setter) => setter,
            Setter::Masked(masked) => masked.setter_mut(),
        }
    }
}

impl fmt::Display for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setter::Plain(setter) => {
                write!(f, "PropertySetter {}={}", setter.name(), setter.value)
            }
            Setter::Masked(masked) => write!(
                f,
                "MaskedPropertySetter {}={} mask='{}'",
                masked.setter().name(),
                masked.setter().value,
                masked.mask(),
            ),
        }
    }
}
