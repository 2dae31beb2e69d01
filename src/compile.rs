use std::collections::HashMap;

use log::{debug, warn};

use crate::types::{
    BlockList, DataError, MaskedPropertySetter, PropertyBlock, PropertySetter, RuleDocument,
    Setter, StageRules,
};

/// The prefix marking a stage entry as a render-type wrapper.
const RENDERTYPE_WRAPPER_PREFIX: &str = "rendertype:";

/// Mask property for geometry-plane rules.
const PLANE_MASK_PROPERTY: &str = "plane:variable";

/// Mask property for object-like rules (fog, light, instance).
const OBJECT_MASK_PROPERTY: &str = "object:name";

/// Expand a rule document into setters, appending to the stage registry.
///
/// Disabled stages are skipped without creating a registry entry. Blocks
/// under a `rendertype:<type>` wrapper get `rendertype` injected before
/// normal processing, overwriting any explicit value they carry.
pub(crate) fn load_document(
    document: RuleDocument,
    registry: &mut HashMap<String, Vec<Setter>>,
) -> Result<(), DataError> {
    for (stage_name, stage_value) in document.0 {
        let stage: StageRules =
            serde_json::from_value(stage_value).map_err(|source| DataError::InvalidStage {
                stage: stage_name.clone(),
                source,
            })?;

        if stage.disabled {
            debug!("stage entry disabled: {stage_name}");
            continue;
        }

        let setters = registry.entry(stage_name.clone()).or_default();

        for (entry_name, raw) in stage.entries {
            if let Some(rendertype) = entry_name.strip_prefix(RENDERTYPE_WRAPPER_PREFIX) {
                let wrapped: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_value(raw).map_err(|source| DataError::InvalidBlock {
                        stage: stage_name.clone(),
                        name: entry_name.clone(),
                        source,
                    })?;

                for (property_name, child) in wrapped {
                    for mut block in parse_blocks(&stage_name, &property_name, child)? {
                        block.rendertype = Some(rendertype.to_owned());
                        setters.push(create_setter(&stage_name, &property_name, block)?);
                    }
                }
            } else {
                for block in parse_blocks(&stage_name, &entry_name, raw)? {
                    setters.push(create_setter(&stage_name, &entry_name, block)?);
                }
            }
        }
    }

    Ok(())
}

/// Validate a raw entry body into a list of blocks. A bare block is treated
/// as a singleton list.
fn parse_blocks(
    stage: &str,
    name: &str,
    raw: serde_json::Value,
) -> Result<Vec<PropertyBlock>, DataError> {
    let list: BlockList =
        serde_json::from_value(raw).map_err(|source| DataError::InvalidBlock {
            stage: stage.to_owned(),
            name: name.to_owned(),
            source,
        })?;

    Ok(list.into_vec())
}

/// Build the right setter for a block.
///
/// A `mask` key selects a masked setter for the stages that support masking;
/// any other stage logs a warning and falls back to a plain setter with the
/// mask ignored.
fn create_setter(
    stage_name: &str,
    property_name: &str,
    block: PropertyBlock,
) -> Result<Setter, DataError> {
    if block.mask.is_some() {
        match stage_name {
            "plane" => {
                return Ok(Setter::Masked(MaskedPropertySetter::new(
                    property_name,
                    block,
                    PLANE_MASK_PROPERTY,
                )?));
            }
            "fog" | "light" | "instance" => {
                return Ok(Setter::Masked(MaskedPropertySetter::new(
                    property_name,
                    block,
                    OBJECT_MASK_PROPERTY,
                )?));
            }
            _ => {
                warn!("no masking available for {stage_name}:{property_name}");
            }
        }
    }

    Ok(Setter::Plain(PropertySetter::new(property_name, block)))
}
