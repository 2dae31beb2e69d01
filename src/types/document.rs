use serde::{Deserialize, Serialize};
use serde_json::Map;

use super::value::Value;

/// A parsed rule document: an ordered map from stage name to the raw stage
/// rules.
///
/// Stage values stay as raw JSON here; they are validated into [`StageRules`]
/// and [`PropertyBlock`]s when handed to
/// [`PropertySetterManager::parse()`](super::PropertySetterManager::parse),
/// so a bad stage entry can be reported with the stage and property that
/// caused it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleDocument(pub Map<String, serde_json::Value>);

/// The rules for a single filter stage.
///
/// `disabled` is reserved; every other key is either a property name mapping
/// to a block (or list of blocks), or a `rendertype:<type>` wrapper mapping
/// property names to blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct StageRules {
    /// Skip this entire stage at parse time.
    #[serde(default)]
    pub disabled: bool,

    /// The remaining entries, in declaration order.
    #[serde(flatten)]
    pub entries: Map<String, serde_json::Value>,
}

/// A single property override as written in the rule document.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyBlock {
    /// The value to set. Required.
    pub value: Value,

    /// Whether this override is active. Defaults to true.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Resolve the value as a search-path file lookup before setting.
    #[serde(default, rename = "findfile")]
    pub find_file: bool,

    /// Only apply when the current render type matches this pattern.
    #[serde(default)]
    pub rendertype: Option<String>,

    /// Only apply when the stage's mask property matches this pattern.
    /// Presence selects a masked setter during compilation.
    #[serde(default)]
    pub mask: Option<String>,
}

/// A property entry body: either a single block or an ordered list of blocks.
///
/// A list sets the same property several times with different gating (for
/// example different masks); each element becomes an independent setter.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BlockList {
    /// A bare block.
    One(PropertyBlock),
    /// Several blocks for the same property name.
    Many(Vec<PropertyBlock>),
}

impl BlockList {
    /// Normalize to a list of blocks. A bare block becomes a singleton.
    #[must_use]
    pub fn into_vec(self) -> Vec<PropertyBlock> {
        match self {
            BlockList::One(block) => vec![block],
            BlockList::Many(blocks) => blocks,
        }
    }
}

fn default_true() -> bool {
    true
}
