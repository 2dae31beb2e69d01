mod context;
mod document;
mod error;
mod manager;
mod setter;
mod value;

pub use context::{ContextError, MemoryContext, RenderContext};
pub use document::{BlockList, PropertyBlock, RuleDocument, StageRules};
pub use error::{ApplyError, DataError};
pub use manager::PropertySetterManager;
pub use setter::{MaskedPropertySetter, PropertySetter, Setter, RENDERTYPE_PROPERTY};
pub use value::Value;
