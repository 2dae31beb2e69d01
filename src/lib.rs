mod compile;
mod error;
mod operation;
mod types;

pub use error::PropFilterError;
pub use operation::{build_arg_string, SetProperties};
pub use types::{
    ApplyError, BlockList, ContextError, DataError, MaskedPropertySetter, MemoryContext,
    PropertyBlock, PropertySetter, PropertySetterManager, RenderContext, RuleDocument, Setter,
    StageRules, Value, RENDERTYPE_PROPERTY,
};
