mod actions;
mod components;
mod criterion;
mod document;
mod enums;
mod extensions;
mod names;
mod step;
mod workflow;

pub use actions::{FailureAction, FailureActionEntry, SuccessAction, SuccessActionEntry};
pub use components::{Components, ReusableObject, Schema};
pub use criterion::{Criterion, CriterionExpressionType, CriterionType, JSONPATH_VERSION, XPATH_VERSIONS};
pub use document::{ArazzoDocument, Info, SourceDescription};
pub use enums::{
    ConditionType, ExpressionType, FailureActionType, ParameterLocation, SourceDescriptionType,
    SuccessActionType, WireEnum,
};
pub use extensions::{ExtensionKeyPolicy, Extensions, EXTENSION_PREFIX};
pub use names::FieldName;
pub(crate) use names::{is_declared, wire_name};
pub use step::{Parameter, ParameterEntry, PayloadReplacement, RequestBody, Step, StepTarget};
pub use workflow::Workflow;
