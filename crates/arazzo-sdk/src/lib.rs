pub mod documents;
pub mod parse;
pub mod validate;

pub use documents::{
    ArazzoDocument, Components, ConditionType, Criterion, CriterionExpressionType, CriterionType,
    ExpressionType, ExtensionKeyPolicy, Extensions, FailureAction, FailureActionEntry,
    FailureActionType, Info, Parameter, ParameterEntry, ParameterLocation, PayloadReplacement,
    RequestBody, ReusableObject, Schema, SourceDescription, SourceDescriptionType, Step, StepTarget,
    SuccessAction, SuccessActionEntry, SuccessActionType, Workflow,
};
pub use parse::{parse_document, parse_document_with_options, DocumentFormat, ParseDocumentOptions};
pub use validate::{validate_document, validate_document_with_options, ValidateOptions};
