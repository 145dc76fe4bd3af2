use super::enums::{ConditionType, ExpressionType};
use super::extensions::Extensions;
use super::names::FieldName;
use serde::Serialize;

pub const JSONPATH_VERSION: &str = "draft-goessner-dispatch-jsonpath-00";
pub const XPATH_VERSIONS: [&str; 3] = ["xpath-10", "xpath-20", "xpath-30"];

/// Dialect and version of an expression-based criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionExpressionType {
    #[serde(rename = "type")]
    pub expression_type: ExpressionType,
    pub version: String,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl CriterionExpressionType {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("type", "expression_type"),
        FieldName::new("version", "version"),
    ];
}

/// `type` of a criterion: a bare tag or an expression-type object,
/// discriminated by the shape of the raw value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CriterionType {
    Condition(ConditionType),
    Expression(CriterionExpressionType),
}

impl Default for CriterionType {
    fn default() -> Self {
        CriterionType::Condition(ConditionType::Simple)
    }
}

impl CriterionType {
    /// jsonpath or xpath when the criterion is expression based.
    pub fn expression_dialect(&self) -> Option<ExpressionType> {
        match self {
            CriterionType::Condition(ConditionType::Jsonpath) => Some(ExpressionType::Jsonpath),
            CriterionType::Condition(ConditionType::Xpath) => Some(ExpressionType::Xpath),
            CriterionType::Condition(_) => None,
            CriterionType::Expression(expression) => Some(expression.expression_type),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CriterionType::Condition(condition) => condition.as_str(),
            CriterionType::Expression(expression) => expression.expression_type.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub condition: String,
    #[serde(rename = "type")]
    pub criterion_type: CriterionType,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Criterion {
    pub(crate) const FIELDS: &'static [FieldName] = &[
        FieldName::new("context", "context"),
        FieldName::new("condition", "condition"),
        FieldName::new("type", "criterion_type"),
    ];

    pub fn expression_dialect(&self) -> Option<ExpressionType> {
        self.criterion_type.expression_dialect()
    }
}
