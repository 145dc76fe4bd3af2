use serde::Serialize;

/// Closed string enumeration as it appears on the wire.
pub trait WireEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [(&'static str, Self)];

    fn from_wire(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(wire, _)| *wire == value)
            .map(|(_, variant)| *variant)
    }

    fn allowed() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|(wire, _)| *wire).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceDescriptionType {
    Arazzo,
    Openapi,
}

impl WireEnum for SourceDescriptionType {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("arazzo", Self::Arazzo), ("openapi", Self::Openapi)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl WireEnum for ParameterLocation {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("path", Self::Path),
        ("query", Self::Query),
        ("header", Self::Header),
        ("cookie", Self::Cookie),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    Simple,
    Regex,
    Jsonpath,
    Xpath,
}

impl WireEnum for ConditionType {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("simple", Self::Simple),
        ("regex", Self::Regex),
        ("jsonpath", Self::Jsonpath),
        ("xpath", Self::Xpath),
    ];
}

impl ConditionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionType::Simple => "simple",
            ConditionType::Regex => "regex",
            ConditionType::Jsonpath => "jsonpath",
            ConditionType::Xpath => "xpath",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionType {
    Jsonpath,
    Xpath,
}

impl WireEnum for ExpressionType {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("jsonpath", Self::Jsonpath), ("xpath", Self::Xpath)];
}

impl ExpressionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpressionType::Jsonpath => "jsonpath",
            ExpressionType::Xpath => "xpath",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessActionType {
    End,
    Goto,
}

impl WireEnum for SuccessActionType {
    const VARIANTS: &'static [(&'static str, Self)] = &[("end", Self::End), ("goto", Self::Goto)];
}

impl SuccessActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            SuccessActionType::End => "end",
            SuccessActionType::Goto => "goto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureActionType {
    End,
    Goto,
    Retry,
}

impl WireEnum for FailureActionType {
    const VARIANTS: &'static [(&'static str, Self)] =
        &[("end", Self::End), ("goto", Self::Goto), ("retry", Self::Retry)];
}

impl FailureActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureActionType::End => "end",
            FailureActionType::Goto => "goto",
            FailureActionType::Retry => "retry",
        }
    }
}
