/// One declared field of a node: the camelCase name used on the wire and the
/// snake_case identifier used by the typed model and in validator code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName {
    pub wire: &'static str,
    pub canonical: &'static str,
}

impl FieldName {
    pub const fn new(wire: &'static str, canonical: &'static str) -> Self {
        Self { wire, canonical }
    }
}

pub(crate) fn wire_name(table: &'static [FieldName], canonical: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|field| field.canonical == canonical)
        .map(|field| field.wire)
}

pub(crate) fn is_declared(table: &'static [FieldName], wire: &str) -> bool {
    table.iter().any(|field| field.wire == wire)
}
