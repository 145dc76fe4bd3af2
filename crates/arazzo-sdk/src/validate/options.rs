use crate::documents::ExtensionKeyPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidateOptions {
    #[serde(default)]
    pub extension_keys: ExtensionKeyPolicy,
}
