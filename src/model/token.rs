use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    /// Katakana reading; the surface text when no reading is known.
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub base_form: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub pos_detail: String,
}
