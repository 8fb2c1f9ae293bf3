// src/envelope.rs
//! The persisted form of one encrypted secret
//!
//! Every field is hex text so the envelope can live in any text column or
//! document field. Documents written before the `scheme`/`tag` fields existed
//! (`{"encryptedData": "...", "iv": "..."}`) deserialize as CBC envelopes.

use serde::{Deserialize, Serialize};

use crate::enums::EnvelopeScheme;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretEnvelope {
    #[serde(alias = "encryptedData")]
    pub ciphertext: String,
    pub iv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub scheme: EnvelopeScheme,
}

impl SecretEnvelope {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn iv_bytes(&self) -> Result<Vec<u8>> {
        decode_field("iv", &self.iv)
    }

    pub(crate) fn ciphertext_bytes(&self) -> Result<Vec<u8>> {
        decode_field("ciphertext", &self.ciphertext)
    }

    pub(crate) fn tag_bytes(&self) -> Result<Option<Vec<u8>>> {
        self.tag
            .as_deref()
            .map(|tag| decode_field("tag", tag))
            .transpose()
    }
}

fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|source| CoreError::Encoding { field, source })
}
