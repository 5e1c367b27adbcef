//! Wire helpers shared by the revision records
//!
//! Google REST APIs encode `int64` fields as JSON strings. Hand-written
//! fixtures often use plain numbers, so both are accepted on input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Encryption key reference attached to a disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEncryptionKey {
    /// Cloud KMS key resource name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kms_key_name: String,

    /// Service account used to access the key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kms_key_service_account: String,
}

/// `int64` carried as a decimal string
pub(crate) mod int64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrInt {
            String(String),
            Int(i64),
        }

        // An explicit null decodes like a missing field
        match Option::<StringOrInt>::deserialize(deserializer)? {
            None => Ok(0),
            Some(StringOrInt::String(s)) if s.trim().is_empty() => Ok(0),
            Some(StringOrInt::String(s)) => s.trim().parse().map_err(de::Error::custom),
            Some(StringOrInt::Int(n)) => Ok(n),
        }
    }
}
