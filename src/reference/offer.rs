//! Offer Characteristic
//!
//! One characteristic definition from the config card reference, e.g.
//!
//! ```json
//! { "isAvailable": true, "required": true, "useOnlyDictionaryValues": true,
//!   "type": "Основной цвет", "dictionary": "/colors" }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ReferenceError;

/// Keys that must be present in every entry
const REQUIRED_KEYS: [&str; 4] = ["isAvailable", "required", "useOnlyDictionaryValues", "type"];

/// Offer characteristic definition (immutable after decoding)
///
/// Every decoding path, `serde` included, goes through [`Self::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferCharacteristic {
    #[serde(rename = "isAvailable")]
    available: bool,

    required: bool,

    #[serde(rename = "useOnlyDictionaryValues")]
    only_dictionary: bool,

    #[serde(rename = "type")]
    characteristic_type: String,

    dictionary: Option<String>,
}

/// Wire shape of an entry, decoded once the required keys are known present
#[derive(Deserialize)]
struct OfferRow {
    #[serde(rename = "isAvailable")]
    available: bool,
    required: bool,
    #[serde(rename = "useOnlyDictionaryValues")]
    only_dictionary: bool,
    #[serde(rename = "type")]
    characteristic_type: String,
    #[serde(default)]
    dictionary: Option<String>,
}

impl From<OfferRow> for OfferCharacteristic {
    fn from(row: OfferRow) -> Self {
        Self {
            available: row.available,
            required: row.required,
            only_dictionary: row.only_dictionary,
            characteristic_type: row.characteristic_type,
            dictionary: row.dictionary,
        }
    }
}

impl OfferCharacteristic {
    /// Decode a single reference entry
    ///
    /// Absent required keys fail with [`ReferenceError::MissingField`] rather
    /// than defaulting. `dictionary` may be absent or `null`.
    pub fn from_value(value: &Value) -> Result<Self, ReferenceError> {
        let object = value.as_object().ok_or(ReferenceError::NotAnObject)?;

        if let Some(key) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(ReferenceError::MissingField(*key));
        }

        Ok(OfferRow::deserialize(value)?.into())
    }

    /// Whether the characteristic may be supplied for this category
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Whether the marketplace mandates a value
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether values must come from the dictionary
    pub fn is_only_dictionary(&self) -> bool {
        self.only_dictionary
    }

    pub fn characteristic_type(&self) -> &str {
        &self.characteristic_type
    }

    /// Reference path of the controlled vocabulary, e.g. `/colors`
    pub fn dictionary(&self) -> Option<&str> {
        self.dictionary.as_deref()
    }
}

impl<'de> Deserialize<'de> for OfferCharacteristic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&Value> for OfferCharacteristic {
    type Error = ReferenceError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Decode a list of offer characteristics, stopping at the first bad entry
pub fn decode_offers(payload: &Value) -> Result<Vec<OfferCharacteristic>, ReferenceError> {
    let entries = payload.as_array().ok_or(ReferenceError::NotAnArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            OfferCharacteristic::from_value(entry).map_err(|e| ReferenceError::Entry {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}
