//! Serde helpers for wire-format quirks of the Gemini API.

/// Deserializes an optional string into an `Option<i64>`.
///
/// The API encodes int64 fields as JSON strings.
pub fn deserialize_optional_string_to_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Option::<String>::deserialize(deserializer)?
        .map(|s| s.parse::<i64>().map_err(serde::de::Error::custom))
        .transpose()
}

/// Custom serialization/deserialization for mime::Mime as a string.
pub(crate) mod mime_as_string {
    use mime::Mime;
    use serde::{self, de, Deserialize, Deserializer, Serializer};

    /// Serializes a `Mime` as a string.
    pub fn serialize<S>(value: &Mime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.to_string().as_str())
    }

    /// Deserializes a string into a `Mime`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Mime, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}
