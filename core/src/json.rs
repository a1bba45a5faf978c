//! The JSON request boundary: decode a payload, then validate it.
//!
//! Targets should carry `#[serde(default)]` so that missing keys decode to zero values and
//! surface as `required` violations instead of decode errors. Fields that may arrive as `null`
//! use [`null_as_default`] for the same reason.
use crate::validate::Validate;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

fn checked<T: Validate>(value: T) -> Result<T> {
    if let Err(errors) = value.validate() {
        tracing::debug!(%errors, "rejected payload");
        return Err(errors.into());
    }
    Ok(value)
}

pub fn from_str<T: DeserializeOwned + Validate>(s: &str) -> Result<T> {
    checked(serde_json::from_str(s)?)
}

pub fn from_slice<T: DeserializeOwned + Validate>(v: &[u8]) -> Result<T> {
    checked(serde_json::from_slice(v)?)
}

pub fn from_reader<R: std::io::Read, T: DeserializeOwned + Validate>(reader: R) -> Result<T> {
    checked(serde_json::from_reader(reader)?)
}

pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// `deserialize_with` helper: an explicit `null` decodes to the zero value, like a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Note {
        #[serde(deserialize_with = "null_as_default")]
        title: String,
        #[serde(deserialize_with = "null_as_default")]
        stars: i32,
    }

    #[test]
    fn test_null_as_default() {
        let note: Note = serde_json::from_str(r#"{"title": null, "stars": 3}"#).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.stars, 3);
        let note: Note = serde_json::from_str(r#"{"stars": null}"#).unwrap();
        assert_eq!(note.stars, 0);
        assert!(serde_json::from_str::<Note>(r#"{"stars": "x"}"#).is_err());
    }
}
