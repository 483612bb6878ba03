use super::Codec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Stores any serde type as a JSON blob
pub struct JsonBytes<T>(PhantomData<fn() -> T>);

impl<T> JsonBytes<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonBytes<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonBytes<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonBytes<{}>", std::any::type_name::<T>())
    }
}

impl<T: Serialize + DeserializeOwned> Codec for JsonBytes<T> {
    type Value = T;
    type Stored = Vec<u8>;

    fn encode(&self, value: &T) -> Option<Vec<u8>> {
        serde_json::to_vec(value)
            .map_err(|e| tracing::debug!("JSON encoding failed: {}", e))
            .ok()
    }

    fn decode(&self, stored: &Vec<u8>) -> Option<T> {
        serde_json::from_slice(stored)
            .map_err(|e| tracing::debug!("JSON decoding failed: {}", e))
            .ok()
    }
}

/// Stores any serde type as JSON text
pub struct JsonString<T> {
    pretty: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonString<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            _marker: PhantomData,
        }
    }

    /// Write indented JSON
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonString<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonString<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonString")
            .field("type", &std::any::type_name::<T>())
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> Codec for JsonString<T> {
    type Value = T;
    type Stored = String;

    fn encode(&self, value: &T) -> Option<String> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded
            .map_err(|e| tracing::debug!("JSON encoding failed: {}", e))
            .ok()
    }

    fn decode(&self, stored: &String) -> Option<T> {
        serde_json::from_str(stored)
            .map_err(|e| tracing::debug!("JSON decoding failed: {}", e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Window {
        width: u32,
        height: u32,
        title: String,
    }

    fn window() -> Window {
        Window {
            width: 800,
            height: 600,
            title: "Main".into(),
        }
    }

    #[test]
    fn test_struct_as_json_text() {
        let codec = JsonString::<Window>::new();
        let stored = codec.encode(&window()).unwrap();
        assert_eq!(stored, r#"{"width":800,"height":600,"title":"Main"}"#);
        assert_eq!(codec.decode(&stored), Some(window()));
    }

    #[test]
    fn test_struct_as_json_blob() {
        let codec = JsonBytes::<Window>::new();
        let stored = codec.encode(&window()).unwrap();
        assert_eq!(codec.decode(&stored), Some(window()));
        assert_eq!(codec.decode(&b"{\"width\":1}".to_vec()), None);
    }

    #[test]
    fn test_collection_as_single_blob() {
        let codec = JsonString::<BTreeMap<String, Vec<Window>>>::pretty();
        let mut value = BTreeMap::new();
        value.insert("screens".to_string(), vec![window(), window()]);
        let stored = codec.encode(&value).unwrap();
        assert!(stored.contains('\n'));
        assert_eq!(codec.decode(&stored), Some(value));
    }

    #[test]
    fn test_malformed_json() {
        let codec = JsonString::<Window>::new();
        assert_eq!(codec.decode(&"{".to_string()), None);
    }
}
