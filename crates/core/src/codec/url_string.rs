use super::Codec;
use url::Url;

/// Stores URLs as their absolute string form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UrlString;

impl Codec for UrlString {
    type Value = Url;
    type Stored = String;

    fn encode(&self, value: &Url) -> Option<String> {
        Some(value.as_str().to_owned())
    }

    fn decode(&self, stored: &String) -> Option<Url> {
        Url::parse(stored).ok()
    }
}
