//! Request and response bodies of the JSON API

use std::borrow::Cow;
use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `PUT /texts/{code}`.
///
/// Decoding is lenient:
/// - a missing or `null` `text`, and a bare `null` body, all read as empty
/// - keys match `text` ignoring ASCII case; the last matching key wins
/// - unknown keys are skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateTextRequest {
    pub text: String,
}

impl UpdateTextRequest {
    /// Decode the first JSON value of a request body; anything after it is
    /// ignored. An empty body is an error.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::Deserializer::from_slice(body)
            .into_iter::<Self>()
            .next()
            .unwrap_or_else(|| Err(de::Error::custom("empty body")))
    }
}

impl<'de> Deserialize<'de> for UpdateTextRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UpdateTextVisitor)
    }
}

struct UpdateTextVisitor;

impl<'de> Visitor<'de> for UpdateTextVisitor {
    type Value = UpdateTextRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a `text` string, or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(UpdateTextRequest::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = UpdateTextRequest::default();
        while let Some(key) = map.next_key::<Cow<'de, str>>()? {
            if key.eq_ignore_ascii_case("text") {
                // null leaves the previous value in place
                if let Some(text) = map.next_value::<Option<String>>()? {
                    request.text = text;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

/// Returned by create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeResponse {
    pub code: String,
}

/// Returned by get
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResponse {
    pub code: String,
    pub text: String,
}

/// Uniform error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}
