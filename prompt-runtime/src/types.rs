use std::collections::BTreeMap;
use std::fmt;

use alloy::primitives::{Address, U256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::value::RawValue;

use crate::error::PromptError;

/// Backend-assigned request identifier.
///
/// Mech request ids are uint256 values and routinely exceed `u64`, so the
/// id is read from the raw JSON text instead of going through `f64`.
/// Accepts a bare JSON integer or a decimal / `0x` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(pub U256);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequestId {
    fn from(v: u64) -> Self {
        RequestId(U256::from(v))
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get().trim();
        let digits = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);
        digits
            .parse::<U256>()
            .map(RequestId)
            .map_err(|e| de::Error::custom(format!("invalid requestId {text}: {e}")))
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.0.to_string())
            .map_err(<S::Error as ser::Error>::custom)?;
        raw.serialize(serializer)
    }
}

/// Which model and backend tool produced a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptMetadata {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tool: String,
}

/// Response body of `GET /get-prompt`.
///
/// Missing fields fall back to their defaults; a field present with the
/// wrong JSON type is rejected as an unrecognized shape. Unknown top-level
/// fields are kept in `extra` and written back out on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptResult {
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
    pub result: String,
    pub prompt: String,
    /// Cost and usage figures reported by the backend. Not interpreted.
    pub cost_dict: serde_json::Map<String, serde_json::Value>,
    pub metadata: PromptMetadata,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// Hand-written so `requestId` still sees its raw JSON text; `#[serde(flatten)]`
// on the derive would buffer values and lose `RawValue` support.
impl<'de> Deserialize<'de> for PromptResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = BTreeMap::<String, Box<RawValue>>::deserialize(deserializer)?;

        let mut out = PromptResult::default();
        for (key, raw) in fields {
            match key.as_str() {
                "requestId" => out.request_id = parse_field(&key, &raw)?,
                "result" => out.result = parse_field(&key, &raw)?,
                "prompt" => out.prompt = parse_field(&key, &raw)?,
                "cost_dict" => out.cost_dict = parse_field(&key, &raw)?,
                "metadata" => out.metadata = parse_field(&key, &raw)?,
                _ => {
                    let value = parse_field(&key, &raw)?;
                    out.extra.insert(key.clone(), value);
                }
            }
        }
        Ok(out)
    }
}

fn parse_field<T: DeserializeOwned, E: de::Error>(key: &str, raw: &RawValue) -> Result<T, E> {
    serde_json::from_str(raw.get()).map_err(|e| E::custom(format!("field `{key}`: {e}")))
}

impl PromptResult {
    /// Parse a response body, classifying failures as malformed JSON or an
    /// unrecognized shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, PromptError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Wallet connection status as reported by the wallet collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletContext {
    pub address: Option<String>,
    pub connected: bool,
}

impl WalletContext {
    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            connected: true,
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Address to show in the prompt form, or `None` when disconnected.
    ///
    /// A connected wallet without an address shows as empty.
    pub fn display_address(&self) -> Option<String> {
        if !self.connected {
            return None;
        }
        Some(
            self.address
                .as_deref()
                .map(format_address)
                .unwrap_or_default(),
        )
    }
}

/// EIP-55 checksum form for EVM addresses, anything else verbatim.
pub fn format_address(raw: &str) -> String {
    raw.trim()
        .parse::<Address>()
        .map(|a| a.to_checksum(None))
        .unwrap_or_else(|_| raw.to_string())
}
