use serde::Deserialize;
use serde_json::{Map, Value};

/// One page of NFT holdings as returned by the indexing service.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct NftPage {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub result: Vec<Nft>,
}

impl NftPage {
    /// Number of pieces held; falls back to the page length when the service omits it.
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(self.result.len() as u64)
    }

    /// NFTs whose contract name equals `collection_name`, in service order.
    pub fn in_collection<'a>(&'a self, collection_name: &'a str) -> impl Iterator<Item = &'a Nft> + 'a {
        self.result
            .iter()
            .filter(move |nft| nft.name.as_deref() == Some(collection_name))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Nft {
    pub token_id: String,
    /// Name of the NFT contract, e.g. "Art Blocks".
    #[serde(default)]
    pub name: Option<String>,
    /// Raw token metadata as a JSON-encoded string.
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Outcome of decoding an NFT's metadata string.
#[derive(Debug, Clone, PartialEq)]
pub enum NftMetadata {
    Valid(Map<String, Value>),
    Missing,
    Invalid(String),
}

impl Nft {
    pub fn parsed_metadata(&self) -> NftMetadata {
        match self.metadata.as_deref().map(str::trim) {
            None | Some("") => NftMetadata::Missing,
            Some(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => NftMetadata::Valid(map),
                Ok(other) => NftMetadata::Invalid(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )),
                Err(e) => NftMetadata::Invalid(e.to_string()),
            },
        }
    }

    /// Title for a card: the metadata name, else the contract name and token id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.parsed_metadata().name() {
            return name.to_string();
        }
        match &self.name {
            Some(contract) => format!("{} #{}", contract, self.token_id),
            None => format!("#{}", self.token_id),
        }
    }

    /// Rendered image location. Uses the metadata `tokenID` and falls back to the
    /// on-chain token id when metadata is unusable.
    pub fn image_url(&self, image_base_url: &str) -> String {
        let token_id = self
            .parsed_metadata()
            .token_id()
            .unwrap_or_else(|| self.token_id.clone());
        format!("{}/{}", image_base_url.trim_end_matches('/'), token_id)
    }
}

impl NftMetadata {
    pub fn is_valid(&self) -> bool {
        matches!(self, NftMetadata::Valid(_))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            NftMetadata::Valid(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        }
    }

    /// `tokenID` may be encoded as a string or a number.
    pub fn token_id(&self) -> Option<String> {
        let NftMetadata::Valid(map) = self else {
            return None;
        };
        match map.get("tokenID")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
