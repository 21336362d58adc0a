//! Scryfall metadata client.

use async_trait::async_trait;
use cardshop_commerce::catalog::CardMetadata;
use cardshop_commerce::CardId;
use serde::Deserialize;

use crate::lookup::{CardLookup, LookupError};
use crate::timeout::TimeoutConfig;

/// Public Scryfall API.
pub const SCRYFALL_BASE_URL: &str = "https://api.scryfall.com";

/// Default `User-Agent`; Scryfall rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("cardshop/", env!("CARGO_PKG_VERSION"));

/// Looks cards up with Scryfall's fuzzy `cards/named` endpoint.
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: String,
    timeout: TimeoutConfig,
}

impl ScryfallClient {
    /// Create a client against the public API.
    pub fn new(timeout: TimeoutConfig) -> Result<Self, LookupError> {
        Self::builder().timeout(timeout).build()
    }

    /// Start building a client.
    pub fn builder() -> ScryfallClientBuilder {
        ScryfallClientBuilder::default()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn named_url(&self) -> String {
        format!("{}/cards/named", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CardLookup for ScryfallClient {
    async fn lookup(&self, name: &str) -> Result<CardMetadata, LookupError> {
        let url = self.named_url();
        let resp = self
            .http
            .get(&url)
            .query(&[("fuzzy", name)])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await.map_err(|e| self.map_transport(e))?;
        decode_card(&body)
    }
}

impl ScryfallClient {
    fn map_transport(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.timeout.total)
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

/// Builder for [`ScryfallClient`].
#[derive(Debug, Clone)]
pub struct ScryfallClientBuilder {
    base_url: String,
    user_agent: String,
    timeout: TimeoutConfig,
}

impl Default for ScryfallClientBuilder {
    fn default() -> Self {
        Self {
            base_url: SCRYFALL_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: TimeoutConfig::default(),
        }
    }
}

impl ScryfallClientBuilder {
    /// Point the client at another host (mirrors, test servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ScryfallClient, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .connect_timeout(self.timeout.connect)
            .timeout(self.timeout.total)
            .default_headers(accept_json())
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        Ok(ScryfallClient {
            http,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}

fn accept_json() -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    headers
}

/// Decode a Scryfall card object into metadata.
pub fn decode_card(body: &str) -> Result<CardMetadata, LookupError> {
    let card: ScryfallCard =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;
    if card.id.trim().is_empty() {
        return Err(LookupError::Malformed("card object has an empty id".to_string()));
    }
    Ok(card.into_metadata())
}

#[derive(Debug, Deserialize)]
struct ScryfallCard {
    id: String,
    name: String,
    #[serde(default)]
    type_line: Option<String>,
    #[serde(default)]
    colors: Option<Vec<String>>,
    #[serde(default)]
    mana_cost: Option<String>,
    #[serde(default)]
    power: Option<String>,
    #[serde(default)]
    toughness: Option<String>,
    #[serde(default)]
    oracle_text: Option<String>,
    #[serde(default)]
    rarity: Option<String>,
    #[serde(default)]
    set_name: Option<String>,
    #[serde(default)]
    image_uris: Option<ImageUris>,
    #[serde(default)]
    scryfall_uri: Option<String>,
    #[serde(default)]
    card_faces: Vec<CardFace>,
}

#[derive(Debug, Deserialize)]
struct CardFace {
    #[serde(default)]
    type_line: Option<String>,
    #[serde(default)]
    colors: Option<Vec<String>>,
    #[serde(default)]
    mana_cost: Option<String>,
    #[serde(default)]
    power: Option<String>,
    #[serde(default)]
    toughness: Option<String>,
    #[serde(default)]
    oracle_text: Option<String>,
    #[serde(default)]
    image_uris: Option<ImageUris>,
}

#[derive(Debug, Deserialize)]
struct ImageUris {
    #[serde(default)]
    normal: Option<String>,
    #[serde(default)]
    large: Option<String>,
    #[serde(default)]
    small: Option<String>,
}

impl ImageUris {
    fn best(self) -> Option<String> {
        self.normal.or(self.large).or(self.small)
    }
}

impl ScryfallCard {
    /// Double-faced cards keep most fields on their faces; fall back to the
    /// front face wherever the top level is silent.
    fn into_metadata(self) -> CardMetadata {
        let mut faces = self.card_faces.into_iter();
        let front = faces.next();
        let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());

        let (face_type, face_colors, face_cost, face_power, face_toughness, face_text, face_image) =
            match front {
                Some(f) => (
                    f.type_line,
                    f.colors,
                    f.mana_cost,
                    f.power,
                    f.toughness,
                    f.oracle_text,
                    f.image_uris,
                ),
                None => (None, None, None, None, None, None, None),
            };

        CardMetadata {
            id: CardId::new(self.id),
            name: self.name,
            type_line: non_empty(self.type_line).or(face_type).unwrap_or_default(),
            colors: self.colors.or(face_colors).unwrap_or_default(),
            mana_cost: non_empty(self.mana_cost).or(face_cost).unwrap_or_default(),
            power: self.power.or(face_power),
            toughness: self.toughness.or(face_toughness),
            oracle_text: non_empty(self.oracle_text).or(face_text).unwrap_or_default(),
            rarity: self.rarity.unwrap_or_default(),
            set_name: self.set_name.unwrap_or_default(),
            image_uri: self.image_uris.or(face_image).and_then(ImageUris::best),
            detail_uri: self.scryfall_uri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOLT: &str = r#"{
        "object": "card",
        "id": "e3285e6b-3e79-4d7c-bf96-d920f973b122",
        "name": "Lightning Bolt",
        "mana_cost": "{R}",
        "type_line": "Instant",
        "oracle_text": "Lightning Bolt deals 3 damage to any target.",
        "colors": ["R"],
        "rarity": "common",
        "set_name": "Magic 2010",
        "image_uris": {"small": "https://img/s.jpg", "normal": "https://img/n.jpg"},
        "scryfall_uri": "https://scryfall.com/card/m10/146/lightning-bolt"
    }"#;

    const DELVER: &str = r#"{
        "id": "28059d09-2c7d-4c61-af55-8942107a7c1f",
        "name": "Delver of Secrets // Insectile Aberration",
        "type_line": "Creature — Human Wizard // Creature — Human Insect",
        "rarity": "common",
        "set_name": "Innistrad",
        "card_faces": [
            {
                "name": "Delver of Secrets",
                "mana_cost": "{U}",
                "type_line": "Creature — Human Wizard",
                "oracle_text": "At the beginning of your upkeep, look at the top card of your library.",
                "colors": ["U"],
                "power": "1",
                "toughness": "1",
                "image_uris": {"normal": "https://img/delver.jpg"}
            },
            {
                "name": "Insectile Aberration",
                "mana_cost": "",
                "type_line": "Creature — Human Insect",
                "oracle_text": "Flying",
                "colors": ["U"],
                "power": "3",
                "toughness": "2"
            }
        ]
    }"#;

    #[test]
    fn test_decode_single_faced() {
        let meta = decode_card(BOLT).unwrap();
        assert_eq!(meta.id.as_str(), "e3285e6b-3e79-4d7c-bf96-d920f973b122");
        assert_eq!(meta.type_line, "Instant");
        assert_eq!(meta.colors, vec!["R".to_string()]);
        assert_eq!(meta.image_uri.as_deref(), Some("https://img/n.jpg"));
        assert_eq!(meta.power, None);
        assert!(meta.detail_uri.is_some());
    }

    #[test]
    fn test_decode_double_faced_uses_front_face() {
        let meta = decode_card(DELVER).unwrap();
        assert_eq!(meta.type_line, "Creature — Human Wizard // Creature — Human Insect");
        assert_eq!(meta.colors, vec!["U".to_string()]);
        assert_eq!(meta.mana_cost, "{U}");
        assert_eq!(meta.power.as_deref(), Some("1"));
        assert!(meta.oracle_text.starts_with("At the beginning"));
        assert_eq!(meta.image_uri.as_deref(), Some("https://img/delver.jpg"));
        assert_eq!(meta.detail_uri, None);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode_card("not json"), Err(LookupError::Malformed(_))));
        assert!(matches!(decode_card(r#"{"name": "No Id"}"#), Err(LookupError::Malformed(_))));
        assert!(matches!(
            decode_card(r#"{"id": " ", "name": "Blank"}"#),
            Err(LookupError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_builder_trims_base_url() {
        let client = ScryfallClient::builder()
            .base_url("http://localhost:9999/")
            .build()
            .unwrap();
        assert_eq!(client.named_url(), "http://localhost:9999/cards/named");
    }
}
