//! ActivityPub actor document
//!
//! The actor is a `Person` whose fields start from generated defaults and
//! are then overlaid with the caller's profile. Keys overridden by the
//! profile keep their default position in the output.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::config::Identity;
use crate::error::AppError;

/// Media type of ActivityPub documents
pub const ACTIVITY_JSON: &str = "application/activity+json";

const ACTOR_CONTEXT: [&str; 2] = [
    "https://www.w3.org/ns/activitystreams",
    "https://w3id.org/security/v1",
];

/// Actor public key block
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKey {
    pub id: String,
    pub owner: String,
    pub public_key_pem: String,
}

/// Merged actor fields
#[derive(Debug, Clone)]
pub struct Actor {
    id: String,
    fields: Map<String, Value>,
}

impl Actor {
    /// Build the actor for `identity`, published at `published`
    ///
    /// # Arguments
    /// * `identity` - Validated account identity
    /// * `profile_path` - Actor path below the site root
    /// * `profile` - Caller-supplied fields; these win on conflict
    /// * `published` - Generation timestamp
    pub fn new(
        identity: &Identity,
        profile_path: &str,
        profile: &Map<String, Value>,
        published: DateTime<Utc>,
    ) -> Self {
        let base_url = &identity.base_url;
        let default_id = format!("{}/{}", base_url, profile_path);

        let mut fields = Map::new();
        fields.insert("id".to_string(), json!(default_id));
        fields.insert("type".to_string(), json!("Person"));
        fields.insert("url".to_string(), json!(base_url));
        fields.insert("preferredUsername".to_string(), json!(identity.username));
        fields.insert("manuallyApprovesFollowers".to_string(), json!(false));
        fields.insert(
            "published".to_string(),
            json!(published.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        fields.insert("inbox".to_string(), json!(format!("{}/ap/inbox", base_url)));

        for (key, value) in profile {
            fields.insert(key.clone(), value.clone());
        }

        // A profile may replace the id; every other document follows it.
        let id = fields
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or(default_id);

        Self { id, fields }
    }

    /// Actor URI referenced by WebFinger and the key block
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Key block for `key_id`, owned by this actor
    pub fn public_key(&self, key_id: &str, public_key_pem: String) -> PublicKey {
        PublicKey {
            id: format!("{}#{}", self.id, key_id),
            owner: self.id.clone(),
            public_key_pem,
        }
    }

    /// Render the JSON-LD actor document
    pub fn to_document(&self, public_key: &PublicKey) -> Result<Value, AppError> {
        let mut document = Map::new();
        document.insert("@context".to_string(), json!(ACTOR_CONTEXT));
        for (key, value) in &self.fields {
            document.insert(key.clone(), value.clone());
        }
        document.insert("publicKey".to_string(), serde_json::to_value(public_key)?);

        Ok(Value::Object(document))
    }
}
