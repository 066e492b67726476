//! WebFinger document
//!
//! Resolves `acct:user@host` to the actor through a `self` link, plus any
//! extra relations the site declares.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::AppError;

use super::actor::ACTIVITY_JSON;

/// WebFinger JRD response
#[derive(Debug, Clone, Serialize)]
pub struct WebFingerResponse {
    pub subject: String,
    pub links: Vec<WebFingerLink>,
}

/// WebFinger link
///
/// Besides `rel`, a link carries whatever fields the relation declares
/// (`type`, `href`, `template`, ...), in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct WebFingerLink {
    pub rel: String,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// `acct:` URI for `username` at `hostname`
pub fn subject(username: &str, hostname: &str) -> String {
    format!("acct:{}@{}", username, hostname)
}

/// Generate the WebFinger response for the site's actor.
///
/// # Arguments
/// * `username` - Account name
/// * `hostname` - Host of the site URL
/// * `actor_id` - Actor URI the `self` link points at
/// * `link_relations` - Extra relations; a `self` entry replaces the default
///
/// # Errors
/// Returns `Config` if a relation is not a mapping
pub fn generate_webfinger_response(
    username: &str,
    hostname: &str,
    actor_id: &str,
    link_relations: &Map<String, Value>,
) -> Result<WebFingerResponse, AppError> {
    let mut relations = Map::new();
    relations.insert(
        "self".to_string(),
        json!({"type": ACTIVITY_JSON, "href": actor_id}),
    );
    for (rel, link) in link_relations {
        relations.insert(rel.clone(), link.clone());
    }

    let links = relations
        .into_iter()
        .map(|(rel, link)| match link {
            Value::Object(mut properties) => {
                // An explicit `rel` inside the link object wins over the key.
                let rel = match properties.shift_remove("rel") {
                    Some(Value::String(explicit)) => explicit,
                    _ => rel,
                };
                Ok(WebFingerLink { rel, properties })
            }
            _ => Err(AppError::Config(format!(
                "link relation {rel} must be a mapping"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WebFingerResponse {
        subject: subject(username, hostname),
        links,
    })
}
