//! NodeInfo documents
//!
//! - `wk-nodeinfo`: served at /.well-known/nodeinfo, points at the detail file
//! - `nodeinfo`: NodeInfo 2.1 document for a single-user site

use serde_json::{Value, json};

use crate::config::NodeInfoSoftware;

/// Detail document file name, relative to the publish directory
pub const NODEINFO_FILE: &str = "nodeinfo";

/// Well-known pointer file name, relative to the publish directory
pub const NODEINFO_WELL_KNOWN_FILE: &str = "wk-nodeinfo";

/// Relation identifying the NodeInfo 2.1 schema
pub const NODEINFO_SCHEMA_REL: &str = "http://nodeinfo.diaspora.software/ns/schema/2.1";

/// Links to the NodeInfo detail document.
pub fn nodeinfo_links(base_url: &str) -> Value {
    json!({
        "links": [
            {
                "rel": NODEINFO_SCHEMA_REL,
                "href": format!("{}/{}", base_url, NODEINFO_FILE)
            }
        ]
    })
}

/// NodeInfo 2.1 document.
///
/// The user count is fixed at one: the site publishes exactly one actor.
pub fn nodeinfo(software: Option<&NodeInfoSoftware>) -> Value {
    let mut document = json!({
        "version": "2.1",
        "openRegistrations": false,
        "protocols": ["activitypub"],
        "usage": {
            "users": {
                "total": 1
            }
        }
    });

    if let (Some(software), Some(object)) = (software, document.as_object_mut()) {
        object.insert(
            "software".to_string(),
            json!({
                "name": software.name,
                "version": software.version
            }),
        );
    }

    document
}
