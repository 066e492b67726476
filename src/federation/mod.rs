//! Federation documents
//!
//! Builders for the JSON documents a static site needs to be discoverable
//! as an ActivityPub actor:
//!
//! - `actor`: the JSON-LD actor profile
//! - `webfinger`: the JRD answering `acct:` lookups
//! - `nodeinfo`: the well-known pointer and NodeInfo 2.1 detail document

pub mod actor;
pub mod nodeinfo;
pub mod webfinger;

pub use actor::{ACTIVITY_JSON, Actor, PublicKey};
pub use nodeinfo::{NODEINFO_FILE, NODEINFO_WELL_KNOWN_FILE};
pub use webfinger::{WebFingerLink, WebFingerResponse, generate_webfinger_response};
