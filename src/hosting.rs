//! Static host rules
//!
//! `_headers` and `_redirects` in the format understood by Netlify and
//! Cloudflare Pages. They map the well-known discovery URLs onto the
//! generated files and give each file its media type.

use crate::federation::{ACTIVITY_JSON, NODEINFO_FILE, NODEINFO_WELL_KNOWN_FILE};

/// Headers file name, relative to the publish directory
pub const HEADERS_FILE: &str = "_headers";

/// Redirects file name, relative to the publish directory
pub const REDIRECTS_FILE: &str = "_redirects";

const JRD_JSON: &str = "application/jrd+json";

/// Content-Type rules for the discovery endpoints and the actor at `profile_path`
pub fn headers(profile_path: &str) -> String {
    format!(
        "
# nodeinfo
/.well-known/nodeinfo
  Content-Type: {JRD_JSON}

/{NODEINFO_FILE}
  Content-Type: application/json

# WebFinger
/.well-known/webfinger
  Content-Type: {JRD_JSON}

# ActivityPub Actor
/{profile_path}
  Content-Type: {ACTIVITY_JSON}"
    )
}

/// Rewrites from the well-known URLs to the generated files.
///
/// WebFinger queries are answered by passing `resource` through to the
/// file of the same name in `webfinger_dir`.
pub fn redirects(webfinger_dir: &str) -> String {
    format!(
        "
# nodeinfo
/.well-known/nodeinfo /{NODEINFO_WELL_KNOWN_FILE} 200

# WebFinger
/.well-known/webfinger resource=:rs /{webfinger_dir}/:rs 200"
    )
}
