//! staticpub - publish a single ActivityPub actor from a static site
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────┐
//! │    config    │──▶│     site     │──▶│  publish directory        │
//! │ file + env   │   │ SiteBuilder  │   │  webfinger/acct:user@host │
//! └──────────────┘   └──────┬───────┘   │  <profile_path>           │
//!                           │           │  wk-nodeinfo, nodeinfo    │
//!              ┌────────────┼─────────┐ │  _headers, _redirects     │
//!              ▼            ▼         ▼ └──────────────────────────┘
//!         federation      keys     hosting
//! ```
//!
//! # Modules
//!
//! - `config`: Configuration loading and validation
//! - `error`: Error types
//! - `federation`: Actor, WebFinger and NodeInfo documents
//! - `hosting`: Static host header and redirect rules
//! - `keys`: Public key reading and key pair generation
//! - `site`: The build sequence

pub mod config;
pub mod error;
pub mod federation;
pub mod hosting;
pub mod keys;
pub mod site;

pub use crate::config::SiteConfig;
pub use crate::error::{AppError, Result};
pub use crate::site::{BuildReport, SiteBuilder};
