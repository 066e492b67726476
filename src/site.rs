//! Site builder
//!
//! Turns a `SiteConfig` into the files a static host needs to serve the
//! actor:
//!
//! 1. `<webfinger_dir>/acct:<user>@<host>` (written)
//! 2. `<profile_path>` (written)
//! 3. `wk-nodeinfo` and `nodeinfo` (appended)
//! 4. `_headers` and `_redirects` (appended)
//!
//! Everything that can fail before touching the disk (validation, key
//! read, document assembly) runs first. A failure while writing aborts the
//! run and leaves earlier files in place.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use crate::config::{Identity, SiteConfig};
use crate::error::AppError;
use crate::federation::nodeinfo::{nodeinfo, nodeinfo_links};
use crate::federation::{
    Actor, NODEINFO_FILE, NODEINFO_WELL_KNOWN_FILE, generate_webfinger_response,
};
use crate::hosting::{self, HEADERS_FILE, REDIRECTS_FILE};
use crate::keys;

/// Files produced by a build, in write order
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
}

/// Generates the publish directory for one actor
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    config: SiteConfig,
    identity: Identity,
}

impl SiteBuilder {
    /// Validate `config` and prepare a builder
    ///
    /// # Errors
    /// Returns `Config` if `url` or `username` is missing or invalid
    pub fn new(config: SiteConfig) -> Result<Self, AppError> {
        config.validate()?;
        let identity = config.identity()?;

        tracing::debug!(
            base_url = %identity.base_url,
            username = %identity.username,
            hostname = %identity.hostname,
            "Identity resolved"
        );

        Ok(Self { config, identity })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Build the site, stamping the actor with the current time
    pub async fn build(&self) -> Result<BuildReport, AppError> {
        self.build_at(Utc::now()).await
    }

    /// Build the site with a fixed `published` timestamp
    pub async fn build_at(&self, published: DateTime<Utc>) -> Result<BuildReport, AppError> {
        let config = &self.config;
        let identity = &self.identity;

        let actor = Actor::new(identity, config.actor_path(), &config.profile, published);
        tracing::debug!(actor_id = %actor.id(), "Actor derived");

        let webfinger = generate_webfinger_response(
            &identity.username,
            &identity.hostname,
            actor.id(),
            &config.link_relations,
        )?;

        let public_key_pem = keys::read_public_key(&config.public_key_path).await?;
        let public_key = actor.public_key(&config.public_key_id, public_key_pem);
        let actor_document = actor.to_document(&public_key)?;

        let publish_dir = &config.publish_dir;
        let mut report = BuildReport::default();

        let webfinger_path = publish_dir
            .join(config.webfinger_path())
            .join(&webfinger.subject);
        write_file(&webfinger_path, &serde_json::to_vec(&webfinger)?).await?;
        tracing::info!(path = %webfinger_path.display(), "WebFinger document written");
        report.written.push(webfinger_path);

        let actor_path = publish_dir.join(config.actor_path());
        write_file(&actor_path, &serde_json::to_vec(&actor_document)?).await?;
        tracing::info!(path = %actor_path.display(), "Actor document written");
        report.written.push(actor_path);

        let appends = [
            (
                NODEINFO_WELL_KNOWN_FILE,
                serde_json::to_vec(&nodeinfo_links(&identity.base_url))?,
            ),
            (
                NODEINFO_FILE,
                serde_json::to_vec(&nodeinfo(config.nodeinfo.software.as_ref()))?,
            ),
            (
                HEADERS_FILE,
                hosting::headers(config.actor_path()).into_bytes(),
            ),
            (
                REDIRECTS_FILE,
                hosting::redirects(config.webfinger_path()).into_bytes(),
            ),
        ];

        for (name, contents) in appends {
            let path = publish_dir.join(name);
            append_file(&path, &contents).await?;
            tracing::info!(path = %path.display(), "Appended");
            report.written.push(path);
        }

        Ok(report)
    }
}

async fn create_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::io(parent, e))?;
    }
    Ok(())
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    create_parent(path).await?;
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| AppError::io(path, e))
}

async fn append_file(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    create_parent(path).await?;
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| AppError::io(path, e))?;
    file.write_all(contents)
        .await
        .map_err(|e| AppError::io(path, e))?;
    file.flush().await.map_err(|e| AppError::io(path, e))
}
