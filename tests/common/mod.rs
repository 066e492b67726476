//! Common test utilities for build tests

#![allow(dead_code)]

pub mod schema_validator;

use std::path::PathBuf;

use serde_json::{Value, json};
use staticpub::{SiteBuilder, SiteConfig};
use tempfile::TempDir;

/// Public key contents written for every test site
pub const TEST_KEY: &str = "KEYDATA";

/// A scratch site: key file and publish directory inside a temp dir
pub struct TestSite {
    pub _temp_dir: TempDir,
    pub key_path: PathBuf,
    pub publish_dir: PathBuf,
}

impl TestSite {
    /// Create a new test site with `public.pem` containing `TEST_KEY`
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("public.pem");
        std::fs::write(&key_path, TEST_KEY).unwrap();
        let publish_dir = temp_dir.path().join("dist");

        Self {
            _temp_dir: temp_dir,
            key_path,
            publish_dir,
        }
    }

    /// Configuration for `https://example.com` / `alice`, with `extra`
    /// fields merged on top
    pub fn config(&self, extra: Value) -> SiteConfig {
        let mut config = json!({
            "url": "https://example.com",
            "username": "alice",
            "public_key_path": self.key_path,
            "publish_dir": self.publish_dir,
        });
        if let (Some(base), Value::Object(extra)) = (config.as_object_mut(), extra) {
            base.extend(extra);
        }
        serde_json::from_value(config).unwrap()
    }

    /// Write a TOML configuration file pointing at this site's key and
    /// publish directory, followed by `body`
    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self._temp_dir.path().join("staticpub.toml");
        let contents = format!(
            "publicKeyPath = '{}'\npublishDir = '{}'\n{}",
            self.key_path.display(),
            self.publish_dir.display(),
            body
        );
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn builder(&self, extra: Value) -> SiteBuilder {
        SiteBuilder::new(self.config(extra)).unwrap()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.publish_dir.join(relative)
    }

    /// Contents of a generated file
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|_| panic!("missing output file: {}", relative))
    }

    /// Generated file parsed as JSON
    pub fn read_json(&self, relative: &str) -> Value {
        serde_json::from_str(&self.read(relative)).unwrap()
    }
}
