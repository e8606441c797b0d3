//! JSON manifest store.
//!
//! The CLI stands in for the remote system of record with a versioned JSON
//! file. Saves are atomic (temp file + rename) so an interrupted write
//! never corrupts the store.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use conf_model::Manifest;
use conf_session::InMemoryBackend;

const STORE_SCHEMA: &str = "manifest-conference.store";
const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoreFile {
    schema: String,
    schema_version: u32,
    manifests: Vec<Manifest>,
}

/// Load the store into the reference backend.
pub fn load_store(path: &Path) -> Result<InMemoryBackend> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read manifest store {}", path.display()))?;
    let file: StoreFile = serde_json::from_str(&raw)
        .with_context(|| format!("parse manifest store {}", path.display()))?;
    if file.schema_version != STORE_SCHEMA_VERSION {
        bail!(
            "unsupported store schema version {} (expected {})",
            file.schema_version,
            STORE_SCHEMA_VERSION
        );
    }
    debug!(path = %path.display(), manifests = file.manifests.len(), "store loaded");
    Ok(InMemoryBackend::with_manifests(file.manifests))
}

/// Save every manifest back to the store file atomically.
pub fn save_store(backend: InMemoryBackend, path: &Path) -> Result<()> {
    let payload = StoreFile {
        schema: STORE_SCHEMA.to_string(),
        schema_version: STORE_SCHEMA_VERSION,
        manifests: backend.into_manifests(),
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize manifest store")?;

    let temp_path = path.with_extension("json.tmp");
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create store directory {}", parent.display()))?;
    }

    let mut file = File::create(&temp_path)
        .with_context(|| format!("create {}", temp_path.display()))?;
    file.write_all(json.as_bytes())
        .and_then(|()| file.write_all(b"\n"))
        .with_context(|| format!("write {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", temp_path.display()))?;

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "replace {} with {}",
            path.display(),
            temp_path.display()
        )
    })?;
    debug!(path = %path.display(), "store saved");
    Ok(())
}
