use std::{fs, path::Path};

use anyhow::Context;
use keyfall_schema::Song;

pub mod catalog;

pub use catalog::{CatalogError, SongCatalog};

pub fn load_song_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<Song> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read song: {}", path.display()))?;
    let song: Song = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse song json: {}", path.display()))?;
    Ok(song)
}

pub fn load_song_json_from_str(json: &str) -> anyhow::Result<Song> {
    let song: Song = serde_json::from_str(json).context("failed to parse song json")?;
    Ok(song)
}
