use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use keyfall_schema::Song;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate song id `{0}`")]
    DuplicateId(String),

    #[error("unknown song `{0}`")]
    UnknownSong(String),
}

/// Songs keyed by id, in id order.
#[derive(Debug, Clone, Default)]
pub struct SongCatalog {
    songs: BTreeMap<String, Arc<Song>>,
}

impl SongCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` file directly inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        for path in paths {
            debug!(path = %path.display(), "loading song");
            catalog.insert(Self::read_song(&path)?)?;
        }
        info!(dir = %dir.display(), songs = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn read_song(path: &Path) -> Result<Song, CatalogError> {
        let bytes = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn insert(&mut self, song: Song) -> Result<(), CatalogError> {
        if self.songs.contains_key(&song.id) {
            return Err(CatalogError::DuplicateId(song.id));
        }
        self.songs.insert(song.id.clone(), Arc::new(song));
        Ok(())
    }

    pub fn get_song(&self, id: &str) -> Result<Arc<Song>, CatalogError> {
        self.songs
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownSong(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> + '_ {
        self.songs.values().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl FromIterator<Song> for SongCatalog {
    /// Later songs with an already-seen id are dropped.
    fn from_iter<T: IntoIterator<Item = Song>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for song in iter {
            let _ = catalog.insert(song);
        }
        catalog
    }
}
