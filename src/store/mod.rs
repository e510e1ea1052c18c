//! Song persistence boundary
//!
//! The real store is a managed real-time document backend living on the
//! JS side of the WASM boundary. The engine only needs three operations,
//! expressed here as a trait so the editing session can be driven
//! against any backend, and against [`MemoryStore`] in tests and native
//! embeddings.

use chrono::Utc;
use thiserror::Error;

use crate::models::Song;
use crate::utils::id::short_id;

/// Persistence failures surfaced to the editing session
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected the write as unauthorized. Mapped to a fixed
    /// user message instead of exposing provider error text.
    #[error("Permission Denied")]
    PermissionDenied,

    /// Any other backend failure (network, unknown)
    #[error("{0}")]
    Backend(String),
}

/// Read/write operations on the songs collection
pub trait SongStore {
    /// Fetch a song by id, None when it does not exist
    fn get_song(&self, id: &str) -> Option<Song>;

    /// Update an existing song's content, and optionally its title
    /// and/or original key (None leaves the field untouched)
    fn save(
        &mut self,
        id: &str,
        content: &str,
        title: Option<&str>,
        original_key: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Create a new song and return its assigned id
    fn add_song(
        &mut self,
        title: &str,
        content: &str,
        original_key: Option<&str>,
    ) -> Result<String, StoreError>;
}

/// In-memory song store
///
/// Backs the native test suite and any embedding that does not bring
/// its own backend. Write semantics (partial update, creation
/// timestamps) mirror the remote store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    songs: Vec<Song>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }
}

impl SongStore for MemoryStore {
    fn get_song(&self, id: &str) -> Option<Song> {
        self.songs.iter().find(|s| s.id == id).cloned()
    }

    fn save(
        &mut self,
        id: &str,
        content: &str,
        title: Option<&str>,
        original_key: Option<&str>,
    ) -> Result<(), StoreError> {
        let song = self
            .songs
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::Backend(format!("no song with id {}", id)))?;

        song.content = content.to_string();
        if let Some(title) = title {
            song.title = title.to_string();
        }
        if let Some(key) = original_key {
            song.original_key = Some(key.to_string());
        }
        song.updated_at = Some(Utc::now());
        Ok(())
    }

    fn add_song(
        &mut self,
        title: &str,
        content: &str,
        original_key: Option<&str>,
    ) -> Result<String, StoreError> {
        let id = short_id();
        let now = Utc::now();
        let mut song = Song::new(id.clone(), title, content);
        song.original_key = original_key.map(str::to_string);
        song.created_at = Some(now);
        song.updated_at = Some(now);
        self.songs.push(song);

        log::info!("created song {} ({:?})", id, title);
        Ok(id)
    }
}
