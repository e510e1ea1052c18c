//! Editing session state machine
//!
//! A session owns the transient state for one song being viewed or
//! edited: the edit-mode flag, the editable title, the paragraph list
//! with populated edit buffers, and the notice channel the UI renders
//! as a snackbar.
//!
//! Two states exist, Viewing and Editing. The save attempt runs a
//! transient Saving phase (`is_saving`) whose only purpose is to let
//! the UI disable the triggering control; the state machine itself does
//! not reject a second concurrent save, callers must not issue one.
//!
//! The remote write can cross the WASM boundary, so the save transition
//! is split into primitives: [`EditorSession::begin_save`] validates,
//! prunes and serializes, returning the pending [`SaveRequest`];
//! [`EditorSession::complete_save`] / [`EditorSession::fail_save`]
//! settle the outcome. [`EditorSession::toggle_edit_mode`] composes the
//! three against a [`SongStore`] for native callers and tests.

use serde::{Deserialize, Serialize};

use crate::key::SongKey;
use crate::models::{Paragraph, Song};
use crate::parse::parse_to_paragraphs;
use crate::render::serialize;
use crate::store::{SongStore, StoreError};

/// Route id marking a song that has not been persisted yet
pub const NEW_SONG_ROUTE: &str = "new";

const MIN_TITLE_CHARS: usize = 3;
const MIN_PARAGRAPH_CHARS: usize = 3;

/// User-facing message channel (the snackbar contract)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub visible: bool,
}

impl Notice {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

/// Where to insert a paragraph relative to an existing one
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Above,
    Below,
}

/// The remote write a validated save needs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SaveRequest {
    /// Create a new song record
    Create {
        title: String,
        content: String,
        #[serde(rename = "originalKey")]
        original_key: Option<String>,
    },
    /// Update an existing record's content and title
    Update {
        id: String,
        title: String,
        content: String,
    },
}

/// The remote write a key change needs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyChangeRequest {
    pub id: String,
    pub content: String,
    pub original_key: String,
}

/// Result of one `toggle_edit_mode` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Switched from Viewing to Editing
    EnteredEdit,
    /// Left edit mode without saving (no song or no paragraphs)
    ExitedEdit,
    /// Validation failed; the notice holds the message
    ValidationFailed,
    /// Save succeeded; the session now views this song id
    Saved { id: String },
    /// The remote write failed; still Editing, buffers intact
    SaveFailed,
}

/// Transient Editing/Viewing state for one song
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    route_id: String,
    song: Option<Song>,
    pending: Option<SaveRequest>,

    pub is_edit_mode: bool,
    pub is_saving: bool,
    pub edit_title: String,
    pub paragraphs: Vec<Paragraph>,
    pub notice: Notice,
}

impl EditorSession {
    pub fn new(route_id: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            ..Default::default()
        }
    }

    pub fn is_new_song(&self) -> bool {
        self.route_id == NEW_SONG_ROUTE
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    /// Set up the session for a loaded song
    ///
    /// A new (unpersisted) song starts directly in Editing with one
    /// empty paragraph; an existing song starts in Viewing with
    /// paragraphs parsed from its content.
    pub fn initialize(&mut self, song: Option<Song>) {
        let Some(song) = song else { return };

        if self.is_new_song() {
            self.is_edit_mode = true;
            self.edit_title = String::new();
            let mut paragraph = Paragraph::verse();
            paragraph.edit_text = Some(String::new());
            self.paragraphs = vec![paragraph];
        } else {
            self.is_edit_mode = false;
            self.edit_title = song.title.clone();
            self.paragraphs = parse_to_paragraphs(Some(&song.content));
        }
        self.song = Some(song);
    }

    /// Insert a fresh empty verse paragraph next to `index` and return
    /// its id so the caller can focus it. Only meaningful while Editing.
    pub fn add_paragraph(&mut self, index: usize, position: Position) -> String {
        let mut paragraph = Paragraph::verse();
        paragraph.edit_text = Some(String::new());
        let id = paragraph.id.clone();

        let insert_at = match position {
            Position::Above => index,
            Position::Below => index + 1,
        };
        let insert_at = insert_at.min(self.paragraphs.len());
        self.paragraphs.insert(insert_at, paragraph);
        id
    }

    /// Remove the paragraph at `index`. A document keeps at least one
    /// paragraph while editing, so the last one cannot be removed.
    pub fn remove_paragraph(&mut self, index: usize) {
        if self.paragraphs.len() > 1 && index < self.paragraphs.len() {
            self.paragraphs.remove(index);
        }
    }

    /// Replace one paragraph's edit buffer
    pub fn set_paragraph_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(paragraph) = self.paragraphs.get_mut(index) {
            paragraph.edit_text = Some(text.into());
        }
    }

    /// Viewing -> Editing: capture the title and materialize edit
    /// buffers from the rendered lines. Always succeeds, no I/O.
    pub fn enter_edit_mode(&mut self) {
        if let Some(song) = &self.song {
            self.edit_title = song.title.clone();
        }
        for paragraph in &mut self.paragraphs {
            let text = paragraph
                .lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            paragraph.edit_text = Some(text);
        }
        self.is_edit_mode = true;
    }

    /// Validate, prune and serialize the edit buffers, entering the
    /// Saving phase
    ///
    /// On a validation failure the notice is shown, nothing is mutated
    /// and None is returned. On success the surviving paragraphs have
    /// their lines rebuilt from the edit buffers and the pending
    /// [`SaveRequest`] is returned (also retained internally until
    /// [`Self::complete_save`] or [`Self::fail_save`]).
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if self.edit_title.trim().chars().count() < MIN_TITLE_CHARS {
            self.notice.show("Title must have at least 3 characters");
            return None;
        }

        let valid: Vec<Paragraph> = self
            .paragraphs
            .iter()
            .filter(|p| stripped_len(p) >= MIN_PARAGRAPH_CHARS)
            .cloned()
            .collect();

        if valid.is_empty() {
            self.notice.show("Each paragraph must have at least 3 characters");
            return None;
        }

        // Buffer sync happens strictly before serialization, which
        // happens strictly before the remote write is issued.
        self.paragraphs = valid;
        for paragraph in &mut self.paragraphs {
            if let Some(text) = paragraph.edit_text.clone() {
                paragraph.sync_lines(&text);
            }
        }

        let content = serialize(&self.paragraphs);
        let request = if self.is_new_song() {
            SaveRequest::Create {
                title: self.edit_title.clone(),
                content,
                original_key: self.song.as_ref().and_then(|s| s.original_key.clone()),
            }
        } else {
            let id = self
                .song
                .as_ref()
                .map(|s| s.id.clone())
                .unwrap_or_else(|| self.route_id.clone());
            SaveRequest::Update {
                id,
                title: self.edit_title.clone(),
                content,
            }
        };

        self.is_saving = true;
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Settle a successful remote write
    ///
    /// `new_id` is the identifier assigned by a create; updates pass
    /// None. The session leaves Editing and views the (possibly new)
    /// song id.
    pub fn complete_save(&mut self, new_id: Option<String>) {
        let Some(request) = self.pending.take() else { return };
        self.is_saving = false;

        match request {
            SaveRequest::Create {
                title,
                content,
                original_key,
            } => {
                let id = new_id.unwrap_or_default();
                log::info!("song created, now viewing {}", id);
                self.route_id = id.clone();
                let mut song = Song::new(id, title, content);
                song.original_key = original_key;
                self.song = Some(song);
                self.notice.show("Song created successfully");
            }
            SaveRequest::Update { title, content, .. } => {
                if let Some(song) = &mut self.song {
                    song.title = title;
                    song.content = content;
                }
                self.notice.show("Changes saved to cloud");
            }
        }
        self.is_edit_mode = false;
    }

    /// Settle a failed remote write: stay in Editing with all edit
    /// buffers intact so the user can retry or navigate away
    pub fn fail_save(&mut self, error: &StoreError) {
        self.pending = None;
        self.is_saving = false;
        self.notice.show(format!("Error saving: {}", error));
    }

    /// The save/enter-edit dispatcher behind the edit toggle control
    pub fn toggle_edit_mode(&mut self, store: &mut dyn SongStore) -> ToggleOutcome {
        if !self.is_edit_mode {
            self.enter_edit_mode();
            return ToggleOutcome::EnteredEdit;
        }

        if self.song.is_none() || self.paragraphs.is_empty() {
            self.is_edit_mode = false;
            return ToggleOutcome::ExitedEdit;
        }

        let Some(request) = self.begin_save() else {
            return ToggleOutcome::ValidationFailed;
        };

        let result = match &request {
            SaveRequest::Create {
                title,
                content,
                original_key,
            } => store
                .add_song(title, content, original_key.as_deref())
                .map(Some),
            SaveRequest::Update { id, title, content } => {
                store.save(id, content, Some(title), None).map(|_| None)
            }
        };

        match result {
            Ok(new_id) => {
                self.complete_save(new_id);
                ToggleOutcome::Saved {
                    id: self.route_id.clone(),
                }
            }
            Err(error) => {
                log::warn!("save failed: {}", error);
                self.fail_save(&error);
                ToggleOutcome::SaveFailed
            }
        }
    }

    /// Current key for the key dialog, with the C-major fallback
    pub fn current_key(&self) -> SongKey {
        SongKey::parse_or_default(
            self.song
                .as_ref()
                .and_then(|s| s.original_key.as_deref()),
        )
    }

    /// The remote write a key change needs, or None when the song is
    /// new or unloaded (the key then only changes in memory and travels
    /// with the create request on first save)
    pub fn key_save_request(&self, key: SongKey) -> Option<KeyChangeRequest> {
        if self.is_new_song() {
            return None;
        }
        self.song.as_ref().map(|song| KeyChangeRequest {
            id: song.id.clone(),
            content: song.content.clone(),
            original_key: key.to_string(),
        })
    }

    /// Settle a successful key change: update the in-memory song and
    /// confirm to the user
    pub fn apply_key_change(&mut self, key: SongKey) {
        if let Some(song) = &mut self.song {
            song.original_key = Some(key.to_string());
        }
        self.notice.show("Key changed successfully");
    }

    /// Settle a failed key change: the key is left unchanged
    pub fn fail_key_change(&mut self, error: &StoreError) {
        log::warn!("key change failed: {}", error);
        self.notice.show(format!("Error changing key: {}", error));
    }

    /// Persist a key change picked in the key dialog
    pub fn change_key(&mut self, store: &mut dyn SongStore, key: SongKey) {
        if let Some(request) = self.key_save_request(key) {
            if let Err(error) = store.save(
                &request.id,
                &request.content,
                None,
                Some(&request.original_key),
            ) {
                self.fail_key_change(&error);
                return;
            }
        }
        self.apply_key_change(key);
    }
}

/// Length of a paragraph's edit buffer with ALL whitespace removed
fn stripped_len(paragraph: &Paragraph) -> usize {
    paragraph
        .edit_text
        .as_deref()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing_session(title: &str, texts: &[&str]) -> EditorSession {
        let mut session = EditorSession::new("song-1");
        session.initialize(Some(Song::new("song-1", "Old", "Old line one")));
        session.enter_edit_mode();
        session.edit_title = title.to_string();
        session.paragraphs = texts
            .iter()
            .map(|t| {
                let mut p = Paragraph::verse();
                p.edit_text = Some(t.to_string());
                p
            })
            .collect();
        session
    }

    #[test]
    fn begin_save_rejects_short_titles_before_touching_paragraphs() {
        let mut session = editing_session("Ab", &["perfectly fine text"]);
        assert!(session.begin_save().is_none());
        assert_eq!(session.notice.text, "Title must have at least 3 characters");
        assert!(session.is_edit_mode);
        assert!(!session.is_saving);
        // Paragraphs were not pruned or synced
        assert!(session.paragraphs[0].lines.is_empty());
    }

    #[test]
    fn begin_save_requires_one_substantial_paragraph() {
        let mut session = editing_session("Fine Title", &["a b", " 1 "]);
        assert!(session.begin_save().is_none());
        assert_eq!(
            session.notice.text,
            "Each paragraph must have at least 3 characters"
        );
    }

    #[test]
    fn whitespace_does_not_count_toward_paragraph_length() {
        // "a  b  c" has 3 non-whitespace chars, exactly at the minimum
        let mut session = editing_session("Fine Title", &["a  b  c"]);
        assert!(session.begin_save().is_some());
    }

    #[test]
    fn begin_save_prunes_and_syncs_then_serializes() {
        let mut session = editing_session("Fine Title", &["Valid line", "1"]);
        let request = session.begin_save().expect("save should validate");

        assert_eq!(session.paragraphs.len(), 1);
        assert_eq!(session.paragraphs[0].lines[0].text, "Valid line");
        assert!(session.is_saving);
        match request {
            SaveRequest::Update { id, title, content } => {
                assert_eq!(id, "song-1");
                assert_eq!(title, "Fine Title");
                assert_eq!(content, "Valid line");
            }
            other => panic!("expected update request, got {:?}", other),
        }
    }

    #[test]
    fn complete_save_without_pending_request_is_a_no_op() {
        let mut session = editing_session("Fine Title", &["Valid line"]);
        session.complete_save(None);
        assert!(session.is_edit_mode, "no pending save, state must not change");
    }

    #[test]
    fn notice_dismiss_keeps_the_last_text() {
        let mut notice = Notice::default();
        notice.show("Changes saved to cloud");
        assert!(notice.visible);

        notice.dismiss();
        assert!(!notice.visible);
        assert_eq!(notice.text, "Changes saved to cloud");
    }
}
