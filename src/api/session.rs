//! WASM-owned editing session
//!
//! The session is the source of truth for edit-mode state; the UI
//! mirrors it via [`session_state`] after every operation. The remote
//! store stays on the JS side, so the save and key-change transitions
//! are split-phase: the engine hands JS a request describing the write,
//! JS runs it against the backend, then settles the outcome with the
//! matching complete/fail endpoint.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

use super::helpers;
use crate::key::SongKey;
use crate::models::{Paragraph, Song};
use crate::session::{EditorSession, KeyChangeRequest, Notice, Position, SaveRequest};
use crate::store::StoreError;
use crate::{wasm_info, wasm_warn};

lazy_static! {
    static ref SESSION: Mutex<Option<EditorSession>> = Mutex::new(None);
}

/// Run a closure against the live session
fn with_session<T>(f: impl FnOnce(&mut EditorSession) -> Result<T, JsValue>) -> Result<T, JsValue> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("Session lock poisoned"))?;
    let session = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("No song loaded"))?;
    f(session)
}

/// Snapshot of the session the UI binds to
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct SessionState {
    route_id: String,
    is_edit_mode: bool,
    is_saving: bool,
    edit_title: String,
    paragraphs: Vec<Paragraph>,
    notice: Notice,
}

impl SessionState {
    fn of(session: &EditorSession) -> Self {
        Self {
            route_id: session.route_id().to_string(),
            is_edit_mode: session.is_edit_mode,
            is_saving: session.is_saving,
            edit_title: session.edit_title.clone(),
            paragraphs: session.paragraphs.clone(),
            notice: session.notice.clone(),
        }
    }
}

/// What one toggle call asks of the UI
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ToggleResponse {
    /// Now editing (or left edit mode without a save); re-render
    Toggled,
    /// Validation failed; the notice carries the message
    Invalid { notice: Notice },
    /// Run this write against the backend, then call
    /// completeSave / failSave
    Save { request: SaveRequest },
}

/// Load a song into a fresh session
///
/// `route_id` is the route parameter: "new" for an unpersisted song,
/// otherwise the song's id. `song_js` may be null when the fetch found
/// nothing.
#[wasm_bindgen(js_name = loadSong)]
pub fn load_song(route_id: &str, song_js: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("loadSong: route {}", route_id);

    let song: Option<Song> = if song_js.is_null() || song_js.is_undefined() {
        None
    } else {
        Some(helpers::deserialize(song_js, "Failed to deserialize song")?)
    };

    let mut session = EditorSession::new(route_id);
    session.initialize(song);
    let state = SessionState::of(&session);

    let mut guard = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("Session lock poisoned"))?;
    *guard = Some(session);

    helpers::serialize(&state, "Failed to serialize session state")
}

/// Current session snapshot
#[wasm_bindgen(js_name = sessionState)]
pub fn session_state() -> Result<JsValue, JsValue> {
    with_session(|session| {
        helpers::serialize(&SessionState::of(session), "Failed to serialize session state")
    })
}

/// The edit toggle control: enter edit mode, or kick off a save
#[wasm_bindgen(js_name = toggleEditMode)]
pub fn toggle_edit_mode() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let response = if !session.is_edit_mode {
            session.enter_edit_mode();
            ToggleResponse::Toggled
        } else if session.song().is_none() || session.paragraphs.is_empty() {
            session.is_edit_mode = false;
            ToggleResponse::Toggled
        } else {
            match session.begin_save() {
                Some(request) => ToggleResponse::Save { request },
                None => ToggleResponse::Invalid {
                    notice: session.notice.clone(),
                },
            }
        };
        helpers::serialize(&response, "Failed to serialize toggle response")
    })
}

/// Settle a successful remote write; `new_id` comes from a create
#[wasm_bindgen(js_name = completeSave)]
pub fn complete_save(new_id: Option<String>) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.complete_save(new_id);
        helpers::serialize(&SessionState::of(session), "Failed to serialize session state")
    })
}

/// Settle a failed remote write
///
/// `permission_denied` marks backend authorization failures, which map
/// to a fixed message instead of raw provider error text.
#[wasm_bindgen(js_name = failSave)]
pub fn fail_save(permission_denied: bool, message: Option<String>) -> Result<JsValue, JsValue> {
    with_session(|session| {
        let error = store_error(permission_denied, message);
        wasm_warn!("save failed: {}", error);
        session.fail_save(&error);
        helpers::serialize(&SessionState::of(session), "Failed to serialize session state")
    })
}

/// Replace the editable title buffer
#[wasm_bindgen(js_name = setEditTitle)]
pub fn set_edit_title(title: &str) -> Result<(), JsValue> {
    with_session(|session| {
        session.edit_title = title.to_string();
        Ok(())
    })
}

/// Replace one paragraph's edit buffer
#[wasm_bindgen(js_name = setParagraphText)]
pub fn set_paragraph_text(index: usize, text: &str) -> Result<(), JsValue> {
    with_session(|session| {
        session.set_paragraph_text(index, text);
        Ok(())
    })
}

/// Insert an empty paragraph "above" or "below" the one at `index`;
/// returns the new paragraph's id so the UI can focus it
#[wasm_bindgen(js_name = addParagraph)]
pub fn add_paragraph(index: usize, position: &str) -> Result<String, JsValue> {
    let position = match position {
        "above" => Position::Above,
        "below" => Position::Below,
        other => {
            return Err(JsValue::from_str(&format!(
                "Unknown insert position: {}",
                other
            )))
        }
    };
    with_session(|session| Ok(session.add_paragraph(index, position)))
}

/// Remove the paragraph at `index` (the last paragraph stays)
#[wasm_bindgen(js_name = removeParagraph)]
pub fn remove_paragraph(index: usize) -> Result<(), JsValue> {
    with_session(|session| {
        session.remove_paragraph(index);
        Ok(())
    })
}

/// Current key for the key dialog (C major fallback applied)
#[wasm_bindgen(js_name = currentKey)]
pub fn current_key() -> Result<JsValue, JsValue> {
    with_session(|session| helpers::serialize(&session.current_key(), "Failed to serialize key"))
}

/// The write a key change needs, or null when the song is new and the
/// key only changes in memory (JS should then call completeKeyChange
/// directly)
#[wasm_bindgen(js_name = keySaveRequest)]
pub fn key_save_request(label: &str) -> Result<JsValue, JsValue> {
    let key = parse_key_label(label)?;
    with_session(|session| match session.key_save_request(key) {
        Some(request) => {
            helpers::serialize::<KeyChangeRequest>(&request, "Failed to serialize key request")
        }
        None => Ok(JsValue::NULL),
    })
}

/// Settle a successful key change
#[wasm_bindgen(js_name = completeKeyChange)]
pub fn complete_key_change(label: &str) -> Result<JsValue, JsValue> {
    let key = parse_key_label(label)?;
    with_session(|session| {
        session.apply_key_change(key);
        helpers::serialize(&SessionState::of(session), "Failed to serialize session state")
    })
}

/// Settle a failed key change
#[wasm_bindgen(js_name = failKeyChange)]
pub fn fail_key_change(permission_denied: bool, message: Option<String>) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.fail_key_change(&store_error(permission_denied, message));
        helpers::serialize(&SessionState::of(session), "Failed to serialize session state")
    })
}

fn parse_key_label(label: &str) -> Result<SongKey, JsValue> {
    SongKey::parse(label)
        .ok_or_else(|| JsValue::from_str(&format!("Unparseable key label: {}", label)))
}

fn store_error(permission_denied: bool, message: Option<String>) -> StoreError {
    if permission_denied {
        StoreError::PermissionDenied
    } else {
        StoreError::Backend(message.unwrap_or_else(|| "unknown error".to_string()))
    }
}
