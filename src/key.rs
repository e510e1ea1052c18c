//! Original-key labels
//!
//! A song carries an optional musical key label (e.g. "C#m") edited via
//! a dedicated dialog. The label is plain metadata: it is not part of
//! the lyrics grammar and nothing here transposes chords.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-G])([#b]?)(m?)$").expect("key pattern is valid"));

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Major,
    Minor,
}

/// A parsed key label: root letter, optional accidental, optional
/// minor quality
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SongKey {
    pub root: char,
    pub accidental: Accidental,
    pub quality: Quality,
}

impl Default for SongKey {
    /// The key dialog falls back to C major when a song has no key or
    /// an unparseable label
    fn default() -> Self {
        Self {
            root: 'C',
            accidental: Accidental::Natural,
            quality: Quality::Major,
        }
    }
}

impl SongKey {
    /// Parse a label like "C", "F#" or "Bbm". Returns None for anything
    /// outside the `[A-G][#b]?m?` shape.
    pub fn parse(label: &str) -> Option<Self> {
        let caps = KEY_RE.captures(label)?;

        let root = caps[1].chars().next()?;
        let accidental = match &caps[2] {
            "#" => Accidental::Sharp,
            "b" => Accidental::Flat,
            _ => Accidental::Natural,
        };
        let quality = if &caps[3] == "m" {
            Quality::Minor
        } else {
            Quality::Major
        };

        Some(Self {
            root,
            accidental,
            quality,
        })
    }

    /// Parse a label, falling back to the C-major default
    pub fn parse_or_default(label: Option<&str>) -> Self {
        label.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for SongKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        match self.accidental {
            Accidental::Sharp => write!(f, "#")?,
            Accidental::Flat => write!(f, "b")?,
            Accidental::Natural => {}
        }
        if self.quality == Quality::Minor {
            write!(f, "m")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for label in ["C", "F#", "Bb", "Am", "C#m", "Ebm", "G"] {
            let key = SongKey::parse(label).unwrap_or_else(|| panic!("{} should parse", label));
            assert_eq!(key.to_string(), label);
        }
    }

    #[test]
    fn malformed_labels_are_rejected() {
        for label in ["H", "c", "C##", "A#M", "", "Cmaj7", "b"] {
            assert!(SongKey::parse(label).is_none(), "{} should not parse", label);
        }
    }

    #[test]
    fn dialog_fallback_is_c_major() {
        assert_eq!(SongKey::parse_or_default(None).to_string(), "C");
        assert_eq!(SongKey::parse_or_default(Some("nonsense")).to_string(), "C");
        assert_eq!(SongKey::parse_or_default(Some("F#m")).to_string(), "F#m");
    }
}
