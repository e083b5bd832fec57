//! Versioned JSON save files for characters.

use crate::character::Character;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current save file version.
pub const SAVE_VERSION: u32 = 1;

/// Summary readable without deserializing the whole character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMetadata {
    pub name: String,
    /// Display names, as shown in a save picker.
    pub race: String,
    pub class: String,
    pub level: u8,
    /// Label of the chosen subclass, when one is recorded.
    #[serde(default)]
    pub subclass: Option<String>,
}

impl CharacterMetadata {
    fn describe(character: &Character) -> Self {
        // The first class choice in catalog order is the subclass pick
        let subclass = character
            .class_features
            .iter()
            .find(|s| s.choice_label.is_some())
            .and_then(|s| s.choice_label.clone());
        Self {
            name: character.name.clone(),
            race: character.race.name().to_string(),
            class: character.class.name().to_string(),
            level: character.level,
            subclass,
        }
    }
}

/// A character save file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCharacter {
    pub version: u32,
    /// Seconds since the Unix epoch.
    pub saved_at: String,
    pub character: Character,
    pub metadata: CharacterMetadata,
}

impl SavedCharacter {
    pub fn new(character: Character) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: timestamp(),
            metadata: CharacterMetadata::describe(&character),
            character,
        }
    }

    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        debug!(path = %path.display(), "Saved character");
        Ok(())
    }

    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let saved: Self = serde_json::from_str(&content)?;
        check_version(path.as_ref(), saved.version)?;
        Ok(saved)
    }

    /// Read only the version and metadata of a save file.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<CharacterMetadata, PersistError> {
        #[derive(Deserialize)]
        struct Header {
            version: u32,
            metadata: CharacterMetadata,
        }

        let content = fs::read_to_string(path.as_ref()).await?;
        let header: Header = serde_json::from_str(&content)?;
        check_version(path.as_ref(), header.version)?;
        Ok(header.metadata)
    }
}

fn check_version(path: &Path, found: u32) -> Result<(), PersistError> {
    if found != SAVE_VERSION {
        warn!(path = %path.display(), found, "Save file version mismatch");
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found,
        });
    }
    Ok(())
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_secs().to_string()
}

/// A save file found on disk.
#[derive(Debug, Clone)]
pub struct CharacterSaveInfo {
    pub path: PathBuf,
    pub metadata: CharacterMetadata,
}

/// Every readable character save in `dir`, sorted by character name.
///
/// A missing directory is an empty list. Files that fail to parse or carry
/// another version are skipped.
pub async fn list_character_saves(dir: impl AsRef<Path>) -> Result<Vec<CharacterSaveInfo>, PersistError> {
    let dir = dir.as_ref();
    if !fs::try_exists(dir).await? {
        return Ok(Vec::new());
    }

    let mut saves = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        match SavedCharacter::peek_metadata(&path).await {
            Ok(metadata) => saves.push(CharacterSaveInfo { path, metadata }),
            Err(e) => debug!(path = %path.display(), error = %e, "Skipping unreadable save"),
        }
    }

    saves.sort_by(|a, b| a.metadata.name.cmp(&b.metadata.name));
    Ok(saves)
}

/// `<dir>/<name>.json` with every non-alphanumeric character replaced.
pub fn character_save_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    let file_stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    dir.as_ref().join(format!("{file_stem}.json"))
}
