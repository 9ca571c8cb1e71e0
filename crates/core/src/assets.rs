//! Named ASCII-art blocks.
//!
//! Spaces in art are converted to [`BLANK_CHARACTER`] on insert, so the gaps
//! in a sprite stay transparent when it is merged over other content.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::CoreError;
use crate::types::BLANK_CHARACTER;

#[derive(Debug, Clone, Default)]
pub struct Assets {
    entries: HashMap<String, String>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.txt` file in `dir`, keyed by file stem.
    pub fn load_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let mut assets = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                let content = fs::read_to_string(&path)?;
                assets.insert(name, &content);
            }
        }
        log::debug!("loaded {} assets", assets.len());
        Ok(assets)
    }

    pub fn insert(&mut self, name: impl Into<String>, content: &str) {
        self.entries
            .insert(name.into(), content.replace(' ', &BLANK_CHARACTER.to_string()));
    }

    /// Look up an asset; unknown names are an error, never blank art.
    pub fn get(&self, name: &str) -> Result<&str, CoreError> {
        self.entries
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| CoreError::MissingAsset(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_blank() {
        let mut assets = Assets::new();
        assets.insert("wall", "# #");
        assert_eq!(assets.get("wall").unwrap(), "#\u{2800}#");
    }

    #[test]
    fn test_missing_asset_fails() {
        let assets = Assets::new();
        assert_eq!(
            assets.get("apple"),
            Err(CoreError::MissingAsset("apple".to_string()))
        );
    }

    #[test]
    fn test_load_dir() {
        let dir = std::env::temp_dir().join(format!("asciiscape-assets-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("ball.txt"), "(o)").unwrap();
        fs::write(dir.join("notes.md"), "ignored").unwrap();

        let assets = Assets::load_dir(&dir).unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets.get("ball").unwrap(), "(o)");

        fs::remove_dir_all(&dir).unwrap();
    }
}
