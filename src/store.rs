//! Local mirror of the interaction log: a JSON array of entry strings in
//! the user's config directory, overwritten wholesale on every append.

use std::path::{Path, PathBuf};

const MIRROR_FILE: &str = "interactions.json";

/// Where the mirror lives. `None` when no config directory can be
/// resolved (the recorder then logs a warning and keeps going).
pub fn mirror_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "ValentineCard", "ValentineTracker")
        .map(|dirs| dirs.config_dir().join(MIRROR_FILE))
}

/// Overwrite the mirror with the full interaction log (last writer wins).
pub fn save_interactions_to(path: &Path, interactions: &[String]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let data = serde_json::to_string_pretty(interactions).map_err(|e| e.to_string())?;
    std::fs::write(path, data).map_err(|e| e.to_string())?;
    Ok(())
}

/// Read the mirror back, tolerating a missing or unreadable file. Used
/// only to report on earlier sessions; the in-memory log always starts
/// empty.
pub fn load_interactions_from(path: &Path) -> Vec<String> {
    let Ok(data) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    serde_json::from_str(&data).unwrap_or_default()
}

/// Earlier sessions' entries at the default mirror location.
pub fn load_interactions() -> Vec<String> {
    match mirror_path() {
        Some(path) => load_interactions_from(&path),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_overwrites_previous_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MIRROR_FILE);

        let first = vec!["CLICK | A | Q1: Do you like me?".to_string()];
        save_interactions_to(&path, &first).unwrap();

        let second = vec![
            "CLICK | A | Q1: Do you like me?".to_string(),
            "METER | Love Meter set to 500% | Q2: Love Meter".to_string(),
        ];
        save_interactions_to(&path, &second).unwrap();

        assert_eq!(load_interactions_from(&path), second);
    }

    #[test]
    fn missing_or_garbled_mirror_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(MIRROR_FILE);
        assert!(load_interactions_from(&missing).is_empty());

        std::fs::write(&missing, "not json at all").unwrap();
        assert!(load_interactions_from(&missing).is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("config").join(MIRROR_FILE);
        save_interactions_to(&nested, &["PAGE_LOAD | Website opened | Q1: Do you like me?".to_string()])
            .unwrap();
        assert_eq!(load_interactions_from(&nested).len(), 1);
    }
}
