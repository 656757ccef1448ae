use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

/// The set of content identifiers eligible for playback.
///
/// Loaded once at startup from the player's metadata file and read-only
/// afterwards. Each line of the file is one record; everything before the
/// first `|` is the identifier, the rest describes the recipe and is the
/// player's business.
#[derive(Debug, Default)]
pub struct VoiceCatalog {
    ids: HashSet<String>,
}

impl VoiceCatalog {
    /// Load a catalog from a delimited metadata file.
    ///
    /// Lines without a delimiter or with an empty identifier are skipped
    /// with a warning rather than failing the whole load.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut ids = HashSet::new();

        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            match line.split_once('|') {
                Some((id, _rest)) if !id.is_empty() => {
                    ids.insert(id.to_string());
                }
                _ => {
                    warn!(line = lineno + 1, "skipping malformed catalog record");
                }
            }
        }

        info!(count = ids.len(), ?path, "loaded voice-line catalog");
        Ok(Self { ids })
    }

    /// True if the identifier may be requested for playback.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over known identifiers (no particular order).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl FromIterator<String> for VoiceCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_catalog(tag: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vl-catalog-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        let path = dir.join("audio_metadata.csv");
        std::fs::write(&path, contents).expect("catalog file should be writable");
        path
    }

    #[test]
    fn loads_identifiers_before_first_delimiter() {
        let path = write_catalog(
            "basic",
            "aaaa-1111|Narrator|recipe-a\nbbbb-2222|Jaethal|recipe-b|extra|fields\n",
        );
        let catalog = VoiceCatalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("aaaa-1111"));
        assert!(catalog.contains("bbbb-2222"));
        assert!(!catalog.contains("Narrator"));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        let path = write_catalog("malformed", "good-id|x\n\nno-delimiter-here\n|empty-id\n\r\n");
        let catalog = VoiceCatalog::load(&path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("good-id"));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let path = write_catalog("crlf", "id-one|a\r\nid-two|b\r\n");
        let catalog = VoiceCatalog::load(&path).unwrap();

        assert!(catalog.contains("id-one"));
        assert!(catalog.contains("id-two"));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = VoiceCatalog::load("/nonexistent/audio_metadata.csv");
        assert!(result.is_err());
    }

    #[test]
    fn collects_from_iterator() {
        let catalog: VoiceCatalog = ["a".to_string(), "b".to_string()].into_iter().collect();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(catalog.iter().any(|id| id == "a"));
    }
}
