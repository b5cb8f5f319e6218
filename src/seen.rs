use crate::types::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Set of article identifiers already delivered in previous runs.
///
/// Identifiers are only ever added, never removed. The set is loaded at the
/// start of a run and written back once delivery is confirmed.
#[derive(Debug)]
pub struct SeenStore {
    path: PathBuf,
    ids: HashSet<String>,
}

impl SeenStore {
    /// Reads the id list from `path`. A missing file means a first run and an
    /// unreadable or corrupt file is downgraded to an empty set, so a broken
    /// dedup history never blocks the digest.
    pub fn load(path: &Path) -> Self {
        let ids = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list.into_iter().collect(),
                Err(e) => {
                    warn!(
                        "Seen-articles file {} is corrupt, treating as empty: {}",
                        path.display(),
                        e
                    );
                    HashSet::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No seen-articles file at {}, first run", path.display());
                HashSet::new()
            }
            Err(e) => {
                warn!(
                    "Cannot read seen-articles file {}, treating as empty: {}",
                    path.display(),
                    e
                );
                HashSet::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            ids,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Adds an identifier. Idempotent.
    pub fn record(&mut self, id: String) {
        self.ids.insert(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replaces the file contents with the current set, written as a sorted
    /// JSON list. Goes through a temp file in the same directory plus a
    /// rename, so the previous list survives a failed write.
    pub fn save(&self) -> Result<()> {
        let mut ids: Vec<&String> = self.ids.iter().collect();
        ids.sort();
        let json = serde_json::to_string_pretty(&ids)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            "Saved {} seen article ids to {}",
            self.ids.len(),
            self.path.display()
        );
        Ok(())
    }
}
