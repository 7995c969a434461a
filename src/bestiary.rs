use crate::error::{EncounterError, LookupError, SchemaError};
use crate::importer::import_manual;
use crate::model::Monster;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The merged name-to-monster table built from one or more manual files.
/// Built once, read-only afterwards; keys are lower-cased record names and
/// lookups are exact apart from case.
#[derive(Debug)]
pub struct Bestiary {
    monsters: HashMap<String, Monster>,
}

impl Bestiary {
    /// Builds a bestiary from an explicit list of manual files, imported in
    /// the given order. When two files define the same monster name the
    /// later file wins, so the caller's ordering decides collisions.
    ///
    /// # Errors
    /// Fails on the first file or record the importer rejects.
    pub fn load(paths: &[PathBuf]) -> Result<Self, EncounterError> {
        let mut monsters = HashMap::new();
        for path in paths {
            for monster in import_manual(path)? {
                let key = monster.name.to_lowercase();
                if let Some(previous) = monsters.insert(key, monster) {
                    debug!(
                        "Record \"{}\" from an earlier manual was overwritten by {}",
                        previous.name,
                        path.display()
                    );
                }
            }
        }
        info!("Bestiary holds {} monsters from {} manuals", monsters.len(), paths.len());
        Ok(Self { monsters })
    }

    /// Builds a bestiary from every `.json` file under `dir`, recursively.
    /// Paths are sorted before importing so the result never depends on
    /// filesystem enumeration order.
    ///
    /// # Errors
    /// Fails if the directory cannot be walked or any file fails to import.
    pub fn load_dir(dir: &Path) -> Result<Self, EncounterError> {
        let mut paths = Vec::new();
        collect_manual_files(dir, &mut paths)?;
        paths.sort();
        Self::load(&paths)
    }

    /// Looks up a monster by name, case-insensitively. No fuzzy matching.
    ///
    /// # Errors
    /// Returns a `LookupError::MonsterNotFound` for unknown names.
    pub fn get(&self, name: &str) -> Result<&Monster, LookupError> {
        self.monsters
            .get(&name.to_lowercase())
            .ok_or_else(|| LookupError::MonsterNotFound {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}

fn collect_manual_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), SchemaError> {
    let io_error = |source| SchemaError::Io {
        path: dir.display().to_string(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_manual_files(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    Ok(())
}
