//! Helpers pour les tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use fm_actions::model::Item;

/// Écrit le fichier JSON d'une action dans un répertoire de backend.
pub fn write_action_file(dir: &Path, id: &str, label: &str, enabled: bool, command: &str) {
    let content = format!(
        r#"{{"type":"action","id":"{}","label":"{}","enabled":{},"profiles":[{{"id":"p0","label":"Défaut","command":"{}"}}]}}"#,
        id, label, enabled, command
    );
    fs::write(dir.join(format!("{}.json", id)), content).expect("Failed to write action file");
}

/// Écrit le fichier JSON d'un menu dans un répertoire de backend.
pub fn write_menu_file(dir: &Path, id: &str, label: &str, items: &[&str]) {
    let items = items
        .iter()
        .map(|i| format!(r#""{}""#, i))
        .collect::<Vec<_>>()
        .join(",");
    let content = format!(
        r#"{{"type":"menu","id":"{}","label":"{}","items":[{}]}}"#,
        id, label, items
    );
    fs::write(dir.join(format!("{}.json", id)), content).expect("Failed to write menu file");
}

/// Environnement de test : un répertoire temporaire contenant des
/// sous-répertoires de backends et un fichier de préférences.
pub struct TestEnv {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Crée un sous-répertoire de backend et retourne son chemin.
    pub fn provider_dir(&self, name: &str) -> PathBuf {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).expect("Failed to create provider dir");
        dir
    }

    /// Chemin du fichier de préférences.
    pub fn settings_path(&self) -> PathBuf {
        self.root.join("settings.json")
    }
}

/// Action en mémoire avec un profil valide.
pub fn memory_action(id: &str, label: &str, enabled: bool) -> Item {
    let mut action = Item::action(
        id,
        label,
        vec![Item::profile("p0", "Défaut", "/bin/sh", "")],
    );
    action.enabled = enabled;
    action
}

/// Identifiants d'une tranche d'éléments, dans l'ordre.
pub fn ids(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

/// Vérifie récursivement que chaque élément satisfait le prédicat.
pub fn all_items(items: &[Item], predicate: &dyn Fn(&Item) -> bool) -> bool {
    items
        .iter()
        .all(|item| predicate(item) && all_items(&item.children, predicate))
}
