//! Backend fichiers : un répertoire contenant un document JSON par élément.
//!
//! Chaque fichier `*.json` décrit un menu ou une action (les profils sont
//! imbriqués dans leur action). L'écriture produit `<id>.json`, la
//! suppression retire le fichier. Un fichier illisible ou mal formé est
//! signalé en avertissement et ignoré, jamais fatal pour le scan.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FmError, Result};
use crate::model::{Item, ItemKind};
use crate::provider::{ItemProvider, ReadOutcome};

/// Format sur disque d'un élément.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ItemFile {
    Menu {
        id: String,
        label: String,
        #[serde(default = "default_enabled")]
        enabled: bool,
        #[serde(default)]
        items: Vec<String>,
    },
    Action {
        id: String,
        label: String,
        #[serde(default = "default_enabled")]
        enabled: bool,
        #[serde(default)]
        profiles: Vec<ProfileFile>,
    },
}

/// Format sur disque d'un profil, imbriqué dans son action.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileFile {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    command: String,
    #[serde(default)]
    parameters: String,
}

fn default_enabled() -> bool {
    true
}

impl From<ItemFile> for Item {
    fn from(file: ItemFile) -> Self {
        match file {
            ItemFile::Menu {
                id,
                label,
                enabled,
                items,
            } => {
                let mut menu = Item::menu(id, label, items);
                menu.enabled = enabled;
                menu
            }
            ItemFile::Action {
                id,
                label,
                enabled,
                profiles,
            } => {
                let profiles = profiles
                    .into_iter()
                    .map(|p| Item::profile(p.id, p.label, p.command, p.parameters))
                    .collect();
                let mut action = Item::action(id, label, profiles);
                action.enabled = enabled;
                action
            }
        }
    }
}

impl TryFrom<&Item> for ItemFile {
    type Error = FmError;

    fn try_from(item: &Item) -> Result<Self> {
        match &item.kind {
            ItemKind::Menu { subitem_ids } => Ok(ItemFile::Menu {
                id: item.id.clone(),
                label: item.label.clone(),
                enabled: item.enabled,
                items: subitem_ids.clone(),
            }),
            ItemKind::Action => {
                let profiles = item
                    .children
                    .iter()
                    .map(|p| match &p.kind {
                        ItemKind::Profile {
                            command,
                            parameters,
                        } => Ok(ProfileFile {
                            id: p.id.clone(),
                            label: p.label.clone(),
                            command: command.clone(),
                            parameters: parameters.clone(),
                        }),
                        _ => Err(FmError::Other(format!(
                            "L'action « {} » contient un enfant qui n'est pas un profil",
                            item.id
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ItemFile::Action {
                    id: item.id.clone(),
                    label: item.label.clone(),
                    enabled: item.enabled,
                    profiles,
                })
            }
            ItemKind::Profile { .. } => Err(FmError::Other(format!(
                "Un profil ne peut pas être écrit seul ({})",
                item.id
            ))),
        }
    }
}

/// Backend stockant ses éléments dans un répertoire de fichiers JSON.
pub struct FileProvider {
    id: String,
    root: PathBuf,
    read_only: bool,
}

impl FileProvider {
    /// Crée un backend inscriptible sur le répertoire donné.
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            read_only: false,
        }
    }

    /// Crée un backend en lecture seule (répertoire système par exemple).
    pub fn read_only(id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            read_only: true,
        }
    }

    /// Chemin du fichier d'un élément.
    fn item_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }
}

impl ItemProvider for FileProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_items(&self) -> Result<ReadOutcome> {
        let mut outcome = ReadOutcome::default();

        let mut entries: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file() && path.extension().map(|ext| ext == "json").unwrap_or(false)
            })
            .collect();
        // L'ordre de readdir n'est pas garanti ; trier pour une lecture
        // reproductible d'un scan à l'autre.
        entries.sort();

        for path in entries {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(error) => {
                    outcome
                        .warnings
                        .push(format!("Fichier illisible {} : {}", path.display(), error));
                    continue;
                }
            };
            match serde_json::from_str::<ItemFile>(&content) {
                Ok(file) => {
                    let mut item = Item::from(file);
                    item.set_provider(&self.id);
                    outcome.items.push(item);
                }
                Err(error) => {
                    outcome
                        .warnings
                        .push(format!("Fichier mal formé {} : {}", path.display(), error));
                }
            }
        }

        Ok(outcome)
    }

    fn is_willing_to_write(&self) -> bool {
        if self.read_only {
            return false;
        }
        fs::metadata(&self.root)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false)
    }

    fn is_writable(&self, item: &Item) -> bool {
        if !self.is_willing_to_write() {
            return false;
        }
        // Un élément jamais sauvegardé peut être adopté par ce backend.
        match &item.provider {
            Some(provider) => provider.eq_ignore_ascii_case(&self.id),
            None => true,
        }
    }

    fn write_item(&self, item: &Item) -> Result<()> {
        if !self.is_willing_to_write() {
            return Err(FmError::ProviderNotWilling(self.id.clone()));
        }
        if !self.is_writable(item) {
            return Err(FmError::ItemReadOnly(item.id.clone()));
        }
        let file = ItemFile::try_from(item)?;
        let mut content = serde_json::to_string_pretty(&file)?;
        content.push('\n');
        fs::write(self.item_path(&item.id), content)?;
        Ok(())
    }

    fn delete_item(&self, item: &Item) -> Result<()> {
        if !self.is_willing_to_write() {
            return Err(FmError::ProviderNotWilling(self.id.clone()));
        }
        let path = self.item_path(&item.id);
        if !path.is_file() {
            return Err(FmError::ItemNotFound(item.id.clone()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}
