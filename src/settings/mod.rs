//! Préférences persistées : mode de tri, filtres de chargement, ordre
//! de niveau zéro et backends configurés.
//!
//! Les préférences vivent dans un fichier JSON unique sous le répertoire
//! de configuration de l'utilisateur. Un fichier absent donne des
//! préférences par défaut ; la sauvegarde crée les répertoires parents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FmError, Result};

/// Mode d'ordonnancement de l'arbre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderMode {
    /// Ordre manuel : l'ordre de niveau zéro fait foi.
    #[default]
    Manual,
    /// Tri alphabétique croissant sur les libellés, à chaque niveau.
    AlphaAscending,
    /// Tri alphabétique décroissant sur les libellés, à chaque niveau.
    AlphaDescending,
}

/// Indulgence du filtrage : faut-il garder les éléments désactivés
/// et/ou invalides ?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Population {
    #[serde(default)]
    pub load_disabled: bool,
    #[serde(default)]
    pub load_invalid: bool,
}

/// Un backend configuré dans les préférences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Identifiant du backend.
    pub id: String,
    /// Répertoire des fichiers d'éléments.
    pub path: PathBuf,
    /// Backend en lecture seule (répertoire système).
    #[serde(default)]
    pub read_only: bool,
}

/// Contrat de persistance de l'ordre de niveau zéro.
pub trait OrderStore {
    /// Ordre enregistré des identifiants racines ; vide si jamais écrit.
    fn get(&self) -> Vec<String>;

    /// Remplace l'ordre enregistré.
    fn set(&mut self, ids: Vec<String>) -> Result<()>;
}

/// Préférences de l'application, miroir du fichier sur disque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub order_mode: OrderMode,
    #[serde(default)]
    pub population: Population,
    /// Ordre de niveau zéro : identifiants des éléments racines.
    #[serde(default)]
    pub level_zero: Vec<String>,
    /// Backends configurés, dans l'ordre de fusion.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,

    /// Chemin du fichier de préférences (jamais sérialisé).
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Settings {
    /// Chemin par défaut du fichier de préférences.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fm-actions")
            .join("settings.json")
    }

    /// Charge les préférences depuis le fichier donné.
    ///
    /// Un fichier absent donne les préférences par défaut ; un fichier
    /// mal formé est une erreur.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.is_file() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<Settings>(&content)
                .map_err(|error| FmError::Settings(format!("{} : {}", path.display(), error)))?
        } else {
            Settings::default()
        };
        settings.path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Sauvegarde les préférences à leur emplacement d'origine.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| FmError::Settings("aucun chemin de sauvegarde".to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }
}

impl OrderStore for Settings {
    fn get(&self) -> Vec<String> {
        self.level_zero.clone()
    }

    fn set(&mut self, ids: Vec<String>) -> Result<()> {
        self.level_zero = ids;
        self.save()
    }
}

/// Magasin d'ordre en mémoire, pour les tests et les hôtes sans disque.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    order: Vec<String>,
    /// Nombre d'écritures reçues.
    pub writes: usize,
}

impl MemoryOrderStore {
    pub fn new(order: Vec<String>) -> Self {
        Self { order, writes: 0 }
    }
}

impl OrderStore for MemoryOrderStore {
    fn get(&self) -> Vec<String> {
        self.order.clone()
    }

    fn set(&mut self, ids: Vec<String>) -> Result<()> {
        self.order = ids;
        self.writes += 1;
        Ok(())
    }
}
