//! Pipeline de lecture : fusion, construction, tri et filtrage de
//! l'arbre effectif des éléments.

pub mod filter;
pub mod hierarchy;
pub mod merge;
pub mod sort;

pub use filter::filter_tree;
pub use hierarchy::build_hierarchy;
pub use merge::merge_providers;
pub use sort::sort_tree;

use crate::model::{refresh_forest, root_ids, Item};
use crate::provider::ItemProvider;
use crate::settings::{OrderMode, OrderStore, Population};

/// Résultat d'un chargement complet.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Racines de l'arbre effectif, ordonnées et filtrées.
    pub items: Vec<Item>,
    /// Avertissements accumulés en chemin, jamais fatals.
    pub warnings: Vec<String>,
    /// L'ordre de niveau zéro a-t-il été réécrit pendant ce chargement ?
    pub order_rewritten: bool,
}

/// Registre des backends, dans leur ordre de fusion.
#[derive(Default)]
pub struct Registry {
    providers: Vec<Box<dyn ItemProvider>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un backend en fin de liste.
    pub fn register(&mut self, provider: Box<dyn ItemProvider>) {
        self.providers.push(provider);
    }

    pub fn providers(&self) -> &[Box<dyn ItemProvider>] {
        &self.providers
    }

    /// Retrouve un backend par identifiant, insensible à la casse.
    pub fn provider_named(&self, id: &str) -> Option<&dyn ItemProvider> {
        self.providers
            .iter()
            .find(|p| p.id().eq_ignore_ascii_case(id))
            .map(|p| p.as_ref())
    }

    /// Backend capable d'écrire l'élément donné : son propriétaire s'il
    /// accepte, sinon le premier backend volontaire.
    pub fn writable_provider_for(&self, item: &Item) -> Option<&dyn ItemProvider> {
        if let Some(owner) = item.provider.as_deref().and_then(|id| self.provider_named(id)) {
            if owner.is_writable(item) {
                return Some(owner);
            }
        }
        self.providers
            .iter()
            .find(|p| p.is_willing_to_write() && p.is_writable(item))
            .map(|p| p.as_ref())
    }

    /// Exécute le pipeline complet de lecture.
    ///
    /// Fusionne les lectures de tous les backends, construit la
    /// hiérarchie pilotée par l'ordre de niveau zéro, persiste un ordre
    /// frais si l'ancien ne couvrait pas tout, trie selon le mode,
    /// recalcule la validité de chaque nœud puis filtre. Aucune étape
    /// n'est fatale : les échecs se dégradent en avertissements et en
    /// « moins d'éléments visibles ».
    pub fn load(
        &self,
        order_store: &mut dyn OrderStore,
        order_mode: OrderMode,
        population: &Population,
    ) -> LoadResult {
        let mut warnings = Vec::new();

        let mut pool = merge_providers(&self.providers, &mut warnings);

        let level_zero = order_store.get();
        let (mut items, must_rewrite) = build_hierarchy(&mut pool, &level_zero);

        let mut order_rewritten = false;
        if must_rewrite {
            // L'ordre frais reflète l'arbre construit, avant tri.
            match order_store.set(root_ids(&items)) {
                Ok(()) => order_rewritten = true,
                Err(error) => {
                    warnings.push(format!("Échec de la sauvegarde de l'ordre : {}", error));
                }
            }
        }

        sort_tree(&mut items, order_mode);
        refresh_forest(&mut items);
        let items = filter_tree(items, population);

        LoadResult {
            items,
            warnings,
            order_rewritten,
        }
    }
}
