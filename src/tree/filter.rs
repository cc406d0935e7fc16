//! Étape de filtrage : ne garde que les éléments visibles.

use crate::model::{Item, ItemKind};
use crate::settings::Population;

/// Filtre récursivement l'arbre selon le prédicat de visibilité.
///
/// Un profil passe si `valid || load_invalid`. Un menu ou une action
/// passe si `(enabled || load_disabled) && (valid || load_invalid)` ;
/// ses enfants sont filtrés d'abord et la liste réduite installée avant
/// de garder l'élément. Les recalés ne sont simplement pas retenus.
/// Le filtrage intervient après le tri, les survivants gardent donc
/// l'ordre trié.
pub fn filter_tree(items: Vec<Item>, population: &Population) -> Vec<Item> {
    items
        .into_iter()
        .filter_map(|item| filter_item(item, population))
        .collect()
}

fn filter_item(mut item: Item, population: &Population) -> Option<Item> {
    let passes = match &item.kind {
        ItemKind::Profile { .. } => item.valid || population.load_invalid,
        ItemKind::Menu { .. } | ItemKind::Action => {
            (item.enabled || population.load_disabled) && (item.valid || population.load_invalid)
        }
    };
    if !passes {
        return None;
    }

    item.children = filter_tree(std::mem::take(&mut item.children), population);
    Some(item)
}
