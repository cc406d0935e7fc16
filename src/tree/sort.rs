//! Étape de tri : réordonne chaque niveau de l'arbre selon le mode choisi.

use std::cmp::Ordering;

use crate::model::Item;
use crate::settings::OrderMode;

/// Trie l'arbre selon le mode d'ordonnancement.
///
/// `Manual` ne touche à rien. Les modes alphabétiques trient la racine
/// puis, récursivement, les enfants de chaque menu par comparaison des
/// libellés repliés en minuscules. Le tri est stable : deux libellés
/// égaux gardent leur ordre de construction. Les profils d'une action
/// conservent toujours leur ordre enregistré.
pub fn sort_tree(items: &mut [Item], mode: OrderMode) {
    match mode {
        OrderMode::Manual => {}
        OrderMode::AlphaAscending => sort_level(items, false),
        OrderMode::AlphaDescending => sort_level(items, true),
    }
}

fn sort_level(items: &mut [Item], descending: bool) {
    items.sort_by(|a, b| {
        let ordering = compare_labels(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    for item in items {
        if item.is_menu() {
            sort_level(&mut item.children, descending);
        }
    }
}

/// Comparaison de libellés repliés en minuscules, approximation sans
/// dépendance de la collation Unicode.
fn compare_labels(a: &Item, b: &Item) -> Ordering {
    a.label.to_lowercase().cmp(&b.label.to_lowercase())
}
