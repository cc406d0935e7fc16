//! Étape de construction : du pool à plat vers l'arbre ordonné.
//!
//! L'ordre de niveau zéro pilote l'ordre des racines ; la liste
//! d'identifiants enregistrée de chaque menu pilote ses enfants. Le pool
//! est consommé destructivement : un élément placé en est retiré, ce qui
//! garantit qu'aucun élément n'apparaît deux fois et qu'une référence
//! circulaire se résout en « introuvable » au lieu de boucler.

use crate::model::Item;

/// Construit la liste ordonnée des racines à partir du pool fusionné.
///
/// Retourne l'arbre et un booléen indiquant que l'ordre de niveau zéro
/// doit être réécrit : ordre d'origine vide, identifiant ordonné absent
/// du pool, ou éléments restants non couverts par l'ordre.
pub fn build_hierarchy(pool: &mut Vec<Item>, level_zero: &[String]) -> (Vec<Item>, bool) {
    let mut result = Vec::new();
    let mut must_rewrite = level_zero.is_empty();

    for id in level_zero {
        // Recherche volontairement sensible à la casse, comportement
        // historique de la construction (les recherches utilisateur
        // sont, elles, insensibles à la casse).
        match pool.iter().position(|item| item.id == *id) {
            Some(index) => {
                let mut item = pool.remove(index);
                if item.is_menu() {
                    let subitem_ids = item.subitem_ids().to_vec();
                    item.children = resolve_children(&subitem_ids, pool);
                }
                result.push(item);
            }
            None => {
                // Identifiant périmé : ignoré sans placeholder, mais
                // l'ordre enregistré ne reflète plus la réalité.
                must_rewrite = true;
            }
        }
    }

    // Les éléments restants (nouveaux, jamais ordonnés) passent en fin
    // de liste, dans l'ordre du pool.
    if !pool.is_empty() {
        must_rewrite = true;
        result.append(pool);
    }

    (result, must_rewrite)
}

/// Résout une liste d'identifiants enregistrée contre le pool restant,
/// récursivement pour les sous-menus.
fn resolve_children(subitem_ids: &[String], pool: &mut Vec<Item>) -> Vec<Item> {
    let mut children = Vec::new();

    for id in subitem_ids {
        let Some(index) = pool.iter().position(|item| item.id == *id) else {
            // Enfant absent du pool restant : ignoré pour ce menu.
            continue;
        };
        let mut child = pool.remove(index);
        if child.is_menu() {
            let grandchild_ids = child.subitem_ids().to_vec();
            child.children = resolve_children(&grandchild_ids, pool);
        }
        children.push(child);
    }

    children
}
