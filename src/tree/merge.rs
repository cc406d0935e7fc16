//! Étape de fusion : concatène les lectures de tous les backends.

use crate::provider::ItemProvider;
use crate::model::Item;

/// Demande sa liste à plat à chaque backend, dans l'ordre
/// d'enregistrement, et concatène le tout dans le pool fusionné.
/// Chaque élément est estampillé ici du backend qui l'a fourni, même
/// si le backend ne renseigne pas lui-même le champ `provider`.
///
/// Un backend en erreur ne contribue rien ; l'échec est dégradé en
/// avertissement, jamais propagé. Les identifiants en double entre
/// backends ne sont pas dédupliqués à ce stade.
pub fn merge_providers(
    providers: &[Box<dyn ItemProvider>],
    warnings: &mut Vec<String>,
) -> Vec<Item> {
    let mut pool = Vec::new();

    for provider in providers {
        match provider.read_items() {
            Ok(outcome) => {
                warnings.extend(outcome.warnings);
                for mut item in outcome.items {
                    item.set_provider(provider.id());
                    pool.push(item);
                }
            }
            Err(error) => {
                warnings.push(format!(
                    "Le backend « {} » n'a rien fourni : {}",
                    provider.id(),
                    error
                ));
            }
        }
    }

    pool
}
