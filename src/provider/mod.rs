//! Abstraction des backends de stockage des éléments.
//!
//! Chaque backend (« provider ») sait lister ses propres éléments à plat
//! et accepter l'écriture ou la suppression des éléments qu'il possède.
//! Le pipeline de lecture ne dépend que de ce contrat ; les backends
//! concrets vivent dans les sous-modules.

pub mod file;
pub mod memory;

pub use file::FileProvider;
pub use memory::MemoryProvider;

use crate::error::Result;
use crate::model::Item;

/// Résultat d'une lecture de backend : les éléments trouvés et les
/// avertissements non fatals rencontrés en chemin.
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub items: Vec<Item>,
    pub warnings: Vec<String>,
}

/// Contrat d'un backend de stockage.
///
/// `read_items` est synchrone et ne doit modifier aucun état global.
/// Le chemin d'écriture (`write_item`, `delete_item`) n'est utilisé que
/// par les commandes de modification, jamais par le pipeline de lecture.
pub trait ItemProvider {
    /// Identifiant du backend, comparé sans tenir compte de la casse.
    fn id(&self) -> &str;

    /// Liste à plat des éléments du backend.
    fn read_items(&self) -> Result<ReadOutcome>;

    /// Le backend accepte-t-il des écritures en général ?
    fn is_willing_to_write(&self) -> bool;

    /// Cet élément précis est-il modifiable par ce backend ?
    fn is_writable(&self, item: &Item) -> bool;

    /// Écrit (crée ou remplace) un élément.
    fn write_item(&self, item: &Item) -> Result<()>;

    /// Supprime un élément.
    fn delete_item(&self, item: &Item) -> Result<()>;
}
