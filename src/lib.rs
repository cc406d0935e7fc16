//! fm-actions : gestion des actions de menu contextuel du gestionnaire
//! de fichiers.
//!
//! La bibliothèque fusionne les éléments (menus, actions, profils) lus
//! depuis plusieurs backends, reconstruit l'arbre ordonné piloté par
//! l'ordre de niveau zéro persisté, le trie selon le mode choisi et le
//! filtre selon les préférences de chargement. Le binaire n'est qu'une
//! façade en ligne de commande au-dessus de ce pipeline.

pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod settings;
pub mod tree;
pub mod watcher;
