//! Modèle des éléments de configuration (menus, actions, profils).

pub mod item;

pub use item::{find_in_forest, find_in_forest_mut, refresh_forest, root_ids, Item, ItemKind};
