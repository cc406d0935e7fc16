//! Représentation en mémoire des éléments du menu contextuel.
//!
//! Un élément est soit un menu (qui regroupe d'autres menus et actions),
//! soit une action (qui porte un ou plusieurs profils d'exécution), soit
//! un profil (la commande concrète à lancer). Les éléments forment un
//! arbre : les enfants d'un menu sont des menus ou des actions, les
//! enfants d'une action sont toujours ses profils.

/// Charge spécifique à chaque sorte d'élément.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// Un sous-menu. La liste `subitem_ids` est l'ordre des enfants tel
    /// qu'enregistré par le backend ; elle est résolue contre le pool
    /// fusionné lors de la construction de la hiérarchie.
    Menu { subitem_ids: Vec<String> },
    /// Une action ; ses enfants sont ses profils.
    Action,
    /// Un profil d'exécution d'une action.
    Profile { command: String, parameters: String },
}

/// Un nœud de l'arbre de configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Identifiant stable, unique parmi les éléments d'un même niveau.
    pub id: String,
    /// Libellé affiché dans le menu contextuel.
    pub label: String,
    /// L'élément est-il activé par l'utilisateur ?
    pub enabled: bool,
    /// Validité recalculée par `refresh_status`.
    pub valid: bool,
    /// Identifiant du backend propriétaire (None pour un élément
    /// jamais sauvegardé).
    pub provider: Option<String>,
    /// Sorte de l'élément.
    pub kind: ItemKind,
    /// Enfants : sous-éléments d'un menu, profils d'une action.
    /// Toujours vide pour un profil.
    pub children: Vec<Item>,
}

impl Item {
    /// Crée un menu. Les enfants effectifs sont installés plus tard par
    /// la construction de la hiérarchie.
    pub fn menu(id: impl Into<String>, label: impl Into<String>, subitem_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
            valid: true,
            provider: None,
            kind: ItemKind::Menu { subitem_ids },
            children: Vec::new(),
        }
    }

    /// Crée une action avec ses profils.
    pub fn action(id: impl Into<String>, label: impl Into<String>, profiles: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
            valid: true,
            provider: None,
            kind: ItemKind::Action,
            children: profiles,
        }
    }

    /// Crée un profil.
    pub fn profile(
        id: impl Into<String>,
        label: impl Into<String>,
        command: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
            valid: true,
            provider: None,
            kind: ItemKind::Profile {
                command: command.into(),
                parameters: parameters.into(),
            },
            children: Vec::new(),
        }
    }

    pub fn is_menu(&self) -> bool {
        matches!(self.kind, ItemKind::Menu { .. })
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, ItemKind::Action)
    }

    pub fn is_profile(&self) -> bool {
        matches!(self.kind, ItemKind::Profile { .. })
    }

    /// Liste d'identifiants d'enfants enregistrée pour un menu.
    pub fn subitem_ids(&self) -> &[String] {
        match &self.kind {
            ItemKind::Menu { subitem_ids } => subitem_ids,
            _ => &[],
        }
    }

    /// Marque tout le sous-arbre comme appartenant au backend donné.
    pub fn set_provider(&mut self, provider: &str) {
        self.provider = Some(provider.to_string());
        for child in &mut self.children {
            child.set_provider(provider);
        }
    }

    /// Recalcule la validité de l'élément, enfants d'abord.
    ///
    /// Un profil est valide s'il a un identifiant et une commande non
    /// vides. Une action est valide si elle a un identifiant et au moins
    /// un profil valide. Un menu est valide s'il a un identifiant.
    /// Le flag `enabled` n'est jamais modifié ici.
    pub fn refresh_status(&mut self) {
        for child in &mut self.children {
            child.refresh_status();
        }

        self.valid = match &self.kind {
            ItemKind::Profile { command, .. } => !self.id.is_empty() && !command.is_empty(),
            ItemKind::Action => !self.id.is_empty() && self.children.iter().any(|p| p.valid),
            ItemKind::Menu { .. } => !self.id.is_empty(),
        };
    }

    /// Recherche récursive par identifiant, insensible à la casse.
    pub fn find(&self, id: &str) -> Option<&Item> {
        if self.id.eq_ignore_ascii_case(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Variante mutable de `find`.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Item> {
        if self.id.eq_ignore_ascii_case(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Nombre total d'éléments du sous-arbre (soi-même inclus).
    pub fn count_items(&self) -> usize {
        1 + self.children.iter().map(Item::count_items).sum::<usize>()
    }
}

/// Recherche un élément dans une forêt, insensible à la casse.
pub fn find_in_forest<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    items.iter().find_map(|item| item.find(id))
}

/// Variante mutable de `find_in_forest`.
pub fn find_in_forest_mut<'a>(items: &'a mut [Item], id: &str) -> Option<&'a mut Item> {
    items.iter_mut().find_map(|item| item.find_mut(id))
}

/// Recalcule la validité de chaque racine de la forêt.
pub fn refresh_forest(items: &mut [Item]) {
    for item in items {
        item.refresh_status();
    }
}

/// Identifiants des racines, dans l'ordre.
pub fn root_ids(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}
