//! Backend en mémoire, utilisé par les tests et les intégrations hôtes.

use std::cell::RefCell;

use crate::error::{FmError, Result};
use crate::model::Item;
use crate::provider::{ItemProvider, ReadOutcome};

/// Backend qui sert une liste d'éléments figée en mémoire.
///
/// `failing` permet de simuler un backend en panne : `read_items`
/// retourne alors une erreur, que le pipeline dégrade en avertissement.
pub struct MemoryProvider {
    id: String,
    items: Vec<Item>,
    failing: bool,
    writes: RefCell<Vec<Item>>,
    deletions: RefCell<Vec<String>>,
}

impl MemoryProvider {
    /// Crée un backend servant les éléments donnés.
    pub fn new(id: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            items,
            failing: false,
            writes: RefCell::new(Vec::new()),
            deletions: RefCell::new(Vec::new()),
        }
    }

    /// Crée un backend dont la lecture échoue systématiquement.
    pub fn failing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
            failing: true,
            writes: RefCell::new(Vec::new()),
            deletions: RefCell::new(Vec::new()),
        }
    }

    /// Éléments écrits via `write_item`, dans l'ordre.
    pub fn written(&self) -> Vec<Item> {
        self.writes.borrow().clone()
    }

    /// Identifiants supprimés via `delete_item`, dans l'ordre.
    pub fn deleted(&self) -> Vec<String> {
        self.deletions.borrow().clone()
    }
}

impl ItemProvider for MemoryProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_items(&self) -> Result<ReadOutcome> {
        if self.failing {
            return Err(FmError::Provider(
                self.id.clone(),
                "backend indisponible".to_string(),
            ));
        }
        let mut items = self.items.clone();
        for item in &mut items {
            item.set_provider(&self.id);
        }
        Ok(ReadOutcome {
            items,
            warnings: Vec::new(),
        })
    }

    fn is_willing_to_write(&self) -> bool {
        !self.failing
    }

    fn is_writable(&self, item: &Item) -> bool {
        self.is_willing_to_write()
            && item
                .provider
                .as_deref()
                .map(|p| p.eq_ignore_ascii_case(&self.id))
                .unwrap_or(true)
    }

    fn write_item(&self, item: &Item) -> Result<()> {
        if !self.is_writable(item) {
            return Err(FmError::ItemReadOnly(item.id.clone()));
        }
        self.writes.borrow_mut().push(item.clone());
        Ok(())
    }

    fn delete_item(&self, item: &Item) -> Result<()> {
        if !self.is_willing_to_write() {
            return Err(FmError::ProviderNotWilling(self.id.clone()));
        }
        self.deletions.borrow_mut().push(item.id.clone());
        Ok(())
    }
}
