//! Tests d'intégration du pipeline complet : fusion, construction,
//! tri, filtrage et chemin d'écriture.

mod common;

use common::{all_items, ids, memory_action, write_action_file, write_menu_file, TestEnv};

use fm_actions::model::Item;
use fm_actions::provider::{FileProvider, ItemProvider, MemoryProvider};
use fm_actions::settings::{
    MemoryOrderStore, OrderMode, OrderStore, Population, ProviderConfig, Settings,
};
use fm_actions::tree::Registry;

const STRICT: Population = Population {
    load_disabled: false,
    load_invalid: false,
};

const LENIENT: Population = Population {
    load_disabled: true,
    load_invalid: true,
};

fn registry_with(items: Vec<Item>) -> Registry {
    let mut registry = Registry::new();
    registry.register(Box::new(MemoryProvider::new("p1", items)));
    registry
}

#[test]
fn test_new_action_lands_at_root_and_persists_order() {
    // Un backend, une action, aucun ordre enregistré : l'action sort en
    // racine et un ordre frais est persisté.
    let registry = registry_with(vec![memory_action("a1", "Ouvrir", true)]);
    let mut store = MemoryOrderStore::default();

    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    assert_eq!(ids(&result.items), ["a1"]);
    assert!(result.order_rewritten);
    assert_eq!(store.get(), ["a1"]);
}

#[test]
fn test_menu_child_resolved_from_recorded_ids() {
    let registry = registry_with(vec![
        Item::menu("m1", "Outils", vec!["a1".to_string()]),
        memory_action("a1", "Ouvrir", true),
    ]);
    let mut store = MemoryOrderStore::new(vec!["m1".to_string()]);

    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    assert_eq!(ids(&result.items), ["m1"]);
    assert_eq!(ids(&result.items[0].children), ["a1"]);
    assert!(!result.order_rewritten);
}

#[test]
fn test_disabled_child_dropped_menu_retained() {
    let registry = registry_with(vec![
        Item::menu("m1", "Outils", vec!["a1".to_string()]),
        memory_action("a1", "Ouvrir", false),
    ]);
    let mut store = MemoryOrderStore::new(vec!["m1".to_string()]);

    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    assert_eq!(ids(&result.items), ["m1"]);
    assert!(result.items[0].children.is_empty());
}

#[test]
fn test_stale_order_id_skipped_and_order_rewritten() {
    let registry = registry_with(vec![memory_action("a1", "Ouvrir", true)]);
    let mut store = MemoryOrderStore::new(vec!["missing-id".to_string(), "a1".to_string()]);

    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    assert_eq!(ids(&result.items), ["a1"]);
    assert!(result.order_rewritten);
    assert_eq!(store.get(), ["a1"]);
}

#[test]
fn test_pipeline_is_idempotent_on_same_inputs() {
    let items = vec![
        Item::menu("m1", "Outils", vec!["a2".to_string()]),
        memory_action("a1", "Ouvrir", false),
        memory_action("a2", "Fermer", true),
    ];
    let registry = registry_with(items);

    // Mêmes entrées des deux côtés : mêmes sorties, structure comprise.
    let mut store_a = MemoryOrderStore::new(vec!["m1".to_string(), "a1".to_string()]);
    let mut store_b = MemoryOrderStore::new(vec!["m1".to_string(), "a1".to_string()]);

    let first = registry.load(&mut store_a, OrderMode::Manual, &LENIENT);
    let second = registry.load(&mut store_b, OrderMode::Manual, &LENIENT);

    assert_eq!(first.items, second.items);
}

#[test]
fn test_reload_converges_once_order_is_persisted() {
    let registry = registry_with(vec![
        memory_action("a1", "Ouvrir", false),
        memory_action("a2", "Fermer", true),
    ]);
    let mut store = MemoryOrderStore::default();

    let first = registry.load(&mut store, OrderMode::Manual, &LENIENT);
    let second = registry.load(&mut store, OrderMode::Manual, &LENIENT);

    assert_eq!(first.items, second.items);
    // Le premier chargement a persisté l'ordre ; le second n'a plus
    // rien à réécrire.
    assert!(first.order_rewritten);
    assert!(!second.order_rewritten);
}

#[test]
fn test_alpha_ascending_holds_at_every_level() {
    let registry = registry_with(vec![
        Item::menu(
            "m1",
            "Zèbre",
            vec!["a3".to_string(), "a2".to_string()],
        ),
        memory_action("a1", "banane", true),
        memory_action("a2", "cerise", true),
        memory_action("a3", "Abricot", true),
    ]);
    let mut store = MemoryOrderStore::new(vec!["m1".to_string(), "a1".to_string()]);

    let result = registry.load(&mut store, OrderMode::AlphaAscending, &STRICT);

    fn sorted_ascending(items: &[Item]) -> bool {
        let labels: Vec<String> = items.iter().map(|i| i.label.to_lowercase()).collect();
        let mut expected = labels.clone();
        expected.sort();
        labels == expected && items.iter().all(|i| sorted_ascending(&i.children))
    }

    assert!(sorted_ascending(&result.items));
    assert!(sorted_ascending(&result.items[0].children));
}

#[test]
fn test_alpha_descending_at_root() {
    let registry = registry_with(vec![
        memory_action("a1", "Abricot", true),
        memory_action("a2", "cerise", true),
    ]);
    let mut store = MemoryOrderStore::default();

    let result = registry.load(&mut store, OrderMode::AlphaDescending, &STRICT);

    let labels: Vec<&str> = result.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["cerise", "Abricot"]);
}

#[test]
fn test_no_failing_node_survives_the_filter() {
    let registry = registry_with(vec![
        Item::menu(
            "m1",
            "Outils",
            vec!["a1".to_string(), "a2".to_string()],
        ),
        memory_action("a1", "Ouvrir", false),
        memory_action("a2", "Fermer", true),
        Item::action("a3", "Sans profil", vec![]),
    ]);
    let mut store = MemoryOrderStore::default();

    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    assert!(all_items(&result.items, &|item| item.enabled && item.valid));
}

#[test]
fn test_end_to_end_with_file_providers_and_settings() {
    let env = TestEnv::new();
    let user_dir = env.provider_dir("user");
    let system_dir = env.provider_dir("system");

    write_menu_file(&user_dir, "m1", "Outils", &["a1"]);
    write_action_file(&user_dir, "a1", "Ouvrir un terminal", true, "/usr/bin/term");
    write_action_file(&system_dir, "a2", "Action système", true, "/usr/bin/sys");

    let mut settings = Settings::load(env.settings_path()).unwrap();
    settings.providers = vec![
        ProviderConfig {
            id: "user".to_string(),
            path: user_dir.clone(),
            read_only: false,
        },
        ProviderConfig {
            id: "system".to_string(),
            path: system_dir,
            read_only: true,
        },
    ];
    settings.save().unwrap();

    let mut registry = Registry::new();
    registry.register(Box::new(FileProvider::new("user", &user_dir)));
    registry.register(Box::new(FileProvider::read_only(
        "system",
        settings.providers[1].path.clone(),
    )));

    let order_mode = settings.order_mode;
    let population = settings.population;
    let result = registry.load(&mut settings, order_mode, &population);

    // Fusion dans l'ordre d'enregistrement : user puis system.
    assert_eq!(ids(&result.items), ["a1", "m1", "a2"]);
    assert!(result.order_rewritten);

    // L'ordre frais a été persisté sur disque.
    let reloaded = Settings::load(env.settings_path()).unwrap();
    assert_eq!(reloaded.get(), ["a1", "m1", "a2"]);
}

#[test]
fn test_menu_consumes_its_child_from_the_pool() {
    let env = TestEnv::new();
    let dir = env.provider_dir("user");

    write_menu_file(&dir, "m1", "Outils", &["a1"]);
    write_action_file(&dir, "a1", "Ouvrir", true, "/bin/sh");

    let mut registry = Registry::new();
    registry.register(Box::new(FileProvider::new("user", &dir)));

    let mut store = MemoryOrderStore::new(vec!["m1".to_string()]);
    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    // a1 est placé sous m1, pas en racine.
    assert_eq!(ids(&result.items), ["m1"]);
    assert_eq!(ids(&result.items[0].children), ["a1"]);
}

#[test]
fn test_missing_provider_dir_degrades_to_warning() {
    let env = TestEnv::new();
    let dir = env.provider_dir("user");
    write_action_file(&dir, "a1", "Ouvrir", true, "/bin/sh");

    let mut registry = Registry::new();
    registry.register(Box::new(FileProvider::new(
        "fantome",
        env.root.join("nexiste-pas"),
    )));
    registry.register(Box::new(FileProvider::new("user", &dir)));

    let mut store = MemoryOrderStore::default();
    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    assert_eq!(ids(&result.items), ["a1"]);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("fantome"));
}

#[test]
fn test_write_back_through_owning_provider() {
    let env = TestEnv::new();
    let dir = env.provider_dir("user");
    write_action_file(&dir, "a1", "Ouvrir", true, "/bin/sh");

    let mut registry = Registry::new();
    registry.register(Box::new(FileProvider::new("user", &dir)));

    let mut store = MemoryOrderStore::default();
    let result = registry.load(&mut store, OrderMode::Manual, &LENIENT);

    let mut item = result.items[0].clone();
    item.enabled = false;
    let provider = registry.writable_provider_for(&item).unwrap();
    provider.write_item(&item).unwrap();

    // Au rechargement, l'action désactivée disparaît du chargement strict.
    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);
    assert!(result.items.is_empty());
}

#[test]
fn test_read_only_provider_rejects_write_back() {
    let env = TestEnv::new();
    let dir = env.provider_dir("system");
    write_action_file(&dir, "a1", "Système", true, "/bin/sh");

    let mut registry = Registry::new();
    registry.register(Box::new(FileProvider::read_only("system", &dir)));

    let mut store = MemoryOrderStore::default();
    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);

    let item = result.items[0].clone();
    assert!(registry.writable_provider_for(&item).is_none());

    let provider = registry.provider_named("system").unwrap();
    assert!(provider.write_item(&item).is_err());
}

#[test]
fn test_delete_then_reload_drops_item_and_rewrites_order() {
    let env = TestEnv::new();
    let dir = env.provider_dir("user");
    write_action_file(&dir, "a1", "Ouvrir", true, "/bin/sh");
    write_action_file(&dir, "a2", "Fermer", true, "/bin/sh");

    let mut registry = Registry::new();
    registry.register(Box::new(FileProvider::new("user", &dir)));

    let mut store = MemoryOrderStore::default();
    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);
    assert_eq!(ids(&result.items), ["a1", "a2"]);

    let provider = registry.provider_named("user").unwrap();
    provider.delete_item(&result.items[0]).unwrap();

    // L'identifiant périmé de l'ordre est ignoré et l'ordre réécrit.
    let result = registry.load(&mut store, OrderMode::Manual, &STRICT);
    assert_eq!(ids(&result.items), ["a2"]);
    assert!(result.order_rewritten);
    assert_eq!(store.get(), ["a2"]);
}
