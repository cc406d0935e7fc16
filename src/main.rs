use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use fm_actions::error::FmError;
use fm_actions::model::{find_in_forest, find_in_forest_mut};
use fm_actions::provider::FileProvider;
use fm_actions::render::render_tree;
use fm_actions::settings::{OrderMode, Population, Settings};
use fm_actions::tree::Registry;
use fm_actions::watcher::ProviderWatcher;

#[derive(Parser)]
#[command(name = "fm-actions")]
#[command(about = "Gérez les actions du menu contextuel de votre gestionnaire de fichiers")]
#[command(version)]
struct Cli {
    /// Fichier de préférences (défaut : répertoire de configuration)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Répertoire d'éléments supplémentaire (répétable)
    #[arg(short, long)]
    provider: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Affiche l'arbre effectif des actions (mode par défaut)
    List,
    /// Surveille les backends et réaffiche l'arbre à chaque changement
    Watch,
    /// Active un élément et le réécrit via son backend
    Enable {
        /// Identifiant de l'élément
        id: String,
    },
    /// Désactive un élément et le réécrit via son backend
    Disable {
        /// Identifiant de l'élément
        id: String,
    },
    /// Supprime un élément de son backend
    Delete {
        /// Identifiant de l'élément
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let path = cli.settings.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&path)?;

    match cli.command {
        None | Some(Commands::List) => print_tree(&mut settings, &cli.provider)?,
        Some(Commands::Watch) => watch(&mut settings, &cli.provider)?,
        Some(Commands::Enable { id }) => set_enabled(&mut settings, &cli.provider, &id, true)?,
        Some(Commands::Disable { id }) => set_enabled(&mut settings, &cli.provider, &id, false)?,
        Some(Commands::Delete { id }) => delete(&mut settings, &cli.provider, &id)?,
    }

    Ok(())
}

/// Construit le registre des backends : ceux des préférences, dans
/// l'ordre, puis les répertoires passés en ligne de commande.
fn build_registry(settings: &Settings, extra: &[PathBuf]) -> Registry {
    let mut registry = Registry::new();

    for config in &settings.providers {
        let provider = if config.read_only {
            FileProvider::read_only(config.id.as_str(), &config.path)
        } else {
            FileProvider::new(config.id.as_str(), &config.path)
        };
        registry.register(Box::new(provider));
    }

    for path in extra {
        registry.register(Box::new(FileProvider::new(
            path.display().to_string(),
            path,
        )));
    }

    registry
}

/// Répertoires surveillés par la commande `watch`.
fn watched_paths(settings: &Settings, extra: &[PathBuf]) -> Vec<PathBuf> {
    settings
        .providers
        .iter()
        .map(|c| c.path.clone())
        .chain(extra.iter().cloned())
        .collect()
}

/// Charge l'arbre effectif et l'affiche.
fn print_tree(settings: &mut Settings, extra: &[PathBuf]) -> anyhow::Result<()> {
    let registry = build_registry(settings, extra);
    let order_mode = settings.order_mode;
    let population = settings.population;

    let result = registry.load(settings, order_mode, &population);

    for warning in &result.warnings {
        eprintln!("ATTENTION : {}", warning);
    }
    if result.items.is_empty() {
        println!("(aucune action visible)");
    } else {
        print!("{}", render_tree(&result.items));
    }

    Ok(())
}

/// Réaffiche l'arbre à chaque changement détecté dans les backends.
fn watch(settings: &mut Settings, extra: &[PathBuf]) -> anyhow::Result<()> {
    print_tree(settings, extra)?;

    let mut watcher = ProviderWatcher::new(watched_paths(settings, extra));
    loop {
        if watcher.check_changed() {
            println!("--- rechargement ---");
            print_tree(settings, extra)?;
            watcher.reset();
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

/// Bascule le flag `enabled` d'un élément et le réécrit via un backend.
fn set_enabled(
    settings: &mut Settings,
    extra: &[PathBuf],
    id: &str,
    enabled: bool,
) -> anyhow::Result<()> {
    let registry = build_registry(settings, extra);
    // Chargement indulgent : l'élément visé peut être désactivé ou
    // invalide, il doit quand même être trouvable.
    let population = Population {
        load_disabled: true,
        load_invalid: true,
    };

    let mut result = registry.load(settings, OrderMode::Manual, &population);
    let item = find_in_forest_mut(&mut result.items, id)
        .ok_or_else(|| FmError::ItemNotFound(id.to_string()))?;
    if item.is_profile() {
        anyhow::bail!("« {} » est un profil ; activez son action", id);
    }

    item.enabled = enabled;

    let provider = registry
        .writable_provider_for(item)
        .ok_or_else(|| FmError::Other(format!("aucun backend inscriptible pour « {} »", id)))?;
    provider.write_item(item)?;

    println!(
        "{} : {}",
        item.id,
        if enabled { "activé" } else { "désactivé" }
    );
    Ok(())
}

/// Supprime un élément de son backend propriétaire.
fn delete(settings: &mut Settings, extra: &[PathBuf], id: &str) -> anyhow::Result<()> {
    let registry = build_registry(settings, extra);
    let population = Population {
        load_disabled: true,
        load_invalid: true,
    };

    let result = registry.load(settings, OrderMode::Manual, &population);
    let item = find_in_forest(&result.items, id)
        .ok_or_else(|| FmError::ItemNotFound(id.to_string()))?
        .clone();

    let provider = registry
        .writable_provider_for(&item)
        .ok_or_else(|| FmError::Other(format!("aucun backend inscriptible pour « {} »", id)))?;
    provider.delete_item(&item)?;

    println!("{} : supprimé", item.id);
    Ok(())
}
