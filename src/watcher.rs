//! Surveillance des changements dans les répertoires des backends.
//!
//! Ce module implémente une détection automatique des modifications en
//! surveillant les timestamps des répertoires d'éléments. Lorsqu'un
//! changement est détecté, un rechargement n'est signalé qu'après une
//! fenêtre de calme sans nouvelle modification, pour coalescer les
//! rafales d'événements (un éditeur qui réécrit plusieurs fichiers ne
//! déclenche qu'un seul rechargement).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Intervalle de vérification des changements.
const CHECK_INTERVAL: Duration = Duration::from_millis(250);
/// Fenêtre de calme après un changement détecté.
const QUIESCENCE_DELAY: Duration = Duration::from_millis(100);

/// Surveillant de changements par polling des timestamps.
///
/// Le timer de calme est réarmé à chaque nouvelle modification
/// détectée ; le rechargement n'est signalé qu'une fois la fenêtre
/// écoulée sans autre événement.
pub struct ProviderWatcher {
    /// Répertoires surveillés et leur dernier timestamp connu.
    watched: Vec<(PathBuf, Option<SystemTime>)>,
    /// Timestamp de dernière vérification.
    last_check: Instant,
    /// Moment de la dernière modification détectée (pour le debounce).
    last_change_detected: Option<Instant>,
}

impl ProviderWatcher {
    /// Crée un surveillant pour les répertoires donnés.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let watched = paths
            .into_iter()
            .map(|path| {
                let mtime = dir_mtime(&path);
                (path, mtime)
            })
            .collect();

        Self {
            watched,
            last_check: Instant::now(),
            last_change_detected: None,
        }
    }

    /// Vérifie si un rechargement est nécessaire.
    ///
    /// À appeler régulièrement depuis la boucle principale. Retourne
    /// `true` uniquement si :
    /// - l'intervalle de vérification est écoulé,
    /// - un changement a été détecté,
    /// - et la fenêtre de calme est écoulée depuis la dernière détection.
    pub fn check_changed(&mut self) -> bool {
        if self.last_check.elapsed() < CHECK_INTERVAL {
            return false;
        }
        self.last_check = Instant::now();

        let mut changed = false;
        for (path, known) in &mut self.watched {
            let current = dir_mtime(path);
            if current != *known {
                *known = current;
                changed = true;
            }
        }

        if changed {
            // Réarmer la fenêtre de calme.
            self.last_change_detected = Some(Instant::now());
        }

        if let Some(change_time) = self.last_change_detected {
            if change_time.elapsed() >= QUIESCENCE_DELAY {
                // Reset pour le prochain changement.
                self.last_change_detected = None;
                return true;
            }
        }

        false
    }

    /// Reprend une base propre après un rechargement manuel.
    pub fn reset(&mut self) {
        self.last_check = Instant::now();
        self.last_change_detected = None;
        for (path, known) in &mut self.watched {
            *known = dir_mtime(path);
        }
    }
}

/// Timestamp de dernière modification d'un répertoire.
///
/// La création ou la suppression d'un fichier met à jour le mtime du
/// répertoire qui le contient ; les éditions en place sont couvertes en
/// prenant aussi le mtime le plus récent des fichiers directs.
fn dir_mtime(path: &Path) -> Option<SystemTime> {
    let mut latest = fs::metadata(path).ok()?.modified().ok()?;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            if let Ok(mtime) = entry.metadata().and_then(|m| m.modified()) {
                if mtime > latest {
                    latest = mtime;
                }
            }
        }
    }
    Some(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    /// Force la prochaine vérification sans attendre l'intervalle.
    fn skip_interval(watcher: &mut ProviderWatcher) {
        watcher.last_check = Instant::now() - CHECK_INTERVAL - Duration::from_millis(1);
    }

    #[test]
    fn test_no_change_initially() {
        let temp_dir = TempDir::new().unwrap();
        let mut watcher = ProviderWatcher::new([temp_dir.path().to_path_buf()]);

        skip_interval(&mut watcher);
        assert!(!watcher.check_changed());
    }

    #[test]
    fn test_change_fires_after_quiescence() {
        let temp_dir = TempDir::new().unwrap();
        let mut watcher = ProviderWatcher::new([temp_dir.path().to_path_buf()]);

        let mut file = File::create(temp_dir.path().join("a1.json")).unwrap();
        file.write_all(b"{}").unwrap();

        // Première vérification : changement détecté, fenêtre armée.
        skip_interval(&mut watcher);
        watcher.check_changed();

        // Après la fenêtre de calme, le rechargement est signalé.
        std::thread::sleep(QUIESCENCE_DELAY + Duration::from_millis(20));
        skip_interval(&mut watcher);
        assert!(watcher.check_changed());

        // Puis plus rien tant que rien ne bouge.
        skip_interval(&mut watcher);
        assert!(!watcher.check_changed());
    }

    #[test]
    fn test_reset_swallows_pending_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut watcher = ProviderWatcher::new([temp_dir.path().to_path_buf()]);

        File::create(temp_dir.path().join("a1.json")).unwrap();
        skip_interval(&mut watcher);
        watcher.check_changed();

        watcher.reset();
        std::thread::sleep(QUIESCENCE_DELAY + Duration::from_millis(20));
        skip_interval(&mut watcher);
        assert!(!watcher.check_changed());
    }

    #[test]
    fn test_missing_dir_is_tolerated() {
        let mut watcher = ProviderWatcher::new([PathBuf::from("/nonexistent/fm-actions")]);
        skip_interval(&mut watcher);
        assert!(!watcher.check_changed());
    }
}
