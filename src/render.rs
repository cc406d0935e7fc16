//! Rendu texte de l'arbre effectif pour la sortie non-interactive.

use crate::model::{Item, ItemKind};

/// Rend la forêt en texte indenté, une ligne par élément.
pub fn render_tree(items: &[Item]) -> String {
    let mut output = String::new();
    for item in items {
        render_item(item, 0, &mut output);
    }
    output
}

fn render_item(item: &Item, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    let marker = match &item.kind {
        ItemKind::Menu { .. } => "▸",
        ItemKind::Action => "•",
        ItemKind::Profile { .. } => "·",
    };

    let mut flags = String::new();
    if !item.enabled {
        flags.push_str(" [désactivé]");
    }
    if !item.valid {
        flags.push_str(" [invalide]");
    }

    match &item.kind {
        ItemKind::Profile { command, parameters } => {
            let command_line = if parameters.is_empty() {
                command.clone()
            } else {
                format!("{} {}", command, parameters)
            };
            output.push_str(&format!(
                "{}{} {} ({}){}\n",
                indent, marker, item.label, command_line, flags
            ));
        }
        _ => {
            output.push_str(&format!(
                "{}{} {} [{}]{}\n",
                indent, marker, item.label, item.id, flags
            ));
        }
    }

    for child in &item.children {
        render_item(child, depth + 1, output);
    }
}
