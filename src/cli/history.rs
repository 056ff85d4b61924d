//! History command handler
//!
//! View and manage search history.

use crate::error::Result;
use crate::history::HistoryStore;
use clap::{Args, Subcommand};

/// History command arguments
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommand>,
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List history entries
    List {
        /// Number of entries to show (default: all)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Clear all history
    Clear,
}

/// Run the history command
pub fn run(args: HistoryArgs) -> Result<()> {
    let mut history = HistoryStore::open_default()?;
    let command = args.command.unwrap_or(HistoryCommand::List { count: None });

    match command {
        HistoryCommand::List { count } => {
            print!("{}", render_history(&history, count));
            Ok(())
        }
        HistoryCommand::Clear => clear_history(&mut history),
    }
}

/// Render history entries in storage order
///
/// Entry numbers match `pinpoint pick --history N`.
fn render_history(history: &HistoryStore, count: Option<usize>) -> String {
    let places = history.load();
    if places.is_empty() {
        return "No history entries.\n".to_string();
    }

    let shown = count.unwrap_or(places.len()).min(places.len());
    let mut output = format!("Search history ({} of {}):\n\n", shown, places.len());

    for (index, place) in places.iter().take(shown).enumerate() {
        output.push_str(&format!("{:>3}. {}\n", index + 1, place.title()));
        if place.name().is_some() {
            output.push_str(&format!("     {}\n", place.address()));
        }
        output.push_str(&format!("     ({})\n", place.coordinate()));
    }

    output
}

/// Clear all history
fn clear_history(history: &mut HistoryStore) -> Result<()> {
    let count = history.len();
    history.clear()?;
    println!("Cleared {} history entries.", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::history::FileStorage;
    use crate::place::{address, AddressComponents, Place, Placemark};
    use tempfile::TempDir;

    fn place(name: &str, lat: f64) -> Place {
        let mut components = AddressComponents::new();
        components.insert(address::STREET, format!("{} Main St", lat));
        Place::new(Some(name.to_string()), Placemark::new(Coordinates::new(lat, 0.0), components))
    }

    #[test]
    fn test_render_empty_history() {
        let history = HistoryStore::in_memory();
        assert_eq!(render_history(&history, None), "No history entries.\n");
    }

    #[test]
    fn test_render_history_in_storage_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut history = HistoryStore::new(FileStorage::new(temp_dir.path().join("history.json")));
        history.append(&place("Home", 1.0)).unwrap();
        history.append(&place("Work", 2.0)).unwrap();
        history.append(&place("Gym", 3.0)).unwrap();

        let output = render_history(&history, Some(2));
        assert!(output.starts_with("Search history (2 of 3):"));
        let home = output.find("1. Home").unwrap();
        let work = output.find("2. Work").unwrap();
        assert!(home < work);
        assert!(!output.contains("Gym"));
    }

    #[test]
    fn test_clear_history() {
        let mut history = HistoryStore::in_memory();
        history.append(&place("Home", 1.0)).unwrap();
        clear_history(&mut history).unwrap();
        assert!(history.is_empty());
    }
}
