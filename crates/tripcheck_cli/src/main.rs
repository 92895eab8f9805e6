//! Command-line front end for the trip checklist.
//!
//! # Responsibility
//! - Map each user action (add, check, score, import, bingo...) to one
//!   subcommand over a SQLite-backed `ChecklistService`.
//! - Surface import failures as a single user-facing message.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use tripcheck_core::db::open_db;
use tripcheck_core::{
    init_logging, parse_score_field, AppConfig, BingoBoard, BingoView, ChecklistService,
    FieldUpdate, ImageBlob, ItemId, KeyValueStore, ScoreInput, SqliteImageStore,
    SqliteKeyValueStore, EXPORT_FILE_NAME,
};

const BINGO_BOARD_KEY: &str = "bingo-board";
const DEFAULT_DATA_DIR_NAME: &str = ".tripcheck";

#[derive(Parser)]
#[command(name = "tripcheck")]
#[command(about = "Plan a trip with a scored checklist and a bingo board")]
#[command(version)]
struct Cli {
    /// Directory holding the database and logs
    #[arg(long, env = "TRIPCHECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TRIPCHECK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every item with its scores
    List,
    /// Add an item
    Add { label: String },
    /// Check or uncheck an item
    Toggle { id: ItemId },
    /// Delete an item and its image
    Delete { id: ItemId },
    /// Delete every item and image
    Clear,
    /// Restore the bundled default items
    Reset,
    /// Rename an item
    Label { id: ItemId, text: String },
    /// Replace an item's notes
    Notes { id: ItemId, text: String },
    /// Set one score (scenic|romance|educational|convenience) to 0-10
    Score {
        id: ItemId,
        field: String,
        value: String,
    },
    /// Manage item images
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },
    /// Replace the checklist with an exported JSON file
    Import { file: PathBuf },
    /// Write the checklist and images to a JSON file
    Export { file: Option<PathBuf> },
    /// Show the bingo board
    Bingo {
        /// Draw a new random board
        #[arg(long)]
        regenerate: bool,
        /// Hide item ids in cells
        #[arg(long)]
        hide_ids: bool,
        /// Print only the board header
        #[arg(long)]
        collapsed: bool,
    },
}

#[derive(Subcommand)]
enum ImageAction {
    /// Attach an image file to an item
    Set { id: ItemId, file: PathBuf },
    /// Remove an item's image
    Remove { id: ItemId },
    /// Print an item's image metadata
    Show { id: ItemId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_level(), config.log_dir()).map_err(anyhow::Error::msg)?;

    let conn = open_db(config.db_path())
        .with_context(|| format!("failed to open {}", config.db_path().display()))?;
    let mut service = ChecklistService::open(
        SqliteKeyValueStore::try_new(&conn)?,
        SqliteImageStore::try_new(&conn)?,
    )?;

    match cli.command {
        Commands::List => print!("{}", render::item_list(&service)?),
        Commands::Add { label } => match service.add(label)? {
            Some(id) => println!("added {id}"),
            None => bail!("label must not be blank"),
        },
        Commands::Toggle { id } => require(service.toggle(id)?, id)?,
        Commands::Delete { id } => require(service.delete(id)?, id)?,
        Commands::Clear => service.clear()?,
        Commands::Reset => service.reset()?,
        Commands::Label { id, text } => {
            require(service.update_field(id, FieldUpdate::Label(text))?, id)?
        }
        Commands::Notes { id, text } => {
            require(service.update_field(id, FieldUpdate::Notes(text))?, id)?
        }
        Commands::Score { id, field, value } => {
            let Some(field) = parse_score_field(&field) else {
                bail!("unknown score field `{field}`");
            };
            require(
                service.update_field(id, FieldUpdate::Score(field, ScoreInput::from(value)))?,
                id,
            )?
        }
        Commands::Image { action } => match action {
            ImageAction::Set { id, file } => {
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let blob = ImageBlob::new(mime_for(&file), bytes);
                require(service.set_image(id, &blob)?, id)?
            }
            ImageAction::Remove { id } => require(service.remove_image(id)?, id)?,
            ImageAction::Show { id } => match service.image(id)? {
                Some(blob) => println!("{id}: {} ({} bytes)", blob.mime, blob.len()),
                None => println!("{id}: no image"),
            },
        },
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file).context("Unexpected import error")?;
            match service.import_json(&text) {
                Ok(count) => println!("imported {count} items"),
                Err(err) => bail!("Import failed: {err}"),
            }
        }
        Commands::Export { file } => {
            let path = file.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            let text = service.export()?.to_pretty_json()?;
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("exported to {}", path.display());
        }
        Commands::Bingo {
            regenerate,
            hide_ids,
            collapsed,
        } => {
            let mut store = SqliteKeyValueStore::try_new(&conn)?;
            let mut board = match store.get(BINGO_BOARD_KEY)? {
                Some(saved) => serde_json::from_str(&saved).unwrap_or_else(|err| {
                    info!("event=bingo_load module=cli status=discarded error={err}");
                    BingoBoard::default()
                }),
                None => BingoBoard::default(),
            };

            let mut rng = rand::thread_rng();
            if regenerate {
                board.regenerate(service.items(), &mut rng);
            } else {
                board.sync(service.items(), &mut rng);
            }
            store.set(BINGO_BOARD_KEY, &serde_json::to_string(&board)?)?;

            let view = bingo_view(collapsed, hide_ids);
            print!("{}", render::bingo(&board, service.items(), view));
        }
    }

    Ok(())
}

fn bingo_view(collapsed: bool, hide_ids: bool) -> BingoView {
    let mut view = BingoView::default();
    if collapsed {
        view.toggle_open();
    }
    if hide_ids {
        view.toggle_ids();
    }
    view
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let data_dir = match &cli.data_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd.join(DEFAULT_DATA_DIR_NAME),
    };

    let config = AppConfig::new(data_dir)?;
    Ok(match cli.log_level.as_deref() {
        Some(level) => config.with_log_level(level)?,
        None => config,
    })
}

fn require(found: bool, id: ItemId) -> Result<()> {
    if !found {
        bail!("no item with id {id}");
    }
    Ok(())
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::{bingo_view, Cli, Commands};
    use clap::Parser;

    #[test]
    fn bingo_flags_map_onto_the_view() {
        let cli = Cli::try_parse_from(["tripcheck", "bingo", "--collapsed"]).unwrap();
        let Commands::Bingo {
            collapsed,
            hide_ids,
            ..
        } = cli.command
        else {
            panic!("expected the bingo command");
        };
        let view = bingo_view(collapsed, hide_ids);
        assert!(!view.open);
        assert!(view.show_ids);

        let view = bingo_view(false, true);
        assert!(view.open);
        assert!(!view.show_ids);
    }
}
