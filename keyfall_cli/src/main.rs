use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyfall_core::SessionConfig;
use keyfall_loader::SongCatalog;
use keyfall_schema::Song;

mod logging;
mod simulate;

use simulate::ScriptedPress;

#[derive(Debug, Parser)]
#[command(name = "keyfall")]
#[command(about = "Keyfall rhythm engine CLI", long_about = None)]
struct Cli {
    /// Debug logging for the engine crates.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the songs in a catalog directory.
    List { dir: PathBuf },

    /// Show a song's metadata.
    Info {
        /// Song JSON path, or a song id when --catalog is given.
        song: String,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Play a song against scripted presses and print the result as JSON.
    Simulate {
        /// Song JSON path, or a song id when --catalog is given.
        song: String,
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// PITCH@SECONDS, repeatable.
        #[arg(short, long = "press")]
        presses: Vec<ScriptedPress>,
        /// Press every note exactly on time.
        #[arg(long, conflicts_with = "presses")]
        autoplay: bool,
        /// JSON file overriding session settings.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 60.0)]
        frame_rate: f64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::List { dir } => {
            let catalog = SongCatalog::from_dir(&dir)
                .with_context(|| format!("failed to load catalog: {}", dir.display()))?;
            for song in catalog.iter() {
                println!(
                    "{}\t{}\t{}\t{}\t{} notes",
                    song.id,
                    song.title,
                    song.artist,
                    song.difficulty.as_str(),
                    song.notes.len()
                );
            }
        }
        Command::Info { song, catalog } => {
            let song = resolve_song(&song, catalog.as_deref())?;
            println!("id={}", song.id);
            println!("title={}", song.title);
            println!("artist={}", song.artist);
            println!("difficulty={}", song.difficulty.as_str());
            println!("bpm={}", song.bpm);
            println!("notes={}", song.notes.len());
            println!("last_onset={}", song.last_onset());
            println!("duration={}", song.duration);
        }
        Command::Simulate {
            song,
            catalog,
            presses,
            autoplay,
            config,
            frame_rate,
            output,
        } => {
            let song = resolve_song(&song, catalog.as_deref())?;
            let config = match config {
                Some(path) => load_config(&path)?,
                None => SessionConfig::default(),
            };
            let presses = if autoplay {
                simulate::autoplay(&song)
            } else {
                presses
            };

            let result = simulate::run_simulation(&song, &presses, &config, frame_rate)
                .with_context(|| format!("simulation failed: {}", song.id))?;
            let json =
                serde_json::to_string_pretty(&result).context("failed to serialize result")?;
            match output {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("failed to write: {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn resolve_song(song: &str, catalog: Option<&Path>) -> anyhow::Result<Song> {
    match catalog {
        Some(dir) => {
            let catalog = SongCatalog::from_dir(dir)
                .with_context(|| format!("failed to load catalog: {}", dir.display()))?;
            let song = catalog.get_song(song)?;
            Ok(Song::clone(&song))
        }
        None => keyfall_loader::load_song_json_from_path(song),
    }
}

fn load_config(path: &Path) -> anyhow::Result<SessionConfig> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read config: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}
