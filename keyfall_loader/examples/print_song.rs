use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let song = keyfall_loader::load_song_json_from_path(args.path)?;
    println!("id={}", song.id);
    println!("title={}", song.title);
    println!("artist={}", song.artist);
    println!("notes={}", song.notes.len());
    println!("duration={}", song.duration);
    Ok(())
}
