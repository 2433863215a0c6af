//! Sting mission command-line tool
//!
//! Works on mission files exported by the web front-end.
//!
//! # Usage
//!
//! ```bash
//! sting-mission catalog
//! sting-mission summary mission_sting.json
//! sting-mission export mission_sting.csv out/
//! sting-mission add mission_sting.json "Portail" "Dépose véhicule"
//! sting-mission remove mission_sting.json 0
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sting_rust::parsing::DataFormat;
use sting_rust::{AddOutcome, AppConfig, MissionSession, MissionView};

const USAGE: &str = "usage: sting-mission <catalog | summary FILE | export FILE OUT_DIR | add FILE NAME... | remove FILE INDEX>";

fn print_view(view: &MissionView) {
    if view.is_empty() {
        println!("No blocks in the mission.");
        return;
    }
    for (i, block) in view.blocks.iter().enumerate() {
        println!("{:>3}  {:<35} {:>5} min  {}", i, block.name, block.minutes(), block.category);
    }
    println!();
    println!("Total: {} minutes", view.total_minutes);
    for total in &view.totals {
        println!("  {:<20} {:>5} min", total.category, total.minutes);
    }
}

/// Open `path` as the session's mission; a missing file starts an empty one.
fn open_mission(session: &mut MissionSession, path: &Path) -> Result<()> {
    if path.exists() {
        session
            .import_file(path)
            .with_context(|| format!("Failed to import {}", path.display()))?;
    } else {
        info!("{} does not exist, starting an empty mission", path.display());
    }
    Ok(())
}

/// Write the session's mission back to `path` in the format its name implies.
fn save_mission(session: &MissionSession, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Mission path has no file name")?;
    let format = DataFormat::from_file_name(file_name)?;
    let bundle = session.export()?;
    fs::write(path, &bundle.get(format).data)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} blocks to {}", session.table().len(), path.display());
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config = AppConfig::load_or_default().context("Failed to load configuration")?;
    let mut session = MissionSession::new(config)?;

    match args {
        [cmd] if cmd == "catalog" => {
            let catalog = session.catalog();
            for category in catalog.categories() {
                println!("{}", category);
                for def in catalog.entries().iter().filter(|d| d.category == category) {
                    println!("  {:<35} {:>5} min", def.name, def.default_duration);
                }
            }
        }
        [cmd, file] if cmd == "summary" => {
            let summary = session
                .import_file(Path::new(file))
                .with_context(|| format!("Failed to import {}", file))?;
            println!("{} ({}, {} rows)", file, summary.format, summary.rows);
            println!();
            print_view(&summary.view);
        }
        [cmd, file, out_dir] if cmd == "export" => {
            open_mission(&mut session, Path::new(file))?;
            for path in session.export()?.write_all(Path::new(out_dir))? {
                println!("{}", path.display());
            }
        }
        [cmd, file, names @ ..] if cmd == "add" && !names.is_empty() => {
            let path = Path::new(file);
            open_mission(&mut session, path)?;
            for name in names {
                match session.add_block(name)? {
                    AddOutcome::Added { index, .. } => println!("Added '{}' at {}", name, index),
                    AddOutcome::AlreadyPresent { .. } => {
                        println!("'{}' is already in the mission", name)
                    }
                }
            }
            save_mission(&session, path)?;
            print_view(&session.view());
        }
        [cmd, file, index] if cmd == "remove" => {
            let path = Path::new(file);
            let index: usize = index
                .parse()
                .with_context(|| format!("Invalid index '{}'", index))?;
            open_mission(&mut session, path)?;
            let view = session.remove_block(index)?;
            save_mission(&session, path)?;
            print_view(&view);
        }
        _ => bail!(USAGE),
    }
    Ok(())
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    run(&args)
}
