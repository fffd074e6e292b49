// Interactive sound board for exercising the playback stack end to end
// against the real audio output.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use sfx_system::{DirAssetStore, RodioDevice, SfxResult, SoundManifest, SoundRegistry};

fn initialize_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_id(token: &str) -> Option<usize> {
    match token.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("not a sound id: {}", token);
            None
        }
    }
}

fn main() -> SfxResult<()> {
    initialize_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <manifest.json> [sound-dir]", args[0]);
        std::process::exit(2);
    }

    let manifest_path = PathBuf::from(&args[1]);
    let sound_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| {
        manifest_path
            .parent()
            .map(|dir| dir.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let manifest = SoundManifest::load(&manifest_path)
        .with_context(|| format!("loading {}", manifest_path.display()))?;
    let device = RodioDevice::try_default().context("opening audio output")?;

    let registry = SoundRegistry::new(device, manifest);
    registry.set_asset_store(Arc::new(DirAssetStore::new(sound_dir)));
    registry.preload_all_sounds();

    println!("Sounds:");
    for (id, def) in registry.manifest().iter() {
        println!("  {:>3}  {}", id, def.name);
    }
    println!();
    println!("Commands: start <id> [loop] | stop <id> | pause | resume | stopall | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        registry.process_completions();

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["start", id] => {
                if let Some(id) = parse_id(id) {
                    registry.start_sound(id, false);
                }
            }
            ["start", id, "loop"] => {
                if let Some(id) = parse_id(id) {
                    registry.start_sound(id, true);
                }
            }
            ["stop", id] => {
                if let Some(id) = parse_id(id) {
                    registry.stop_sound(id);
                }
            }
            ["pause"] => registry.pause_all_sounds(),
            ["resume"] => registry.resume_all_sounds(),
            ["stopall"] => registry.stop_all_sounds(),
            ["quit"] | ["q"] => break,
            [] => {}
            _ => println!("unknown command"),
        }
    }

    registry.stop_all_sounds();
    Ok(())
}
