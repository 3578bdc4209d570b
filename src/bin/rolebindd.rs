//! rolebindd - interactive role-binding viewer
//!
//! This binary:
//! 1. Selects a body source (live device, replay file, or network stream)
//! 2. Runs the grab/resolve/render/poll cycle until the operator quits
//! 3. Accepts role keys and binding clicks on stdin (one command per line)
//! 4. Tears the source down on every exit path

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rolebind::{
    run_loop, BindingManager, BodySource, CameraResolution, ConsoleSink, InputSelection,
    StdinInput, Viewer, ViewerConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a recorded body-frame log (JSON lines) to replay.
    #[arg(long, env = "ROLEBIND_REPLAY_FILE")]
    replay_file: Option<PathBuf>,
    /// host:port of a live body-frame stream.
    #[arg(long, env = "ROLEBIND_STREAM_ADDR")]
    stream: Option<String>,
    /// Camera resolution: HD2K, HD1200, HD1080, HD720, SVGA or VGA.
    #[arg(long, env = "ROLEBIND_RESOLUTION")]
    resolution: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let input = InputSelection::from_flags(args.replay_file, args.stream)?;
    let resolution = CameraResolution::from_flag(args.resolution.as_deref());
    let config = ViewerConfig::new(input, resolution);

    println!("  - Type 'q' to quit.");
    println!("  - Type 'm' to pause/resume.");
    println!("  - Type 's'/'a'/'n' to select a role, then 'click X Y' to bind.");
    println!("  - Type 'help' for the binding tutorial.");

    let mut source = BodySource::open(&config.input, config.resolution)?;
    let mut manager = BindingManager::new(source.image_scale());
    let mut viewer = Viewer::new(ConsoleSink);
    let mut events = StdinInput::spawn();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
            .expect("error setting Ctrl-C handler");
    }

    log::info!("rolebindd running on {}", config.input.describe());
    run_loop(
        &mut source,
        &mut manager,
        &mut viewer,
        &mut events,
        config.key_wait,
        &shutdown,
    );
    source.close();

    let mut bindings: Vec<_> = manager.registry().iter().collect();
    bindings.sort_by_key(|(id, _)| *id);
    for (body_id, assignment) in bindings {
        log::info!("final binding: body {} -> {}", body_id, assignment.label());
    }
    Ok(())
}
