//! demo - scripted end-to-end role binding run on the synthetic source

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::atomic::AtomicBool;

use rolebind::config::DEFAULT_KEY_WAIT;
use rolebind::input::{KEY_ASSISTANT, KEY_NURSE, KEY_QUIT, KEY_SURGEON};
use rolebind::source::body_anchor;
use rolebind::{
    run_loop, BindingManager, BodySource, CameraResolution, ConsoleSink, InputEvent,
    ScriptedInput, Viewer,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of synthetic bodies in frame.
    #[arg(long, default_value_t = 3)]
    bodies: usize,
    /// Camera resolution: HD2K, HD1200, HD1080, HD720, SVGA or VGA.
    #[arg(long)]
    resolution: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.bodies == 0 {
        return Err(anyhow!("--bodies must be >= 1"));
    }

    let resolution = CameraResolution::from_flag(args.resolution.as_deref());
    let mut source = BodySource::synthetic(resolution, args.bodies);
    let mut manager = BindingManager::new(source.image_scale());
    let mut viewer = Viewer::new(ConsoleSink);

    let click_at = |index: usize| {
        let (x, y) = body_anchor(resolution, args.bodies, index);
        InputEvent::Click {
            x: x as i32,
            y: y as i32,
        }
    };

    // Bind one body per role, then rebind the first body to show that
    // reassignment overwrites without reusing numbers.
    let mut events = Vec::new();
    for (index, key) in [KEY_SURGEON, KEY_ASSISTANT, KEY_NURSE]
        .into_iter()
        .take(args.bodies)
        .enumerate()
    {
        events.push(InputEvent::Key(key));
        events.push(click_at(index));
    }
    events.push(InputEvent::Key(KEY_ASSISTANT));
    events.push(click_at(0));
    events.push(InputEvent::Key(KEY_QUIT));
    let mut input = ScriptedInput::new(events);

    run_loop(
        &mut source,
        &mut manager,
        &mut viewer,
        &mut input,
        DEFAULT_KEY_WAIT,
        &AtomicBool::new(false),
    );
    source.close();

    let mut bindings: Vec<_> = manager.registry().iter().collect();
    bindings.sort_by_key(|(id, _)| *id);
    println!("bindings after scripted session:");
    for (body_id, assignment) in bindings {
        println!("  body {} -> {}", body_id, assignment.label());
    }
    Ok(())
}
