//! Dustbox - headless native runner
//!
//! Loads (or generates) a scene, drives the world at a fixed frame rate and
//! reports what happened.

use std::process::ExitCode;

use dustbox::renderer::MeshPainter;
use dustbox::{Point, Scene, SimSettings, World};

/// Wall time handed to the world per frame
const FRAME_DT: f64 = 1.0 / 60.0;

const USAGE: &str = "usage: dustbox [SCENE] [--frames N] [--seed S] [--balls N] [--settings FILE]";

struct Args {
    scene: Option<String>,
    settings: Option<String>,
    frames: u32,
    seed: u64,
    balls: usize,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        scene: None,
        settings: None,
        frames: 600,
        seed: 0xcafe_f00d,
        balls: 40,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| iter.next().ok_or(format!("{name} needs a value"));
        match arg.as_str() {
            "--frames" => args.frames = value("--frames")?.parse().map_err(|e| format!("--frames: {e}"))?,
            "--seed" => args.seed = value("--seed")?.parse().map_err(|e| format!("--seed: {e}"))?,
            "--balls" => args.balls = value("--balls")?.parse().map_err(|e| format!("--balls: {e}"))?,
            "--settings" => args.settings = Some(value("--settings")?),
            "-h" | "--help" => return Err(String::new()),
            s if s.starts_with("--") => return Err(format!("unknown option {s}")),
            path => args.scene = Some(path.to_string()),
        }
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &args.settings {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };

    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => {
            log::info!("Generating scene with seed {:#x}", args.seed);
            Scene::random(args.seed, args.balls, Point::ZERO, Point::new(1024.0, 768.0))
        }
    };

    let mut world = World::with_settings(scene, settings)?;
    let mut painter = MeshPainter::new();
    let mut peak_dust = 0;

    for frame in 0..args.frames {
        world.update(FRAME_DT);
        peak_dust = peak_dust.max(world.dust().len());

        painter.clear();
        world.render(&mut painter);

        if frame % 60 == 0 {
            log::info!(
                "frame {}: {} dust, {} vertices, energy {:.1}",
                frame,
                world.dust().len(),
                painter.vertices.len(),
                world.kinetic_energy()
            );
        }
    }

    let momentum = world.total_momentum();
    println!("frames:        {}", args.frames);
    println!("ticks:         {}", world.elapsed_ticks());
    println!("balls:         {}", world.balls().len());
    println!("live dust:     {} (peak {})", world.dust().len(), peak_dust);
    println!("kinetic energy {:.3}", world.kinetic_energy());
    println!("momentum       ({:.3}, {:.3})", momentum.x, momentum.y);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Dustbox starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{msg}");
            }
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
