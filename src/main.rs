//! Headless driver: builds a scene, runs the frame loop and toggles the mode
//! at a fixed interval, logging how far each group is from its targets.
//!
//! ```text
//! evergreen [preset.toml] [--frames N] [--toggle-every N] [--fps N]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use evergreen::animation::{InstanceRaw, Mode};
use evergreen::error::EvergreenError;
use evergreen::options::Options;
use evergreen::scene::{InstanceSink, Scene};
use evergreen::util::FrameClock;

/// Counts uploaded bytes in place of a GPU buffer.
#[derive(Default)]
struct ByteCounter {
    bytes: usize,
    uploads: usize,
}

impl InstanceSink for ByteCounter {
    fn upload(&mut self, _slot: &str, instances: &[InstanceRaw]) {
        self.bytes += InstanceRaw::as_bytes(instances).len();
        self.uploads += 1;
    }
}

struct Args {
    preset: Option<PathBuf>,
    frames: u64,
    toggle_every: u64,
    fps: u32,
}

fn parse_count(flag: &str, value: Option<String>) -> Result<u64, EvergreenError> {
    let raw = value.ok_or_else(|| {
        EvergreenError::InvalidOptions(format!("{flag} needs a value"))
    })?;
    let n: i64 = raw.parse().map_err(|_| {
        EvergreenError::InvalidOptions(format!("{flag}: not a number: {raw}"))
    })?;
    u64::try_from(n).map_err(|_| EvergreenError::NegativeCount(n))
}

fn parse_args() -> Result<Args, EvergreenError> {
    let mut args = Args {
        preset: None,
        frames: 600,
        toggle_every: 240,
        fps: 60,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--frames" => args.frames = parse_count(&arg, it.next())?,
            "--toggle-every" => {
                args.toggle_every = parse_count(&arg, it.next())?;
            }
            "--fps" => {
                args.fps = u32::try_from(parse_count(&arg, it.next())?)
                    .unwrap_or(u32::MAX);
            }
            _ => args.preset = Some(PathBuf::from(arg)),
        }
    }
    Ok(args)
}

fn run() -> Result<(), EvergreenError> {
    let args = parse_args()?;
    let options = match &args.preset {
        Some(path) => {
            log::info!("loading preset {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };

    let mut scene = Scene::new(&options)?;
    let mut sink = ByteCounter::default();
    let mut clock = FrameClock::new(args.fps);

    for frame in 1..=args.frames {
        while !clock.should_render() {
            std::thread::sleep(clock.until_next_frame());
        }
        let tick = clock.tick();
        let _ = scene.advance_frame(tick, Some(&mut sink));

        if args.toggle_every > 0 && frame % args.toggle_every == 0 {
            report(&scene);
            let mode = scene.toggle_mode();
            log::info!("frame {frame}: {mode:?} ({})", mode.action_hint());
        }
    }

    report(&scene);
    log::info!(
        "{} frames, {} uploads, {:.1} MiB instance data, {:.1} fps",
        scene.frames(),
        sink.uploads,
        sink.bytes as f64 / (1024.0 * 1024.0),
        clock.fps(),
    );
    Ok(())
}

fn report(scene: &Scene) {
    let mode = scene.mode();
    for group in scene.groups() {
        log::info!(
            "  {:<10} {:>5} particles, mean distance to {} target {:.3}",
            group.name,
            group.animator.group().len(),
            if mode == Mode::Assembled { "tree" } else { "scatter" },
            group.animator.mean_target_distance(mode),
        );
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
