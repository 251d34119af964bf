use std::path::Path;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::init_logger;
use output::{frame_path, save_raster_as_png};
use tricast::random;
use tricast::{Camera, Command, Config, Raster, Triangle, TriangleList, Vector};

/// Demo scene: a tiled floor, a pyramid in front of the default camera, and
/// a cloud of coloured shards around it.
fn create_scene(shards: usize) -> TriangleList {
    let mut world = TriangleList::new();

    // Floor tiles, two triangles each, checkered
    for i in -3..3 {
        for j in -3..3 {
            let (x, y) = (i as f64 * 2.0, j as f64 * 2.0);
            let color = if (i + j) % 2 == 0 { [180, 180, 180] } else { [90, 90, 110] };
            let p00 = Vector::new(x, y, 0.0);
            let p10 = Vector::new(x + 2.0, y, 0.0);
            let p01 = Vector::new(x, y + 2.0, 0.0);
            let p11 = Vector::new(x + 2.0, y + 2.0, 0.0);
            world.add(Triangle::new(p00, p10, p11, color));
            world.add(Triangle::new(p00, p11, p01, color));
        }
    }

    // Pyramid
    let apex = Vector::new(1.5, -1.5, 6.0);
    let base = [
        Vector::new(0.0, -3.0, 0.0),
        Vector::new(3.0, -3.0, 0.0),
        Vector::new(3.0, 0.0, 0.0),
        Vector::new(0.0, 0.0, 0.0),
    ];
    let faces = [[220, 60, 40], [240, 200, 60], [60, 180, 90], [50, 110, 220]];
    for (k, color) in faces.into_iter().enumerate() {
        world.add(Triangle::new(base[k], base[(k + 1) % 4], apex, color));
    }

    // Shards
    for _ in 0..shards {
        let center = random::random_point(-2.0, 5.0) + Vector::new(0.0, -2.0, 0.0);
        let a = center + random::random_point(-0.6, 0.6);
        let b = center + random::random_point(-0.6, 0.6);
        let c = center + random::random_point(-0.6, 0.6);
        world.add(Triangle::new(a, b, c, random::random_color(60)));
    }

    world
}

fn run(args: Args) -> tricast::Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(noise) = args.noise {
        config.render.noise = noise;
    }
    if let Some(frames) = args.frames {
        config.render.frames = frames;
    }
    config.validate()?;

    let render = config.render;
    info!(
        "Raster {}x{}, {} frame(s), noise amplitude {}",
        render.width, render.height, render.frames, render.noise
    );

    let world = create_scene(args.shards);
    info!("Scene has {} triangles", world.len());

    let raster = Raster::rgb(render.width, render.height)?;
    let mut camera = Camera::new(raster, config.camera)?;

    let output_path = Path::new(&args.output);
    let generation_start = std::time::Instant::now();
    let pb = ProgressBar::new(render.frames as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{bar:40} {pos}/{len} frames ETA: {eta}")
    {
        pb.set_style(style);
    }

    for frame in 0..render.frames {
        let stats = if render.noise > 0 {
            camera.step_noisy_thread_rng(&world, render.noise)
        } else {
            camera.step(&world)
        };
        log::debug!("frame {frame}: {} hits, max distance {:.3}", stats.hits, stats.max_distance);

        if args.save_frames {
            let path = frame_path(output_path, frame);
            if let Err(e) = save_raster_as_png(camera.raster(), &path) {
                warn!("Failed to save frame {}: {}", path.display(), e);
            }
        }

        let command = args.commands.get(frame).copied().unwrap_or(Command::None);
        camera.control(command, &config.controller);
        pb.inc(1);
    }
    pb.finish();
    info!("Rendered {} frame(s) in {:.2?}", render.frames, generation_start.elapsed());

    save_raster_as_png(camera.raster(), output_path)
        .map_err(|e| tricast::TricastError::Output(format!("{}: {e}", output_path.display())))?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("Tricast - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}
