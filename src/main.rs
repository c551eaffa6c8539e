use std::path::PathBuf;

use anyhow::Context;
use log::{info, warn};

use cglab::color::Color;
use cglab::config::KernelConfig;
use cglab::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use cglab::geometry::Point;
use cglab::math3d::{Axis, Vec3};
use cglab::ops::{self, KernelState, Operation};
use cglab::pipeline::Pivot;
use cglab::raster::{CircleAlgorithm, Connectivity, LineAlgorithm};
use cglab::session::Session;

const CONFIG_FILE: &str = "cglab.json";

struct Args {
    config: PathBuf,
    script: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    write_config: Option<PathBuf>,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: PathBuf::from(CONFIG_FILE),
        script: None,
        width: None,
        height: None,
        write_config: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    parsed.config = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            },
            "--script" | "-s" => {
                if i + 1 < args.len() {
                    parsed.script = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        parsed.width = Some(w);
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        parsed.height = Some(h);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // WxH, e.g. 640x480
                    if let Some((w, h)) = args[i + 1].split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            parsed.width = Some(w);
                            parsed.height = Some(h);
                        }
                    }
                    i += 1;
                }
            },
            "--write-config" => {
                if i + 1 < args.len() {
                    parsed.write_config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: cglab [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --config PATH, -c PATH    Config file (default: {})", CONFIG_FILE);
                println!("  --script PATH, -s PATH    JSON list of operations to run");
                println!("  --width W, -w W           Canvas width (default: {})", DEFAULT_WIDTH);
                println!("  --height H, -h H          Canvas height (default: {})", DEFAULT_HEIGHT);
                println!("  --resolution WxH, -r WxH  Canvas size (e.g., 640x480)");
                println!("  --write-config PATH       Write the effective config and exit");
                println!("  --help                    Show this help message");
                std::process::exit(0);
            },
            other => warn!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    parsed
}

/// Built-in walk through the kernel, used when no script is given
fn demo_script(config: &KernelConfig) -> Vec<Operation> {
    let (w, h) = (config.canvas.width as i32, config.canvas.height as i32);
    let illumination = &config.illumination;
    vec![
        Operation::DrawLine {
            p0: Point::new(10, 10),
            p1: Point::new(w - 10, h / 3),
            color: Color::RED,
            algorithm: LineAlgorithm::Bresenham,
        },
        Operation::DrawLineClipped {
            p0: Point::new(0, h - 20),
            p1: Point::new(w, 20),
            color: Color::BLUE,
            boundary: [Point::new(w / 4, h / 4), Point::new(3 * w / 4, 3 * h / 4)],
        },
        Operation::DrawCircle {
            center: Point::new(w / 4, 3 * h / 4),
            edge: Point::new(w / 4 + 40, 3 * h / 4),
            color: Color::GREEN,
            algorithm: CircleAlgorithm::Bresenham,
        },
        Operation::FloodFill {
            seed: Point::new(w / 4, 3 * h / 4),
            color: Color::rgb(255, 220, 120),
            connectivity: Connectivity::Four,
        },
        Operation::DrawTriangle {
            p0: Point::new(3 * w / 4, h / 2),
            p1: Point::new(w - 20, h - 20),
            p2: Point::new(w / 2, h - 40),
            color: Color::rgb(120, 40, 160),
            filled: true,
        },
        Operation::LoadObject {
            index: 0,
            color: Color::BLACK,
        },
        Operation::Rotate {
            axis: Axis::Y,
            degrees: 30.0,
            pivot: Pivot::Centroid,
            color: Color::BLACK,
        },
        Operation::Shear {
            matrix: config.shear_matrix,
            color: Color::BLACK,
        },
        Operation::Translate {
            offset: Vec3::new(-60.0, -80.0, 0.0),
            color: Color::BLACK,
        },
        Operation::Illuminate {
            model: illumination.model,
            coefficients: illumination.coefficients,
            light: illumination.light,
        },
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = parse_args();
    let mut config = KernelConfig::load_or_default(&args.config);
    if let Some(w) = args.width {
        config.canvas.width = w;
    }
    if let Some(h) = args.height {
        config.canvas.height = h;
    }

    if let Some(path) = &args.write_config {
        config
            .save(path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        info!("Config written to {}", path.display());
        return Ok(());
    }

    let script = match &args.script {
        Some(path) => ops::load_script(path)
            .with_context(|| format!("Failed to load script {}", path.display()))?,
        None => demo_script(&config),
    };

    let mut state = KernelState::new(
        cglab::PixelSurface::filled(config.canvas.width, config.canvas.height, config.canvas.background)
            .context("Invalid canvas size")?,
    );
    state.viewport = config.viewport;

    info!(
        "Canvas {}x{}, running {} operations",
        config.canvas.width,
        config.canvas.height,
        script.len()
    );

    let mut session = Session::new(state);
    for (n, op) in script.iter().enumerate() {
        session
            .apply(op)
            .with_context(|| format!("Operation #{} ({}) failed", n + 1, op.name()))?;
        // Painted strokes become part of the canvas that scenes redraw on
        if !op.redraws_scene() {
            session.commit_backup();
        }
    }

    let surface = session.surface();
    info!(
        "Done: {}x{} surface, {} pixels differ from the background",
        surface.width(),
        surface.height(),
        surface.pixels_not(config.canvas.background).len()
    );

    #[cfg(feature = "viewer")]
    viewer::run(&mut session).map_err(anyhow::Error::msg)?;

    Ok(())
}

#[cfg(feature = "viewer")]
mod viewer {
    use cglab::display::{InputEvent, RenderTarget, Window};
    use cglab::session::Session;
    use log::info;
    use sdl2::keyboard::Keycode;

    /// Show the session's surface until Escape or the window closes.
    /// Left/Right step through history, R resets the object.
    pub fn run(session: &mut Session) -> Result<(), String> {
        let (width, height) = (session.surface().width(), session.surface().height());
        let (mut window, texture_creator) = Window::open("cglab", width, height)?;
        let mut target = RenderTarget::with_size(&texture_creator, width, height)?;

        info!("Viewer: Left/Right undo/redo, R reset, Escape quit");
        'main: loop {
            for event in window.poll_events() {
                match event {
                    InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                    InputEvent::KeyDown(Keycode::Left) => {
                        session.undo();
                    },
                    InputEvent::KeyDown(Keycode::Right) => {
                        session.redo();
                    },
                    InputEvent::KeyDown(Keycode::R) => {
                        session.reset();
                    },
                    InputEvent::KeyDown(_) => {},
                }
            }

            let surface = session.surface();
            if surface.width() == window.width() && surface.height() == window.height() {
                window.present(&mut target, surface)?;
            }
        }
        Ok(())
    }
}
