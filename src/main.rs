use anyhow::Context as _;
use arcus::config::{self, Config};
use arcus::gui::app::AppModel;
use arcus::gui::render;
use arcus::sys::runtime::{self, Services};
use arcus::sys::simulate::Simulation;
use arcus_core::{ProgressState, RingColor};
use clap::Parser;
use relm4::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Initial progress value
    #[arg(long)]
    value: Option<i32>,

    /// Maximum value; 0 shows a spinner
    #[arg(long)]
    maximum: Option<i32>,

    /// Ring color (e.g. "#6ebeeb")
    #[arg(long)]
    color: Option<RingColor>,

    /// Feed the ring with synthetic progress
    #[arg(long)]
    simulate: bool,

    /// Simulation step
    #[arg(long)]
    step: Option<i32>,

    /// Milliseconds between simulation steps
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Read `value N`, `max N`, `inner R`, `outer R` and `color HEX` lines from stdin
    #[arg(long)]
    stdin: bool,

    /// Write the default config file and print its path
    #[arg(long)]
    write_config: bool,

    /// Render a single frame to a PNG file instead of opening a window
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Edge length of the snapshot in pixels
    #[arg(long, default_value_t = 200)]
    size: i32,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(value) = self.value {
            config.progress.value = value;
        }
        if let Some(maximum) = self.maximum {
            config.progress.maximum = maximum;
        }
        if let Some(color) = self.color {
            config.ring.color = color;
        }
        if self.simulate {
            config.simulation.enabled = true;
        }
        if let Some(step) = self.step {
            config.simulation.step = step;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.simulation.interval_ms = interval_ms;
        }
    }
}

fn snapshot(config: &Config, size: i32, path: &Path) -> anyhow::Result<()> {
    let now = Instant::now();
    let mut state = ProgressState::new(now);
    state.set_color(config.ring.color);
    state.set_inner_radius(config.ring.inner_radius);
    state.set_outer_radius(config.ring.outer_radius);
    state.set_maximum(config.progress.maximum, now);
    state.set_value(config.progress.value, now);
    state.set_visible_value(state.value());

    render::write_png(&state, size, size, path)
        .with_context(|| format!("rendering snapshot to {}", path.display()))?;
    log::info!("Wrote snapshot to {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config().context("writing default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    args.apply(&mut config);

    if let Some(path) = &args.snapshot {
        return snapshot(&config, args.size, path);
    }

    let simulation = config.simulation.enabled.then(|| Simulation {
        maximum: config.progress.maximum,
        step: config.simulation.step,
        interval: config.simulation.interval(),
    });

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(
        tx,
        Services {
            watch_config: true,
            stdin_control: args.stdin,
            simulation,
        },
    );

    // our flags are not GTK's
    let app = RelmApp::new("org.arcus.demo").with_args(Vec::new());
    app.run::<AppModel>((config, rx));
    Ok(())
}
