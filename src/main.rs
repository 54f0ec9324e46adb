use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::{debug, info};

mod color;
mod config;
mod display;
mod geometry;
mod input;
mod renderer;

use config::Config;
use display::OutputMode;
use geometry::Vertex;
use input::TriangleInput;
use renderer::{render_scene, Canvas, Scene};

#[derive(Parser, Debug)]
#[command(name = "trisketch")]
#[command(author, version, about = "Render a triangle with its interior angles labeled")]
struct Args {
    /// X coordinate of vertex A (default 0)
    #[arg(long, allow_hyphen_values = true)]
    ax: Option<String>,
    /// Y coordinate of vertex A (default 0)
    #[arg(long, allow_hyphen_values = true)]
    ay: Option<String>,
    /// X coordinate of vertex B (default 100)
    #[arg(long, allow_hyphen_values = true)]
    bx: Option<String>,
    /// Y coordinate of vertex B (default 0)
    #[arg(long, allow_hyphen_values = true)]
    by: Option<String>,
    /// X coordinate of vertex C (default 50)
    #[arg(long, allow_hyphen_values = true)]
    cx: Option<String>,
    /// Y coordinate of vertex C (default 100)
    #[arg(long, allow_hyphen_values = true)]
    cy: Option<String>,

    /// Coordinates as a query string, e.g. "ax=0&ay=0&bx=4&by=0&cx=0&cy=3".
    /// Individual coordinate flags take priority.
    #[arg(short, long)]
    query: Option<String>,

    /// Print the normalised query string for the given coordinates and exit
    #[arg(long)]
    print_query: bool,

    /// Fail on coordinates that are not numbers instead of drawing NaN
    #[arg(long)]
    strict: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a commented default config to the XDG config path and exit
    #[arg(long)]
    init_config: bool,

    /// Output mode: png or terminal
    #[arg(short, long)]
    mode: Option<OutputMode>,

    /// PNG output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas side length in pixels
    #[arg(long)]
    canvas_size: Option<f64>,

    /// Margin around the triangle in pixels
    #[arg(long)]
    padding: Option<f64>,

    /// Largest scale applied to small triangles
    #[arg(long)]
    max_scale: Option<f64>,

    /// Angle label position between centroid (0) and vertex (1)
    #[arg(long)]
    label_pull: Option<f64>,

    /// Increase log verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn triangle_input(&self) -> TriangleInput {
        let flags = TriangleInput {
            ax: self.ax.clone(),
            ay: self.ay.clone(),
            bx: self.bx.clone(),
            by: self.by.clone(),
            cx: self.cx.clone(),
            cy: self.cy.clone(),
        };
        match &self.query {
            Some(query) => TriangleInput::from_query(query).overridden_by(flags),
            None => flags,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("trisketch={level}").parse()?),
        )
        .init();

    if args.init_config {
        let path = Config::init_default_config()?;
        info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if args.print_query {
        println!("{}", args.triangle_input().to_query());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);
    config.validate()?;
    debug!(?config, "effective config");

    let input = args.triangle_input();
    let raw = input.resolve(args.strict)?;
    info!("Triangle A={} B={} C={}", raw.a, raw.b, raw.c);

    let scene = Scene::compose(&raw, &config.layout);
    let size = config.layout.canvas_pixels();
    let mut canvas = Canvas::new(size, size);
    render_scene(&mut canvas, &scene, &config.style);

    match config.output.mode {
        OutputMode::Png => display::png::write(&canvas, &config.output.path)?,
        OutputMode::Terminal => display::terminal::print(&canvas)?,
    }

    let summary: Vec<String> = Vertex::ALL.iter().map(|&v| scene.angles.label(v)).collect();
    println!("{}  (scale {:.3})", summary.join("  "), scene.transform.scale);

    Ok(())
}
