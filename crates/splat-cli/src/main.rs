//! Splat CLI - render signed-distance splat scenes from the command line

mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use splat_core::prelude::*;
use std::path::{Path, PathBuf};

use settings::{Settings, load_settings, save_settings, settings_path};

#[derive(Parser)]
#[command(name = "splat")]
#[command(about = "Signed distance field splatting of circles", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to {config_dir}/splat/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Where the primitives come from
#[derive(clap::Args)]
struct SceneArgs {
    /// Scene file (.json); a seeded row of circles is used if omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Seed of the generated row
    #[arg(long)]
    seed: Option<u64>,

    /// Half-count of the generated row
    #[arg(long)]
    count: Option<u32>,
}

/// Overrides applied on top of the loaded settings
#[derive(clap::Args)]
struct RenderArgs {
    /// Grid power (the image is 2^power pixels square)
    #[arg(long)]
    power: Option<u32>,

    /// Blend radius of the rounded operators
    #[arg(long, allow_negative_numbers = true)]
    smoothing: Option<f32>,

    /// Apply gamma correction (2.2)
    #[arg(long)]
    gamma: bool,

    /// Fill shapes with the composited color instead of the solid fill
    #[arg(long)]
    accumulated: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene to a PNG image
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Output image file (.png)
        #[arg(short, long, default_value = "splat.png")]
        output: PathBuf,
    },

    /// Step scene motion and write one PNG per frame
    Animate {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Number of frames
        #[arg(short, long, default_value = "60")]
        frames: usize,

        /// Small moving circles to spawn at random positions before the first frame
        #[arg(long, default_value = "0")]
        spawn: usize,

        /// Output directory
        #[arg(short, long, default_value = "frames")]
        output: PathBuf,
    },

    /// Write the seeded demo scene as JSON
    Demo {
        /// Output file
        #[arg(short, long, default_value = "scene.json")]
        output: PathBuf,

        /// Seed of the generated row
        #[arg(long)]
        seed: Option<u64>,

        /// Half-count of the generated row
        #[arg(long)]
        count: Option<u32>,
    },

    /// Print the accumulated distance and color at a screen-space point
    Probe {
        #[command(flatten)]
        scene: SceneArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// X coordinate (-1..1)
        #[arg(long, allow_negative_numbers = true)]
        x: f32,

        /// Y coordinate (-1..1)
        #[arg(long, allow_negative_numbers = true)]
        y: f32,
    },

    /// Print generated WGSL
    Shader {
        /// Which pass to print
        #[arg(short, long, value_enum, default_value = "union")]
        pass: ShaderPass,
    },

    /// Show or initialise the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShaderPass {
    Union,
    Difference,
    Present,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Write default settings to the settings file
    Init,
    /// Print the settings file location
    Path,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render {
            scene,
            render,
            output,
        } => {
            let settings = load_settings(config)?;
            run_render(&settings, &scene, &render, &output)?;
        }
        Commands::Animate {
            scene,
            render,
            frames,
            spawn,
            output,
        } => {
            let settings = load_settings(config)?;
            run_animate(&settings, &scene, &render, frames, spawn, &output)?;
        }
        Commands::Demo {
            output,
            seed,
            count,
        } => {
            let settings = load_settings(config)?;
            let scene = Scene::seeded_row(
                count.unwrap_or(settings.row_count),
                seed.unwrap_or(settings.seed),
            );
            scene
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {} primitives to {}", scene.len(), output.display());
        }
        Commands::Probe {
            scene,
            render,
            x,
            y,
        } => {
            let settings = load_settings(config)?;
            run_probe(&settings, &scene, &render, Vec2::new(x, y))?;
        }
        Commands::Shader { pass } => {
            let code = match pass {
                ShaderPass::Union => splat_shader::build_splat_shader(BlendMode::Union),
                ShaderPass::Difference => splat_shader::build_splat_shader(BlendMode::Difference),
                ShaderPass::Present => splat_shader::build_present_shader(),
            };
            println!("{}", code);
        }
        Commands::Settings { action } => run_settings(config, action)?,
    }

    Ok(())
}

fn load_scene(settings: &Settings, args: &SceneArgs) -> Result<Scene> {
    if let Some(path) = &args.scene {
        println!("Loading scene: {}", path.display());
        return Scene::load(path).with_context(|| format!("Failed to load {}", path.display()));
    }
    Ok(Scene::seeded_row(
        args.count.unwrap_or(settings.row_count),
        args.seed.unwrap_or(settings.seed),
    ))
}

fn build_renderer(settings: &Settings, args: &RenderArgs) -> Result<Renderer> {
    let mut renderer = settings.renderer;
    if let Some(power) = args.power {
        renderer.resolution = Resolution::from_power(power)?;
    }
    if let Some(smoothing) = args.smoothing {
        renderer.params.smoothing = smoothing;
    }
    if args.gamma {
        renderer.presentation.gamma = Some(Presentation::GAMMA);
    }
    if args.accumulated {
        renderer.presentation.fill_mode = FillMode::Accumulated;
    }
    renderer.validate()?;
    Ok(renderer)
}

fn run_render(
    settings: &Settings,
    scene_args: &SceneArgs,
    render_args: &RenderArgs,
    output: &Path,
) -> Result<()> {
    let scene = load_scene(settings, scene_args)?;
    let renderer = build_renderer(settings, render_args)?;
    let size = renderer.resolution.size();

    println!(
        "Rendering {} primitives to {} ({}x{})...",
        scene.len(),
        output.display(),
        size,
        size
    );

    let img: image::RgbaImage = renderer.render(&scene)?;
    img.save(output)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!("Saved to: {}", output.display());

    Ok(())
}

fn run_animate(
    settings: &Settings,
    scene_args: &SceneArgs,
    render_args: &RenderArgs,
    frames: usize,
    spawn: usize,
    output: &Path,
) -> Result<()> {
    use rand::{Rng, SeedableRng};

    let mut scene = load_scene(settings, scene_args)?;
    let renderer = build_renderer(settings, render_args)?;

    let mut rng = rand_pcg::Pcg32::seed_from_u64(scene_args.seed.unwrap_or(settings.seed));
    for _ in 0..spawn {
        let at = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let subtract = rng.random_bool(0.25);
        scene.spawn(at, subtract, &mut rng);
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    println!(
        "Animating {} primitives for {} frames into {}",
        scene.len(),
        frames,
        output.display()
    );

    renderer.animate(&mut scene, frames, |frame, img| {
        let path = output.join(format!("frame_{:04}.png", frame));
        img.save(&path)?;
        Ok(())
    })?;

    println!("Done.");
    Ok(())
}

fn run_probe(
    settings: &Settings,
    scene_args: &SceneArgs,
    render_args: &RenderArgs,
    p: Vec2,
) -> Result<()> {
    let scene = load_scene(settings, scene_args)?;
    let renderer = build_renderer(settings, render_args)?;
    let (d, c) = renderer.sample(&scene, p);
    let shaded = renderer.presentation.shade(d, c);

    println!("point     ({:.4}, {:.4})", p.x, p.y);
    println!("distance  {:.6} ({})", d, if d <= 0.0 { "inside" } else { "outside" });
    println!(
        "color     [{:.4}, {:.4}, {:.4}] coverage {:.4}",
        c.r, c.g, c.b, c.a
    );
    println!(
        "shaded    [{:.4}, {:.4}, {:.4}, {:.4}]",
        shaded.r, shaded.g, shaded.b, shaded.a
    );
    Ok(())
}

fn run_settings(config: Option<&Path>, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = load_settings(config)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Init => {
            let path = save_settings(&Settings::default(), config)?;
            println!("Wrote default settings to {}", path.display());
        }
        SettingsAction::Path => match config.map(Path::to_path_buf).or_else(settings_path) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine config directory"),
        },
    }
    Ok(())
}
