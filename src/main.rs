use clap::{Parser, Subcommand};
use glowfield::headless::Script;
use glowfield::{config, fallback, output, render};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "glowfield")]
#[command(about = "Pointer-reactive gradient backdrop, rendered headlessly")]
#[command(long_about = "\
Pointer-reactive gradient backdrop, rendered headlessly

Up to five soft radial glows drift around a smoothed pointer position and
are composited additively under a dark overlay. With no pointer input the
backdrop plays an idle demo that orbits the center. When reduced motion is
requested a single static frame is painted instead.

Commands run the same backdrop the page runs, against a simulated browser:

  render     replay a pointer script and write sampled PNG frames
  still      write the reduced-motion fallback frame
  fallback   print the static CSS fallback (or an HTML preview page)

Script format (JSON, times in milliseconds):

  { \"events\": [
      { \"at_ms\": 0,    \"kind\": \"pointer\", \"x\": 120, \"y\": 80 },
      { \"at_ms\": 500,  \"kind\": \"resize\",  \"width\": 640, \"height\": 360 },
      { \"at_ms\": 900,  \"kind\": \"reduced_motion\", \"enabled\": true }
  ] }

Run 'glowfield gen-config' to generate a documented glowfield.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "glowfield.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate the animated backdrop and write sampled frames
    Render {
        /// Pointer script to replay (JSON)
        #[arg(long)]
        script: Option<PathBuf>,
        /// Output directory for frames and frames.json
        #[arg(long, default_value = "frames")]
        out: PathBuf,
    },
    /// Write the static reduced-motion frame as a PNG
    Still {
        #[arg(long, default_value = "still.png")]
        out: PathBuf,
    },
    /// Print the static CSS fallback
    Fallback {
        /// Print a standalone HTML preview page instead of a CSS rule
        #[arg(long)]
        html: bool,
        /// CSS selector for the rule
        #[arg(long, default_value = ".backdrop")]
        selector: String,
    },
    /// Validate the config file without rendering
    Check,
    /// Print a stock glowfield.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Render { script, out } => {
            let config = config::load_config(&cli.config)?;
            let script = match script {
                Some(path) => Script::load(&path)?,
                None => Script::default(),
            };
            init_thread_pool(&config.processing);
            println!("==> Rendering → {}", out.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_render_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = render::render_frames(&config, &script, &out, Some(tx));
            printer.join().ok();
            let result = result?;
            output::print_render_output(&result.manifest);
            println!("==> Manifest: {}", result.manifest_path.display());
        }
        Command::Still { out } => {
            let config = config::load_config(&cli.config)?;
            let manifest = render::render_still(&config, &out)?;
            output::print_render_output(&manifest);
            println!("==> Wrote {}", out.display());
        }
        Command::Fallback { html, selector } => {
            let config = config::load_config(&cli.config)?;
            let options = config.options()?;
            let colors = options.palette.colors();
            if html {
                let page = fallback::preview_page(colors, &options.style, options.overlay);
                println!("{}", page.into_string());
            } else {
                print!(
                    "{}",
                    fallback::fallback_rule(&selector, colors, &options.style, options.overlay)
                );
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let config = config::load_config(&cli.config)?;
            output::print_config_summary(&config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
