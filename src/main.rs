use clap::{Parser, Subcommand};
use lectern::render::CommandRenderer;
use lectern::{config, output, pipeline};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(version)]
#[command(about = "Static site exporter for interactive notebook collections")]
#[command(long_about = "\
Static site exporter for interactive notebook collections

Your filesystem is the data source. Each notebook source file in the
notebooks directory becomes one exported HTML page; the collection becomes
a static index grouped into a lecture series and explorations.

Content structure:

  notebooks/
  ├── config.toml          # Site config (optional)
  ├── about.md             # About page (optional)
  ├── gravitation.py       # Lecture-series notebook
  └── three_body.py        # Exploration notebook

Metadata resolution (first available wins):
  Title:       first markdown heading → filename (wave_particle.py → \"Wave Particle\")
  Description: first paragraph after the heading → templated sentence
  Tags:        keyword scan over source text → \"Physics\"

Exports are produced by an external renderer (marimo by default), invoked
per notebook as: <program> export html <notebook> -o <output>.

Run 'lectern gen-config' to print a documented config.toml.")]
struct Cli {
    /// Notebooks directory
    #[arg(long, default_value = "notebooks", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "docs", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inventory notebooks and their extracted metadata without exporting
    Scan {
        /// Emit the inventory as JSON instead of the readable listing
        #[arg(long)]
        json: bool,
    },
    /// Export every notebook to HTML and generate the index page
    Export {
        /// Include notebook source code in exported pages
        #[arg(long)]
        include_code: bool,
    },
    /// Validate the notebooks directory without exporting
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { json } => {
            let notebooks = pipeline::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&notebooks)?);
            } else {
                output::print_scan_output(&notebooks);
            }
        }
        Command::Export { include_code } => {
            let config = config::load_config(&cli.source)?;
            init_worker_pool(&config.processing);

            let renderer = CommandRenderer::new(config.renderer.program.as_str(), std::env::current_dir()?)
                .with_timeout(Duration::from_secs(config.renderer.timeout_secs));

            let opts = pipeline::ExportOptions {
                source_dir: cli.source,
                output_dir: cli.output.clone(),
                include_code: include_code || config.renderer.include_code,
                site_title: config.title.clone(),
                repo_url: config.repository.clone().or_else(pipeline::repo_url_from_env),
            };

            let paths = pipeline::export_all(&opts, &renderer)?;
            output::print_export_output(&paths, &cli.output);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let config = config::load_config(&cli.source)?;
            let notebooks = pipeline::scan(&cli.source)?;
            if notebooks.is_empty() {
                return Err(format!("no notebooks found in {}", cli.source.display()).into());
            }
            output::print_scan_output(&notebooks);
            println!("==> {} notebooks, renderer '{}'", notebooks.len(), config.renderer.program);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon pool used for parallel exports.
///
/// Caps at the number of available CPU cores — user can constrain down,
/// not up.
fn init_worker_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}
