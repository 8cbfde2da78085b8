use clap::{Parser, Subcommand};
use log::info;
use space_traveling::api::{ContentSource, FixtureSource, HttpSource};
use space_traveling::config::{self, SiteConfig};
use space_traveling::fetch::{self, Manifest};
use space_traveling::pagination::CursorPolicy;
use space_traveling::{generate, logging, output};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "space-traveling")]
#[command(about = "Static blog generator backed by a headless content API")]
#[command(long_about = "\
Static blog generator backed by a headless content API

Posts are fetched from a Prismic-style REST API and rendered to plain HTML:
a paginated listing, one page per post with reading time, prev/next links
and an utterances comment thread.

Site structure:

  site/
  ├── config.toml      # API endpoint, labels, locale, comments, colors
  └── assets/          # Static assets (logo, favicon) → copied to output root

Output structure:

  dist/
  ├── index.html                 # Listing page 1
  ├── page/2/index.html          # Listing page 2, ...
  └── post/<uid>/index.html      # One page per post

Run 'space-traveling gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory (config.toml and assets/)
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the intermediate manifest
    #[arg(long, default_value = ".space-traveling-temp", global = true)]
    temp_dir: PathBuf,

    /// Serve documents from a JSON snapshot instead of the live API
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Fail when a listing page cursor cannot be fetched
    #[arg(long, global = true)]
    strict: bool,

    /// Only log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch posts from the content API into a manifest
    Fetch,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: fetch → generate
    Build,
    /// Fetch and print the post inventory without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);

    match cli.command {
        Command::Fetch => {
            let manifest = run_fetch(&cli)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_fetch_output(&manifest);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest = generate::generate(&manifest_path, &cli.output, &cli.source)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Fetching posts");
            let started = Instant::now();
            let manifest = run_fetch(&cli)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_fetch_output(&manifest);
            info!("fetched in {}", logging::format_elapsed(started.elapsed()));

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let started = Instant::now();
            generate::generate_site(&manifest, &cli.output, &cli.source)?;
            output::print_generate_output(&manifest);
            info!("generated in {}", logging::format_elapsed(started.elapsed()));

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = run_fetch(&cli)?;
            output::print_fetch_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, open the content source and run the fetch stage.
fn run_fetch(cli: &Cli) -> Result<Manifest, Box<dyn std::error::Error>> {
    let site_config = config::load_config(&cli.source)?;
    init_thread_pool(&site_config.processing);
    let source = open_source(cli, &site_config)?;
    let policy = if cli.strict {
        CursorPolicy::Strict
    } else {
        CursorPolicy::Lenient
    };
    Ok(fetch::fetch(source.as_ref(), &site_config, policy)?)
}

fn open_source(
    cli: &Cli,
    site_config: &SiteConfig,
) -> Result<Box<dyn ContentSource>, Box<dyn std::error::Error>> {
    match &cli.fixtures {
        Some(path) => {
            info!("serving documents from {}", path.display());
            Ok(Box::new(FixtureSource::load(path)?))
        }
        None => {
            info!("connecting to {}", site_config.api.endpoint);
            Ok(Box::new(HttpSource::connect(&site_config.api)?))
        }
    }
}

fn write_manifest(manifest: &Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

/// Size the global rayon pool used for parallel post detail requests.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
