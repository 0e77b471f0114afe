use clap::{Parser, Subcommand};
use menugen::{config, generate, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menugen")]
#[command(about = "Generate index pages for a directory of HTML pages")]
#[command(long_about = "\
Generate index pages for a directory of HTML pages

Each page's <title> and <meta name=\"description\"> become a link in a
generated link-list script, rendered by a generated index.html.

Content structure:

  site/                          # --root
  ├── menugen.toml               # Optional config
  ├── index.html                 # Generated: root index
  ├── menu.js                    # Generated: root link list
  └── pages/                     # Content root
      ├── demo.html              # Listed in the root index
      ├── blog/
      │   └── index.html         # Directory listed via its entry page
      ├── drafts/                # No index.html = skipped
      └── @docs/                 # Collection (@ prefix)
          ├── guide.html         # Listed in @docs' own index
          ├── index.html         # Generated: collection index
          └── sub-menu.js        # Generated: collection link list

Metadata resolution:
  Name:        <title> text → file name (demo.html)
  Description: <meta name=\"description\" content> → empty

A missing content root is not an error: nothing is written.

Run 'menugen gen-config' to print a documented menugen.toml.")]
#[command(version)]
struct Cli {
    /// Site root: generated root index goes here, content root is resolved from here
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/menugen.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content root and (re)write every index and link list
    Build,
    /// Scan the content root and show what would be indexed, without writing
    Check,
    /// Print a stock menugen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build => {
            let config = load_config(&cli)?;
            let content_dir = cli.root.join(&config.content_root);
            println!("==> Scanning {}", content_dir.display());
            let Some(manifest) = scan::scan(&cli.root, &config)? else {
                println!("{}", output::format_missing_content_root(&content_dir));
                return Ok(());
            };
            output::print_scan_output(&manifest);

            println!("==> Generating indexes in {}", cli.root.display());
            let plan = generate::generate(&manifest, &cli.root, generate::current_timestamp())?;
            output::print_generate_output(&plan);
        }
        Command::Check => {
            let config = load_config(&cli)?;
            let content_dir = cli.root.join(&config.content_root);
            println!("==> Checking {}", content_dir.display());
            let Some(manifest) = scan::scan(&cli.root, &config)? else {
                println!("{}", output::format_missing_content_root(&content_dir));
                return Ok(());
            };
            output::print_scan_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the explicit `--config` file, or `menugen.toml` from the site root.
fn load_config(cli: &Cli) -> Result<config::MenuConfig, config::ConfigError> {
    match &cli.config {
        Some(path) => config::load_config_file(path),
        None => config::load_config(&cli.root),
    }
}
