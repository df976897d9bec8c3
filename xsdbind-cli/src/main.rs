//! Command-line driver: compiles one schema file and writes the
//! generated class sources into an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xsdbind::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "xsdbind", version, about = "XML schema to Backbone model compiler")]
struct Cli {
    /// Schema file to compile. Its stem names the generated package.
    schema: PathBuf,

    /// Directory the generated sources are written into.
    out_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(package_name) = cli.schema.file_stem().and_then(|stem| stem.to_str()) else {
        bail!("cannot derive a package name from {}", cli.schema.display());
    };

    let xml = fs::read_to_string(&cli.schema)
        .with_context(|| format!("reading {}", cli.schema.display()))?;

    // Compile and render fully before touching the output directory, so
    // a failing schema leaves no partial file set behind.
    let package = compile(&xml, package_name)
        .with_context(|| format!("compiling {}", cli.schema.display()))?;
    let files = render_package(&package)?;

    write_package(&files, &cli.out_dir)?;

    tracing::info!(
        package = %package.name,
        classes = files.len(),
        "wrote generated sources"
    );
    Ok(())
}

fn write_package(files: &[(String, String)], out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    for (file_name, source) in files {
        let path = out_dir.join(file_name);
        fs::write(&path, source).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
