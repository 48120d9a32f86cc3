//! ShardBuf CLI
//!
//! Loads a line-oriented text file into a store and inspects it.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use shardbuf::{dump, loader, Config, ShardBuffer};
use tracing_subscriber::{fmt, EnvFilter};

/// ShardBuf CLI
#[derive(Parser, Debug)]
#[command(name = "shardbuf-cli")]
#[command(about = "Inspect a chunked entry store built from a text file")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(ClapArgs, Debug)]
struct LoadOpts {
    /// Text file, one entry per line
    file: PathBuf,

    /// Compact the store after loading
    #[arg(short, long)]
    compact: bool,

    /// Chunk size as a power of two
    #[arg(long, default_value = "20")]
    chunk_log: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every entry and chunk
    Dump {
        #[command(flatten)]
        load: LoadOpts,
    },

    /// Print a single entry's content
    Get {
        #[command(flatten)]
        load: LoadOpts,

        /// Entry index
        index: usize,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shardbuf=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> shardbuf::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Dump { load } => {
            let store = open_store(&load)?;
            dump::write_dump(&store, &mut out)?;
        }
        Commands::Get { load, index } => {
            let store = open_store(&load)?;
            let data = store.read(index)?;
            out.write_all(&data)?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;
    Ok(())
}

fn open_store(opts: &LoadOpts) -> shardbuf::Result<ShardBuffer> {
    let config = Config::builder().chunk_log(opts.chunk_log).build();
    let mut store = loader::load_file(&opts.file, config)?;

    if opts.compact {
        let stats = store.compact()?;
        tracing::info!(
            chunks = stats.chunks,
            bytes = stats.bytes_written,
            "store compacted"
        );
    }

    Ok(store)
}
