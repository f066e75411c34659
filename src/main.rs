use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tiny_vm::vm::{Instruction, Memory};

/// Load a code file into VM memory and list its instructions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw code file, placed right after the stack region
    file: PathBuf,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut ram: Memory = Memory::new().context("can't start vm")?;
    ram.load_code_file(&args.file)
        .with_context(|| format!("can't load code from {}", args.file.display()))?;

    let start = ram.code_region().start;
    let end = start + ram.code_len();
    for pos in (start..end).step_by(Instruction::WIDTH) {
        let ins = ram.fetch(pos as isize)?;
        println!("{:04x}: {}", pos, ins);
    }

    ram.release();
    Ok(())
}
