use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use platter::vm::Listing;
use platter::{
    Error, ExecutionOptions, exit_code, load_scroll_file, render_error, stdio_machine,
};

/// Platter - a Universal Machine interpreter
#[derive(Parser, Debug)]
#[command(name = "platter", version)]
#[command(about = "Run Universal Machine scrolls", long_about = None)]
struct Args {
    /// Print a disassembly of the scroll instead of running it
    #[arg(long, conflicts_with = "bits")]
    disassemble: bool,

    /// Print each platter as a 32-bit binary string instead of running it
    #[arg(long)]
    bits: bool,

    /// Stop with an error after this many instructions
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Print per-operator instruction counts to stderr after the run
    #[arg(long)]
    stats: bool,

    /// Path to the scroll to load
    scroll: PathBuf,
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    // PLATTER_LOG takes precedence over RUST_LOG; default to WARN.
    let filter = EnvFilter::try_from_env("PLATTER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), Error> {
    let program = load_scroll_file(&args.scroll)?;

    if args.disassemble || args.bits {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        let written = if args.disassemble {
            write!(out, "{}", Listing::disassemble(&program))
        } else {
            write!(out, "{}", Listing::bits(&program))
        };
        // A closed pipe (e.g. `| head`) is not worth reporting.
        written.and_then(|()| out.flush()).ok();
        return Ok(());
    }

    let options = ExecutionOptions {
        max_cycles: args.max_cycles,
        collect_stats: args.stats,
    };

    let mut machine = stdio_machine(program, options);
    let result = machine.run();

    if let Some(stats) = machine.stats() {
        eprintln!("{stats}");
    }
    let summary = result?;
    tracing::info!(cycles = summary.cycles, "scroll halted");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            render_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
