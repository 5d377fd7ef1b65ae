mod io;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use accumulon_core::NullInputSource;
use accumulon_machine::{assemble, firmware, MemoryMode, System};
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "accumulon", about = "A teaching-grade accumulator machine simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress verbose cache hit/miss logging during `run`.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a source file into a firmware image.
    Build {
        src: PathBuf,
        out: PathBuf,
    },
    /// Boot and execute a firmware image.
    Run {
        image: PathBuf,
        /// Upper bound on simulated cycles, to guard against runaway programs.
        #[arg(long, default_value_t = 10_000_000)]
        max_cycles: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Build { src, out } => build(&src, &out),
        Command::Run { image, max_cycles } => run(&image, max_cycles, cli.quiet),
    }
}

fn build(src: &PathBuf, out: &PathBuf) -> ExitCode {
    let source = match std::fs::read_to_string(src) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}: {e}", "error:".red().bold(), src.display());
            return ExitCode::FAILURE;
        }
    };

    let assembled = assemble(&source);
    for diagnostic in &assembled.diagnostics {
        eprintln!("{} {diagnostic}", "warning:".yellow().bold());
    }

    if let Err(e) = firmware::save(out, &assembled.words) {
        eprintln!("{} {e}", "error:".red().bold());
        return ExitCode::FAILURE;
    }

    println!(
        "assembled {} word(s) -> {}",
        assembled.words.len(),
        out.display()
    );
    ExitCode::SUCCESS
}

fn run(image: &PathBuf, max_cycles: u64, quiet: bool) -> ExitCode {
    let program = match firmware::load(image) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let input: Box<dyn accumulon_core::InputSource> = if atty_stdin() {
        Box::new(io::RawStdinSource::new())
    } else {
        Box::new(NullInputSource)
    };

    let mut system = System::new(
        MemoryMode::cached_default(!quiet),
        Box::new(io::StdoutSink),
        input,
        &program,
    );

    system.run_to_halt(max_cycles);

    report::print_report(&system.stats);
    ExitCode::SUCCESS
}

fn atty_stdin() -> bool {
    use std::io::IsTerminal;
    std::io::stdin().is_terminal()
}
