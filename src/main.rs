//! hack-asm CLI - assembles a Hack `.asm` file into a `.hack` file.

use clap::Parser as ClapParser;
use hack_asm::error::AsmError;
use hack_asm::{Assembly, assemble_file, logging, writer};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(ClapParser, Debug)]
#[command(name = "hack-asm")]
#[command(version)]
#[command(about = "Assembles Hack assembly into Hack machine code")]
struct Args {
    /// Input assembly file (.asm)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to INPUT with a .hack extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the resolved symbol table
    #[arg(long)]
    symbols: bool,

    /// Exit with failure if any diagnostic was reported
    #[arg(long)]
    strict: bool,
}

fn print_symbols(asm: &Assembly) {
    println!("{:<24} {:>6}  KIND", "SYMBOL", "ADDR");
    for (name, symbol) in asm.symbols.iter() {
        println!("{:<24} {:>6}  {:?}", name, symbol.address, symbol.kind);
    }
}

fn write_output(asm: &Assembly, path: &Path) -> Result<(), AsmError> {
    let file = File::create(path)?;
    writer::write_words(&asm.words, BufWriter::new(file))
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(logging::level_for(args.verbose, args.quiet)) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let start = Instant::now();

    let asm = match assemble_file(&args.input) {
        Ok(asm) => asm,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::from(2);
        }
    };

    if args.symbols {
        print_symbols(&asm);
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("hack"));

    if let Err(e) = write_output(&asm, &output) {
        log::error!("cannot write {}: {}", output.display(), e);
        return ExitCode::from(2);
    }

    log::info!(
        "{} -> {} ({} words in {:.2}ms)",
        args.input.display(),
        output.display(),
        asm.words.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if !asm.is_clean() {
        log::warn!("{} diagnostic(s) reported", asm.diagnostics.len());
        if args.strict {
            return ExitCode::from(1);
        }
    }

    ExitCode::SUCCESS
}
