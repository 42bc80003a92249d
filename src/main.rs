// The natded CLI.
// Proves one formula given on the command line, or reads formulas line by line.

use clap::Parser;
use natded::{exec, ExecError, Notation, ProverConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Proves propositional formulas by natural deduction
#[derive(Debug, Parser)]
#[command(name = "natded")]
struct Args {
	/// Formula to prove (if omitted, starts in interactive mode)
	input: Option<String>,

	/// Read formulas from stdin until `quit`
	#[arg(short, long)]
	interactive: bool,

	/// Output in TeX (bussproofs.sty)
	#[arg(short, long)]
	tex: bool,

	/// Output file (if omitted, stdout)
	#[arg(short, long, value_name = "PATH")]
	out: Option<PathBuf>,

	/// Maximum nesting of sub-goals
	#[arg(long)]
	max_depth: Option<usize>,

	/// Maximum number of goals visited before giving up
	#[arg(long)]
	max_steps: Option<usize>,

	/// Formulas with more atoms than this skip the truth-table check
	#[arg(long)]
	max_table_atoms: Option<usize>,

	/// Skip the truth-table check
	#[arg(long)]
	no_check: bool,
}

impl Args {
	fn config(&self) -> ProverConfig {
		let mut config = ProverConfig::default();
		if let Some(max_depth) = self.max_depth {
			config.max_depth = max_depth;
		}
		if let Some(max_steps) = self.max_steps {
			config.max_steps = max_steps;
		}
		if let Some(max_table_atoms) = self.max_table_atoms {
			config.max_table_atoms = max_table_atoms;
		}
		config.check_validity = !self.no_check;
		config
	}

	fn notation(&self) -> Notation {
		if self.tex {
			Notation::TeX
		} else {
			Notation::Plain
		}
	}

	fn emit(&self, text: &str) -> Result<(), ExecError> {
		match self.out {
			Some(ref path) => std::fs::write(path, text).map_err(|source| ExecError::Io {
				path: path.display().to_string(),
				source,
			}),
			None => {
				println!("{}", text);
				Ok(())
			}
		}
	}

	fn run(&self) -> Result<(), ExecError> {
		let config = self.config();
		match self.input {
			Some(ref input) if !self.interactive => {
				let text = exec(input, self.notation(), &config)?;
				self.emit(&text)
			}
			_ => self.interactive_loop(&config),
		}
	}

	fn interactive_loop(&self, config: &ProverConfig) -> Result<(), ExecError> {
		let stdin = io::stdin();
		let mut lines = stdin.lock().lines();
		loop {
			println!("input ('quit' to quit):");
			io::stdout().flush().map_err(stdio_error)?;
			let line = match lines.next() {
				Some(line) => line.map_err(stdio_error)?,
				None => return Ok(()),
			};
			if line.trim_start().starts_with("quit") {
				return Ok(());
			}
			if line.trim().is_empty() {
				continue;
			}
			// a bad formula should not end the session
			match exec(&line, self.notation(), config) {
				Ok(text) => self.emit(&text)?,
				Err(e) => eprintln!("{}", e),
			}
		}
	}
}

fn stdio_error(source: io::Error) -> ExecError {
	ExecError::Io {
		path: "stdio".to_owned(),
		source,
	}
}

fn main() -> ExitCode {
	// RUST_LOG controls verbosity, e.g. RUST_LOG=natded::prover=debug
	tracing_subscriber::registry()
		.with(fmt::layer().with_ansi(false).without_time().with_writer(io::stderr))
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.init();

	let args = Args::parse();
	match args.run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{}", e);
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_flags_map_onto_config() {
		let args = Args::try_parse_from([
			"natded",
			"--max-depth",
			"8",
			"--max-steps",
			"500",
			"--max-table-atoms",
			"4",
			"--no-check",
			"A to A",
		])
		.unwrap();
		let config = args.config();
		assert_eq!(config.max_depth, 8);
		assert_eq!(config.max_steps, 500);
		assert_eq!(config.max_table_atoms, 4);
		assert!(!config.check_validity);
		assert_eq!(args.input.as_deref(), Some("A to A"));
	}

	#[test]
	fn test_defaults_come_from_config() {
		let args = Args::try_parse_from(["natded", "-t", "A to A"]).unwrap();
		assert_eq!(args.config(), ProverConfig::default());
		assert_eq!(args.notation(), Notation::TeX);
	}
}
