//! One request from text to rendered proof.

use crate::config::ProverConfig;
use crate::error::ExecError;
use crate::parser::parse;
use crate::prover::prove;
use crate::render::{render, Notation};
use crate::validity::{check_tautology, Verdict};
use tracing::{info, warn};

/// Parses `input`, checks it classically if configured, searches for a
/// proof and renders it. Error positions are byte offsets into `input`.
pub fn exec(input: &str, notation: Notation, config: &ProverConfig) -> Result<String, ExecError> {
	let formula = parse(input)?;
	info!(formula = %formula, "parsed input");

	if config.check_validity {
		if let Verdict::Skipped { atoms } = check_tautology(&formula, config.max_table_atoms)? {
			warn!(atoms, max = config.max_table_atoms, "skipping truth-table check");
		}
	}

	let proof = prove(&formula, config)?;
	Ok(render(&proof, notation))
}
