/// Limits and switches for one proof request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProverConfig {
	/// Maximum nesting of sub-goals. Deeper branches fail and the search
	/// moves on to the next rule.
	pub max_depth: usize,
	/// Maximum number of goals the search may visit before giving up.
	pub max_steps: usize,
	/// Run the truth-table check before searching.
	pub check_validity: bool,
	/// Formulas with more atoms than this skip the truth-table check.
	pub max_table_atoms: usize,
}

impl Default for ProverConfig {
	fn default() -> Self {
		ProverConfig {
			max_depth: 64,
			max_steps: 100_000,
			check_validity: true,
			max_table_atoms: 16,
		}
	}
}
