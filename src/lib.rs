//! Natural-deduction prover for propositional logic.
//!
//! Formulas over atoms and `¬ ∧ ∨ →` are parsed, a derivation is searched
//! for backwards from the goal, and the resulting tree is rendered either as
//! an indented plain-text tree or as `bussproofs` TeX.
//!
//! ```
//! use natded::{exec, Notation, ProverConfig};
//!
//! let tree = exec("A and B to B and A", Notation::Plain, &ProverConfig::default()).unwrap();
//! assert!(tree.starts_with("A ∧ B → B ∧ A : 1\n"));
//! ```
//!
//! The search is best effort: it has no rule for negation, so classically
//! valid formulas such as `not not A to A` are reported as unproved.

pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod lexer;
pub mod parser;
pub mod proof_tree;
pub mod prop_tree;
pub mod prover;
pub mod render;
pub mod validity;

pub use config::ProverConfig;
pub use context::{Assumption, ProofContext};
pub use error::{CheckError, ExecError, ParseError, ParseErrorKind, ProveError, SearchLimit};
pub use exec::exec;
pub use parser::parse;
pub use proof_tree::{ProofNode, Rule};
pub use prop_tree::Formula;
pub use prover::prove;
pub use render::{render, Notation};
