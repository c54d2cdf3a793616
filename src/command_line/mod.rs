//! Command-line layer of the solver binary.
pub(crate) mod cli;
