use clap::{
    Parser,
    Subcommand,
};

use super::{
    proof_generator,
    proof_verifier,
    root_generator,
};

/// Utilities for operating the curio airdrop allowlist
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive the merkle root to publish on-chain from an allowlist file
    #[command(arg_required_else_help = true)]
    GenerateRoot(root_generator::Args),

    /// Generate a claimant's membership proof from an allowlist file
    #[command(arg_required_else_help = true)]
    GenerateProof(proof_generator::Args),

    /// Check a claim document against a published root
    #[command(arg_required_else_help = true)]
    VerifyProof(proof_verifier::Args),
}

#[must_use]
pub fn get() -> Command {
    Cli::parse().command
}
