use curio_airdrop_utils::{
    cli::{
        self,
        Command,
    },
    proof_generator,
    proof_verifier,
    root_generator,
};
use eyre::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    match cli::get() {
        Command::GenerateRoot(args) => root_generator::run(args),
        Command::GenerateProof(args) => proof_generator::run(args),
        Command::VerifyProof(args) => proof_verifier::run(args),
    }
}
