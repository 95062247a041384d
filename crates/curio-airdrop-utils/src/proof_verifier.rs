use std::{
    fs,
    path::PathBuf,
};

use curio_allowlist::{
    verify_membership,
    Root,
};
use eyre::{
    bail,
    Result,
    WrapErr,
};

use crate::proof_generator::ClaimDocument;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to a claim document produced by `generate-proof`
    #[arg(long, value_name = "PATH")]
    claim: PathBuf,

    /// Check against this root instead of the one embedded in the claim
    /// document, e.g. the root actually stored on-chain
    #[arg(long, value_name = "HASH")]
    root: Option<String>,
}

/// Verifies a claim document offline, performing the same fold the
/// on-chain verifier does.
///
/// # Errors
///
/// Returns an error if the claim document cannot be read or parsed, if the
/// supplied root is malformed, or if the proof does not verify. The
/// non-zero exit on an invalid proof keeps shell pipelines fail-closed.
pub fn run(
    Args {
        claim,
        root,
    }: Args,
) -> Result<()> {
    let contents = fs::read_to_string(&claim)
        .wrap_err_with(|| format!("failed to read claim document `{}`", claim.display()))?;
    let document: ClaimDocument =
        serde_json::from_str(&contents).wrap_err("failed to parse claim document")?;
    let root = match root {
        Some(root) => root.parse::<Root>().wrap_err("failed to parse root")?,
        None => document.root,
    };

    if verify_membership(&root, &document.address, &document.proof) {
        println!(
            "OK: address {} is in the allowlist committed to by {root}",
            document.address,
        );
        Ok(())
    } else {
        bail!(
            "proof verification failed: the supplied proof does not connect address {} to root \
             {root}",
            document.address,
        );
    }
}
