use std::{
    fs::File,
    path::PathBuf,
};

use curio_allowlist::{
    Address,
    Allowlist,
    MembershipProof,
    Root,
};
use eyre::{
    Result,
    WrapErr,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::allowlist_file;

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Path to the allowlist file, one address per line
    #[arg(long, value_name = "PATH")]
    allowlist: PathBuf,

    /// The claimant address to prove membership for
    #[arg(long, value_name = "ADDRESS")]
    address: String,

    /// Write the claim document to this path instead of stdout
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// The JSON document a claimant submits alongside the on-chain claim call.
///
/// The embedded root is the one the proof was generated against; the
/// verifier should prefer the root actually stored on-chain.
#[derive(Debug, Deserialize, Serialize)]
pub struct ClaimDocument {
    pub address: Address,
    pub root: Root,
    pub proof: MembershipProof,
}

/// Builds the allowlist tree and generates the claimant's membership proof.
///
/// # Errors
///
/// Returns an error if the claimant address is malformed, if the allowlist
/// cannot be loaded or built, or if the claimant is not in the allowlist
/// (ineligible for the airdrop).
pub fn run(
    Args {
        allowlist,
        address,
        output,
    }: Args,
) -> Result<()> {
    let address: Address = address
        .parse()
        .wrap_err("failed to parse claimant address")?;
    let addresses = allowlist_file::load(&allowlist)?;
    let allowlist = Allowlist::new(addresses).wrap_err("failed to build allowlist")?;
    let proof = allowlist
        .proof_of_membership(&address)
        .wrap_err("claimant is not eligible for this airdrop")?;
    let document = ClaimDocument {
        address,
        root: allowlist.root(),
        proof,
    };

    match output {
        Some(path) => {
            let file = File::create(&path).wrap_err_with(|| {
                format!("failed to create claim document `{}`", path.display())
            })?;
            serde_json::to_writer_pretty(file, &document)
                .wrap_err("failed to write claim document")?;
            println!("wrote claim document to `{}`", path.display());
        }
        None => println!(
            "{}",
            serde_json::to_string_pretty(&document)
                .wrap_err("failed to json-encode claim document")?
        ),
    }
    Ok(())
}
