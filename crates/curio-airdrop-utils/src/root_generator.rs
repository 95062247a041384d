use std::{
    fs::File,
    path::PathBuf,
};

use curio_allowlist::{
    Allowlist,
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

    /// Also write a JSON root document to this path
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

/// The JSON document handed to the collaborator publishing the root
/// on-chain.
#[derive(Debug, Deserialize, Serialize)]
pub struct RootDocument {
    pub root: Root,
    pub address_count: usize,
}

/// Builds the allowlist tree and prints its root.
///
/// # Errors
///
/// Returns an error if the allowlist file cannot be read or contains a
/// malformed address, if the list is empty, or if the root document cannot
/// be written.
pub fn run(
    Args {
        allowlist,
        output,
    }: Args,
) -> Result<()> {
    let addresses = allowlist_file::load(&allowlist)?;
    let allowlist = Allowlist::new(addresses).wrap_err("failed to build allowlist")?;
    let document = RootDocument {
        root: allowlist.root(),
        address_count: allowlist.address_count(),
    };
    tracing::info!(address_count = document.address_count, "built allowlist tree");

    println!("{}", document.root);

    if let Some(output) = output {
        let file = File::create(&output)
            .wrap_err_with(|| format!("failed to create root document `{}`", output.display()))?;
        serde_json::to_writer_pretty(file, &document).wrap_err("failed to write root document")?;
        tracing::info!(path = %output.display(), "wrote root document");
    }
    Ok(())
}
