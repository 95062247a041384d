use std::{
    fs,
    path::Path,
};

use curio_allowlist::Address;
use eyre::{
    Result,
    WrapErr,
};

/// Reads an allowlist file: one address per line, blank lines and `#`
/// comments ignored.
pub(crate) fn load(path: &Path) -> Result<Vec<Address>> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read allowlist file `{}`", path.display()))?;
    let mut addresses = Vec::new();
    for (line_index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let address = trimmed.parse::<Address>().wrap_err_with(|| {
            format!(
                "malformed address on line {} of `{}`",
                line_index + 1,
                path.display(),
            )
        })?;
        addresses.push(address);
    }
    tracing::debug!(count = addresses.len(), "loaded allowlist addresses");
    Ok(addresses)
}
