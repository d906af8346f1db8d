use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read a JSON array from `path`, or from stdin when `path` is `-`.
pub fn read_json_array<T>(path: &Path) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let items: Vec<T> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of the expected shape", path.display()))?;
    tracing::debug!(path = %path.display(), items = items.len(), "read input batch");
    Ok(items)
}
