//! JSON output: one `<key>.json` file per summary, four-space indented.

use crate::summary::ExecutionSummaries;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// Serialize with four-space indentation.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> crate::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

impl ExecutionSummaries {
    /// Create `dir` if needed and write the three summary files into it.
    /// Returns the written paths.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> crate::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;

        let mut written = Vec::new();
        for (key, value) in self.files()? {
            let path = dir.join(format!("{}.json", key));
            fs::write(&path, to_pretty_json(&value)?)
                .with_context(|| format!("write {}", path.display()))?;
            log::debug!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}
