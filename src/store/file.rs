use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

use crate::foundation::error::{CardError, CardResult};
use crate::store::backend::{TemplateStore, parse_stored, validate_name};

/// Directory-backed store: one `<name>.json` file per slot.
#[derive(Clone, Debug)]
pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    /// Use `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> CardResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create template dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> CardResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl TemplateStore for FileTemplateStore {
    fn get(&self, name: &str) -> CardResult<Option<Value>> {
        let path = self.path_for(name)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read template '{}'", path.display()))
                    .into());
            }
        };
        Ok(Some(parse_stored(name, &text)))
    }

    fn put(&mut self, name: &str, value: &Value) -> CardResult<()> {
        let path = self.path_for(name)?;
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| CardError::serde(format!("template '{name}': {e}")))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes)
            .with_context(|| format!("write template '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("replace template '{}'", path.display()))?;
        Ok(())
    }

    fn names(&self) -> CardResult<Vec<String>> {
        let rd = std::fs::read_dir(&self.dir)
            .with_context(|| format!("list template dir '{}'", self.dir.display()))?;
        let mut names: Vec<String> = rd
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    return None;
                }
                let stem = path.file_stem()?.to_str()?.to_string();
                validate_name(&stem).ok().map(|_| stem)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/file.rs"]
mod tests;
