use std::fs;
use std::path::Path;

use crate::error::Result;

/// Human-readable names for the output layer, indexed by node position.
///
/// Stored on disk as a single comma-separated line, e.g. `0,1,2,...,9`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelNames {
    names: Vec<String>,
}

impl LabelNames {
    pub fn new(names: Vec<String>) -> LabelNames {
        LabelNames { names }
    }

    /// Names `"0"`, `"1"`, ... for `count` classes.
    pub fn numeric(count: usize) -> LabelNames {
        LabelNames::new((0..count).map(|i| i.to_string()).collect())
    }

    pub fn parse(line: &str) -> LabelNames {
        let line = line.trim();
        if line.is_empty() {
            return LabelNames::default();
        }
        LabelNames::new(line.split(',').map(|name| name.trim().to_owned()).collect())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<LabelNames> {
        let text = fs::read_to_string(path)?;
        let first = text.lines().next().unwrap_or("");
        Ok(LabelNames::parse(first))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_line())?;
        Ok(())
    }

    pub fn to_line(&self) -> String {
        self.names.join(",")
    }

    /// Name for output `index`, or the index itself when no name is known.
    pub fn name(&self, index: usize) -> String {
        self.names.get(index).cloned().unwrap_or_else(|| index.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
