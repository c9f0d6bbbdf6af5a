//! Combined configuration read by the CLI
//!
//! A JSON file may set any subset of the sections; missing sections and
//! fields keep their defaults.
//!
//! ```json
//! {
//!   "suffix_array": { "case_insensitive": true },
//!   "scan": { "min_length": 3 },
//!   "hash": { "block_size": 32 }
//! }
//! ```

use crate::error::{Error, Result};
use crate::index::duplicates::ScanConfig;
use crate::index::suffix_array::SuffixArrayConfig;
use crate::search::repeats::RepeatOptions;
use crate::utils::rolling_hash::RollingHashConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SarxConfig {
    pub suffix_array: SuffixArrayConfig,
    pub scan: ScanConfig,
    pub hash: RollingHashConfig,
    pub repeats: RepeatOptions,
}

impl SarxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(Error::Precondition(format!(
                "config file {} does not exist",
                path.display()
            ))),
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"suffix_array": {{"case_insensitive": true}}, "scan": {{"min_length": 3}}}}"#
        )
        .unwrap();

        let config = SarxConfig::load(file.path()).unwrap();
        assert!(config.suffix_array.case_insensitive);
        assert_eq!(
            config.suffix_array.parallel_sort_threshold,
            SuffixArrayConfig::default().parallel_sort_threshold
        );
        assert_eq!(config.scan.min_length, 3);
        assert_eq!(config.hash, RollingHashConfig::default());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"bogus": 1}}"#).unwrap();
        assert!(matches!(SarxConfig::load(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(SarxConfig::load_or_default(None).unwrap(), SarxConfig::default());
        assert!(SarxConfig::load_or_default(Some(Path::new("/nonexistent/sarx.json"))).is_err());
    }
}
