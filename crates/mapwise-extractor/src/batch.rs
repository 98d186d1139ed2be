//! File and batch entry points

use crate::engine::MappingEngine;
use crate::error::ExtractorError;
use crate::types::ExtractionResult;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

impl MappingEngine {
    /// Read one Java file and extract its mappings
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ExtractorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract(&text, &path.to_string_lossy()))
    }

    /// Extract many files in parallel
    ///
    /// Results come back in input order; a file that cannot be read yields
    /// its own error without affecting the others.
    pub fn extract_files(&self, paths: &[PathBuf]) -> Vec<Result<ExtractionResult, ExtractorError>> {
        paths
            .par_iter()
            .map(|path| {
                let result = self.extract_file(path);
                if let Err(e) = &result {
                    warn!("Skipping file: {}", e);
                }
                result
            })
            .collect()
    }
}
