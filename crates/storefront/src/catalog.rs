//! Loading the catalog from an inventory file.

use std::path::{Path, PathBuf};

use kassa_core::{Catalog, CatalogError};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading the inventory file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid inventory document.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

/// Read, parse and normalize an inventory file.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or is not JSON.
/// Unusable product records are dropped, not reported.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_inventory_json(&text).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        products = catalog.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_catalog() {
        let file = write_temp(
            r#"{"items": [{"id": 1, "name": "Lamp", "price": 100}, {"name": "No id"}]}"#,
        );
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/kassa/inventory.json")).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Read { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_temp("{ not json");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse"));
    }
}
