use std::path::{Path, PathBuf};

use crate::loader::{DataSource, DEFAULT_RESOURCE};

/// The bundled dataset: [`DEFAULT_RESOURCE`] inside `resource_dir`, or in the
/// working directory when the app has no resource directory.
pub fn bundled_source(resource_dir: Option<&Path>) -> DataSource {
    DataSource::File(default_resource_path(resource_dir))
}

pub fn default_resource_path(resource_dir: Option<&Path>) -> PathBuf {
    match resource_dir {
        Some(dir) => dir.join(DEFAULT_RESOURCE),
        None => PathBuf::from(DEFAULT_RESOURCE),
    }
}
