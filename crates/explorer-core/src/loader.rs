//! Dataset loading and per-record annotation.

use std::fs;
use std::io::Read;
use std::path::Path;

use explorer_model::{Annotations, Dataset, Scope};
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::search::build_haystack;
use crate::topics::TopicRules;

/// Read and annotate the dataset document at `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "dataset read");
    parse_dataset(&text)
}

/// Read and annotate a dataset document from any reader (e.g. stdin).
pub fn load_dataset_from_reader<R: Read>(mut reader: R) -> Result<Dataset> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(LoadError::Stdin)?;
    parse_dataset(&text)
}

/// Parse a dataset document and annotate it with the built-in topic rules.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let mut dataset: Dataset = serde_json::from_str(text)?;
    annotate(&mut dataset, TopicRules::builtin());
    info!(
        session = dataset.session.len(),
        merge_tree = dataset.merge_tree.len(),
        format = dataset.format.len(),
        versions = dataset.versions.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Attach the scope tag, search haystack and inferred topics to every record.
///
/// Derived fields are replaced, never accumulated, so running this twice
/// leaves the dataset unchanged.
pub fn annotate(dataset: &mut Dataset, rules: &TopicRules) {
    for scope in Scope::all() {
        for setting in dataset.scope_mut(*scope) {
            let haystack = build_haystack(&setting.name, &setting.description);
            let inferred_topics = rules.infer(&haystack);
            setting.annotations = Annotations {
                scope: *scope,
                haystack,
                inferred_topics,
            };
        }
    }
}
