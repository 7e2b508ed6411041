//! Level metadata (`AS_OBJECT_LEVELS`) parsing.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Document;

use crate::error::{DeltaError, Result, XmlFileError};
use crate::files::{matching_files, FilePattern};
use crate::types::LevelNameMap;
use crate::xml::{elements_named, required_int_attribute, strip_bom, text_attribute};

const OBJECT_LEVEL: &str = "OBJECTLEVEL";

/// Build the level → name map from an `AS_OBJECT_LEVELS` document.
///
/// A later `OBJECTLEVEL` with the same `LEVEL` replaces an earlier one.
pub fn parse_object_levels(xml: &str) -> std::result::Result<LevelNameMap, XmlFileError> {
    let doc = Document::parse(strip_bom(xml))?;
    let mut names = LevelNameMap::new();

    for node in elements_named(&doc, OBJECT_LEVEL) {
        let level = required_int_attribute(node, OBJECT_LEVEL, "LEVEL")?;
        names.insert(level, text_attribute(node, "NAME"));
    }

    Ok(names)
}

/// Find the single level metadata file directly in `root`.
///
/// Zero matches and more than one match are both errors.
pub fn find_level_file(root: &Path, pattern: &FilePattern) -> Result<PathBuf> {
    let mut matches = matching_files(root, pattern)?;
    match matches.len() {
        0 => Err(DeltaError::LevelFileNotFound {
            dir: root.to_path_buf(),
            pattern: pattern.as_str().to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(DeltaError::AmbiguousLevelFile {
            pattern: pattern.as_str().to_string(),
            matches,
        }),
    }
}

/// Locate and parse the level metadata file in `root`.
pub fn load_level_names(root: &Path, pattern: &FilePattern) -> Result<LevelNameMap> {
    let path = find_level_file(root, pattern)?;

    let names = fs::read_to_string(&path)
        .map_err(XmlFileError::from)
        .and_then(|xml| parse_object_levels(&xml))
        .map_err(|source| DeltaError::LevelParse {
            path: path.clone(),
            source,
        })?;

    tracing::info!(file = %path.display(), levels = names.len(), "Loaded level names");
    Ok(names)
}
