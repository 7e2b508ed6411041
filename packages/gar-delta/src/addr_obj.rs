//! Address-object (`AS_ADDR_OBJ`) file parsing and aggregation.
//!
//! Each region directory of the delta holds an `AS_ADDR_OBJ_*.XML` file with
//! `OBJECT` elements. Only active records of the "added or changed" operation
//! types are kept, grouped by their `LEVEL`.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::{ACTIVE_FLAG, RETAINED_OPERATION_TYPES};
use crate::error::{Result, XmlFileError};
use crate::files::{matching_files, subdirectories, FilePattern};
use crate::types::{AddressRecord, Level, LevelAggregate, ScanSummary, SkippedFile};
use crate::xml::{elements_named, required_int_attribute, strip_bom, text_attribute};

const OBJECT: &str = "OBJECT";

/// Retained records of one address-object document, in document order.
///
/// Attributes are checked lazily: `OPERTYPEID` on every object, `ISACTIVE`
/// only when the operation type qualifies, and `LEVEL` only on retained
/// objects. Any missing or non-integer attribute checked this way fails the
/// whole document.
pub fn parse_addr_obj_document(
    xml: &str,
) -> std::result::Result<Vec<(Level, AddressRecord)>, XmlFileError> {
    let doc = Document::parse(strip_bom(xml))?;
    let mut records = Vec::new();

    for object in elements_named(&doc, OBJECT) {
        if let Some(entry) = retained_record(object)? {
            records.push(entry);
        }
    }

    Ok(records)
}

fn retained_record(
    object: Node<'_, '_>,
) -> std::result::Result<Option<(Level, AddressRecord)>, XmlFileError> {
    let oper_type = required_int_attribute(object, OBJECT, "OPERTYPEID")?;
    if !RETAINED_OPERATION_TYPES.contains(&oper_type) {
        return Ok(None);
    }
    if required_int_attribute(object, OBJECT, "ISACTIVE")? != ACTIVE_FLAG {
        return Ok(None);
    }

    let level = required_int_attribute(object, OBJECT, "LEVEL")?;
    let record = AddressRecord::new(
        text_attribute(object, "TYPENAME"),
        text_attribute(object, "NAME"),
    );
    Ok(Some((level, record)))
}

/// Read and parse a single address-object file.
pub fn parse_addr_obj_file(
    path: &Path,
) -> std::result::Result<Vec<(Level, AddressRecord)>, XmlFileError> {
    let xml = fs::read_to_string(path)?;
    parse_addr_obj_document(&xml)
}

/// Scan the region subdirectories of `root` and merge every matching file
/// into `aggregate`.
///
/// A file that fails to parse contributes nothing: it is logged, recorded in
/// the returned summary and the scan continues. Only failing to list the
/// directories themselves is fatal.
pub fn aggregate_address_objects(
    root: &Path,
    pattern: &FilePattern,
    aggregate: &mut LevelAggregate,
) -> Result<ScanSummary> {
    let mut summary = ScanSummary::default();

    for dir in subdirectories(root)? {
        for file in matching_files(&dir, pattern)? {
            summary.files_scanned += 1;

            match parse_addr_obj_file(&file) {
                Ok(records) => {
                    tracing::debug!(
                        file = %file.display(),
                        records = records.len(),
                        "Parsed address-object file"
                    );
                    summary.files_aggregated += 1;
                    summary.records_retained += records.len();
                    aggregate.extend(records);
                }
                Err(error) => {
                    tracing::warn!(
                        file = %file.display(),
                        error = %error,
                        "Skipping address-object file"
                    );
                    summary.skipped.push(SkippedFile { path: file, error });
                }
            }
        }
    }

    tracing::info!(
        files = summary.files_scanned,
        skipped = summary.skipped.len(),
        records = summary.records_retained,
        levels = aggregate.level_count(),
        "Address objects aggregated"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ADDRESSOBJECTS>
  <OBJECT ID="1" OBJECTID="100" NAME="Садовая" TYPENAME="ул" LEVEL="8" OPERTYPEID="10" ISACTIVE="1" ISACTUAL="1"/>
  <OBJECT ID="2" OBJECTID="101" NAME="Старая" TYPENAME="ул" LEVEL="8" OPERTYPEID="10" ISACTIVE="0" ISACTUAL="0"/>
  <OBJECT ID="3" OBJECTID="102" NAME="Химки" TYPENAME="г" LEVEL="5" OPERTYPEID="43" ISACTIVE="1" ISACTUAL="1"/>
  <OBJECT ID="4" OBJECTID="103" NAME="Удалённая" TYPENAME="ул" LEVEL="8" OPERTYPEID="30" ISACTIVE="1" ISACTUAL="1"/>
  <OBJECT ID="5" OBJECTID="104" NAME="Абрикосовый" TYPENAME="пер" LEVEL="8" OPERTYPEID="61" ISACTIVE="1" ISACTUAL="1"/>
</ADDRESSOBJECTS>"#;

    #[test]
    fn test_parse_filters_operation_type_and_active_flag() {
        let records = parse_addr_obj_document(SAMPLE).unwrap();
        assert_eq!(
            records,
            vec![
                (8, AddressRecord::new("ул", "Садовая")),
                (5, AddressRecord::new("г", "Химки")),
                (8, AddressRecord::new("пер", "Абрикосовый")),
            ]
        );
    }

    #[test]
    fn test_parse_checks_attributes_lazily() {
        // Not a retained operation type, so ISACTIVE and LEVEL are never read.
        let xml = r#"<ADDRESSOBJECTS><OBJECT OPERTYPEID="20" NAME="x"/></ADDRESSOBJECTS>"#;
        assert!(parse_addr_obj_document(xml).unwrap().is_empty());

        // Inactive, so LEVEL is never read.
        let xml = r#"<ADDRESSOBJECTS><OBJECT OPERTYPEID="10" ISACTIVE="0"/></ADDRESSOBJECTS>"#;
        assert!(parse_addr_obj_document(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_level_fails_file() {
        let xml = r#"<ADDRESSOBJECTS>
            <OBJECT OPERTYPEID="10" ISACTIVE="1" LEVEL="8" TYPENAME="ул" NAME="a"/>
            <OBJECT OPERTYPEID="10" ISACTIVE="1" TYPENAME="ул" NAME="b"/>
        </ADDRESSOBJECTS>"#;
        let err = parse_addr_obj_document(xml).unwrap_err();
        assert!(matches!(
            err,
            XmlFileError::MissingAttribute {
                attribute: "LEVEL",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_missing_names_are_empty() {
        let xml = r#"<ADDRESSOBJECTS><OBJECT OPERTYPEID="10" ISACTIVE="1" LEVEL="7"/></ADDRESSOBJECTS>"#;
        let records = parse_addr_obj_document(xml).unwrap();
        assert_eq!(records, vec![(7, AddressRecord::new("", ""))]);
    }

    #[test]
    fn test_parse_name_with_comma_is_kept_whole() {
        let xml = r#"<ADDRESSOBJECTS><OBJECT OPERTYPEID="10" ISACTIVE="1" LEVEL="8" TYPENAME="ул" NAME="Мира, 2-я"/></ADDRESSOBJECTS>"#;
        let records = parse_addr_obj_document(xml).unwrap();
        assert_eq!(records[0].1.name, "Мира, 2-я");
    }

    #[test]
    fn test_parse_malformed_xml() {
        let err = parse_addr_obj_document("<ADDRESSOBJECTS><OBJECT").unwrap_err();
        assert!(matches!(err, XmlFileError::Malformed(_)));
    }

    #[test]
    fn test_aggregate_skips_broken_file_and_continues() {
        let root = tempdir().unwrap();
        let region_a = root.path().join("01");
        let region_b = root.path().join("02");
        fs::create_dir_all(&region_a).unwrap();
        fs::create_dir_all(&region_b).unwrap();
        fs::write(region_a.join("AS_ADDR_OBJ_20240202_a.XML"), SAMPLE).unwrap();
        fs::write(region_a.join("AS_ADDR_OBJ_PARAMS_20240202_a.XML"), "<broken").unwrap();
        fs::write(region_b.join("AS_ADDR_OBJ_20240202_b.XML"), "<broken").unwrap();
        // Files at the root are not region files.
        fs::write(root.path().join("AS_ADDR_OBJ_20240202_c.XML"), SAMPLE).unwrap();

        let pattern = FilePattern::new("AS_ADDR_OBJ_2*.xml").unwrap();
        let mut aggregate = LevelAggregate::new();
        let summary = aggregate_address_objects(root.path(), &pattern, &mut aggregate).unwrap();

        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.files_aggregated, 1);
        assert_eq!(summary.records_retained, 3);
        assert_eq!(summary.skipped.len(), 1);
        assert!(summary.skipped[0].path.ends_with("02/AS_ADDR_OBJ_20240202_b.XML"));
        assert_eq!(aggregate.record_count(), 3);
    }

    #[test]
    fn test_aggregate_broken_file_contributes_nothing() {
        let root = tempdir().unwrap();
        let region = root.path().join("03");
        fs::create_dir_all(&region).unwrap();
        // First object is fine, the second breaks the file.
        let xml = r#"<ADDRESSOBJECTS>
            <OBJECT OPERTYPEID="10" ISACTIVE="1" LEVEL="8" TYPENAME="ул" NAME="a"/>
            <OBJECT OPERTYPEID="10" ISACTIVE="1" LEVEL="eight" TYPENAME="ул" NAME="b"/>
        </ADDRESSOBJECTS>"#;
        fs::write(region.join("AS_ADDR_OBJ_2024.XML"), xml).unwrap();

        let pattern = FilePattern::new("AS_ADDR_OBJ_2*.xml").unwrap();
        let mut aggregate = LevelAggregate::new();
        let summary = aggregate_address_objects(root.path(), &pattern, &mut aggregate).unwrap();

        assert_eq!(summary.skipped.len(), 1);
        assert!(aggregate.is_empty());
    }
}
