//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// Path of a fixture file or directory.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The extracted sample delta.
pub fn delta_dir() -> PathBuf {
    fixture("delta")
}

/// Service response pointing at `base_url`.
pub fn service_response(base_url: &str) -> String {
    let path = fixture("service_response.xml");
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
        .replace("{BASE_URL}", base_url)
}

/// Zip the sample delta the way the registry ships it: region
/// directories and metadata files at the archive root.
pub fn delta_zip_bytes() -> Vec<u8> {
    let root = delta_dir();
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
        let entry = entry.unwrap();
        let name = entry
            .path()
            .strip_prefix(&root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/");
        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{name}/"), SimpleFileOptions::default())
                .unwrap();
        } else {
            writer
                .start_file(name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(&fs::read(entry.path()).unwrap()).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

/// Write the zipped sample delta to `path`.
pub fn write_delta_zip(path: &Path) {
    let mut file = File::create(path).unwrap();
    file.write_all(&delta_zip_bytes()).unwrap();
}

fn section(name: &str, rows: &[(&str, &str)]) -> String {
    let rule = "-".repeat(80);
    let mut out = format!("\n{name}\n{rule}\nТип объекта\tНаименование\n");
    for (type_name, record_name) in rows {
        out.push_str(&format!("{type_name}\t\t{record_name}\n"));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn header() -> String {
    format!(
        "Отчёт по добавленным адресным объектам за 2024.02.01\n{}\n",
        "-".repeat(80)
    )
}

fn district() -> String {
    section("Административный район", &[("р-н", "Гиагинский")])
}

fn city() -> String {
    section("Город", &[("г", "Майкоп")])
}

fn settlement() -> String {
    section("Населенный пункт", &[("п", "Внуковское")])
}

fn streets() -> String {
    section(
        "Элемент улично-дорожной сети",
        &[("ул", "Арбат"), ("ул", "Школьная"), ("пер", "Школьная")],
    )
}

fn unknown_level() -> String {
    section("Уровень 99", &[("ул", "Тестовая")])
}

/// Expected report for the sample delta with numeric section order.
pub fn expected_numeric_report() -> String {
    [
        header(),
        district(),
        city(),
        settlement(),
        streets(),
        unknown_level(),
    ]
    .concat()
}

/// Expected report for the sample delta with first-seen section order.
pub fn expected_first_seen_report() -> String {
    [
        header(),
        city(),
        streets(),
        district(),
        settlement(),
        unknown_level(),
    ]
    .concat()
}
