use crate::index::{parse_search_data, Record, Result, SymbolIndex};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Build the index from a single search-data file or a whole search directory.
/// Directories are read in file-name order so entry order is deterministic
/// across runs.
pub fn load_index(path: &Path) -> Result<SymbolIndex> {
    let t0 = Instant::now();
    let files = collect_data_files(path)?;
    let mut records: Vec<Record> = Vec::new();
    for file in &files {
        let source = std::fs::read_to_string(file)
            .map_err(|e| format!("read {}: {}", file.display(), e))?;
        let mut batch = parse_search_data(&source)
            .map_err(|e| format!("parse {}: {}", file.display(), e))?;
        records.append(&mut batch);
    }
    let record_count = records.len();
    let index = SymbolIndex::from_records(records)?;
    crate::logger::log_debug(&format!(
        "[load] {} file(s), {} record(s), {} entries, {} references in {}ms",
        files.len(),
        record_count,
        index.len(),
        index.reference_count(),
        t0.elapsed().as_millis()
    ));
    Ok(index)
}

fn collect_data_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .map_err(|e| format!("read dir {}: {}", path.display(), e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("js"))
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(format!("no .js search-data files under {}", path.display()).into());
    }
    Ok(files)
}
