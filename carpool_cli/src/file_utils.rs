use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use carpool_results::{json::read_proposals, proposal::proposal::Proposal};

/// JSON files of a folder and its subfolders, sorted.
pub fn read_folder(folder_path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        } else if path.is_dir() {
            files.extend(read_folder(&path)?);
        }
    }

    files.sort();

    Ok(files)
}

/// Loads the proposal snapshots of a file, or of every JSON file of a folder.
pub fn load_proposals(input: &Path) -> anyhow::Result<Vec<Proposal>> {
    let paths = if input.is_file() {
        vec![input.to_path_buf()]
    } else {
        read_folder(input).with_context(|| format!("Cannot read folder {}", input.display()))?
    };

    let mut proposals = Vec::new();
    for path in paths {
        let file =
            File::open(&path).with_context(|| format!("Cannot open {}", path.display()))?;
        let parsed = read_proposals(BufReader::new(file))
            .with_context(|| format!("Invalid proposal snapshot in {}", path.display()))?;
        proposals.extend(parsed);
    }

    Ok(proposals)
}
