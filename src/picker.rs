// src/picker.rs
//! Interactive selection of a `*.txt` GPS log

use crate::error::{Result, TrackerError};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// `*.txt` files in `dir`, sorted by name
pub fn list_log_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| TrackerError::FileAccess {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_log_file(path))
        .collect();
    files.sort();
    Ok(files)
}

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"))
}

/// Ask the user to pick one of the logs in `dir`.
///
/// Returns `None` when there is nothing to pick or the answer is empty.
pub fn pick_log_file<R: BufRead, W: Write>(
    dir: &Path,
    mut input: R,
    mut output: W,
) -> Result<Option<PathBuf>> {
    let files = list_log_files(dir)?;
    if files.is_empty() {
        writeln!(output, "No GPS log files (*.txt) found in {}", dir.display())?;
        return Ok(None);
    }

    writeln!(output, "Please select a GPS Log file...")?;
    for (i, file) in files.iter().enumerate() {
        let name = file.file_name().map_or_else(
            || file.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        writeln!(output, "  {:>3}) {}", i + 1, name)?;
    }

    loop {
        write!(output, "Log number (empty to cancel): ")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => return Ok(Some(files[n - 1].clone())),
            _ => writeln!(output, "Please enter a number between 1 and {}", files.len())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn log_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hdop-picker-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for file in ["b_flight.txt", "a_flight.TXT", "notes.md"] {
            std::fs::write(dir.join(file), "").unwrap();
        }
        dir
    }

    #[test]
    fn test_list_only_txt_files() {
        let dir = log_dir("list");
        let files = list_log_files(&dir).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_flight.TXT", "b_flight.txt"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_pick_by_number() {
        let dir = log_dir("pick");
        let mut output = Vec::new();
        let picked = pick_log_file(&dir, Cursor::new("7\n2\n"), &mut output).unwrap();

        assert_eq!(picked, Some(dir.join("b_flight.txt")));
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("between 1 and 2"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_answer_cancels() {
        let dir = log_dir("cancel");
        let picked = pick_log_file(&dir, Cursor::new("\n"), Vec::new()).unwrap();
        assert_eq!(picked, None);

        let picked = pick_log_file(&dir, Cursor::new(""), Vec::new()).unwrap();
        assert_eq!(picked, None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory() {
        let result = list_log_files(Path::new("/definitely/not/a/dir"));
        assert!(matches!(result, Err(TrackerError::FileAccess { .. })));
    }
}
