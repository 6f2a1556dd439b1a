//! Local puzzle input store

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based store for puzzle inputs
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Get the input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Read { path, source },
        })
    }

    /// Store an input, creating the directory if needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<PathBuf, InputError> {
        let path = self.input_path(year, day);
        fs::create_dir_all(&self.input_dir)
            .and_then(|_| fs::write(&path, input))
            .map_err(|source| InputError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(store.input_path(2023, 1), PathBuf::from("inputs/2023_day01.txt"));
        assert_eq!(store.input_path(2023, 25), PathBuf::from("inputs/2023_day25.txt"));
    }

    #[test]
    fn test_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().join("nested"));

        assert!(!store.contains(2023, 12));
        assert!(matches!(store.get(2023, 12), Err(InputError::Missing(_))));

        let input = "???.### 1,1,3\n";
        let path = store.put(2023, 12, input).unwrap();
        assert_eq!(path, temp.path().join("nested").join("2023_day12.txt"));

        assert!(store.contains(2023, 12));
        assert_eq!(store.get(2023, 12).unwrap(), input);
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());
        fs::create_dir(store.input_path(2023, 10)).unwrap();

        assert!(!store.contains(2023, 10));
        assert!(matches!(store.get(2023, 10), Err(InputError::Read { .. })));
    }
}
