use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{CuratorError, Result};

/// Read a payload from `path`, or from stdin when the path is `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|source| CuratorError::Read {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fixture() {
        let text = read_text(Path::new("tests/fixtures/busqueda_rust.txt")).unwrap();
        assert!(text.contains("ARTÍCULO 1:"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_text(Path::new("tests/fixtures/no_existe.txt")).unwrap_err();
        assert!(matches!(err, CuratorError::Read { .. }));
        assert!(err.to_string().contains("no_existe.txt"));
    }
}
