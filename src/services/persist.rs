use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{CoreError, Result};

/// Writes through a sibling temp file and renames it into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    let fail = |e: std::io::Error| CoreError::persistence(path.to_path_buf(), e.to_string());

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(fail)?;
        }
    }

    fs::write(&tmp, bytes).map_err(fail)?;
    fs::rename(&tmp, path).map_err(fail)?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "store".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn tmp_path_is_a_sibling() {
        let p = tmp_path(Path::new("/data/translations.json"));
        assert_eq!(p, PathBuf::from("/data/translations.json.tmp"));
    }
}
