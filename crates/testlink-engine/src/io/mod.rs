use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a whole file as UTF-8 text
pub fn read_file(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => IoError::NotFound(path.to_path_buf()),
        _ => IoError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Replace the content of a file.
///
/// The immediate parent directory is created when missing, as happens after
/// the build output has been wiped. Deeper missing ancestors are an error.
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    let io_err = |source| IoError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        match fs::create_dir(parent) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(io_err(e)),
        }
    }

    fs::write(path, content).map_err(io_err)
}
