use std::{
    fs,
    io::{Seek, Write},
    path::{Path, PathBuf},
};

use embedded_io::ErrorType;
use log::{debug, info};

use crate::error::{PackError, Result};

/// Regular files in `dir` with the given extension, in file name order.
pub fn list_frames(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    info!("Looking for *.{} frames in {:?}", extension, dir);
    let list_error = |source| PackError::ListFrames {
        dir: dir.to_path_buf(),
        source,
    };

    let mut frames = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        // follows symlinks
        if matches && path.is_file() {
            frames.push(path);
        }
    }
    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if frames.is_empty() {
        return Err(PackError::NoFrames {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    debug!("Found {} frames, first {:?}", frames.len(), frames[0]);
    Ok(frames)
}

/// Writes `bytes` to a temporary file next to `path` and renames it into
/// place, so a failed run never leaves a truncated artifact behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let io_error = |source| PackError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(bytes).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    file.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Buffered std file exposed through embedded-io, for the container reader.
pub struct StdFileReader {
    file: std::io::BufReader<std::fs::File>,
    size: usize,
}

impl StdFileReader {
    pub fn open(path: &Path) -> Result<Self> {
        let io_error = |source| PackError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = fs::File::open(path).map_err(io_error)?;
        Self::new(file).map_err(io_error)
    }

    pub fn new(mut file: std::fs::File) -> std::io::Result<Self> {
        let size = file.seek(std::io::SeekFrom::End(0))? as usize;
        file.seek(std::io::SeekFrom::Start(0))?;
        Ok(StdFileReader {
            file: std::io::BufReader::new(file),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl ErrorType for StdFileReader {
    type Error = std::io::Error;
}

impl embedded_io::Read for StdFileReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::io::Read;
        self.file.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_frames_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["frame_0010.pbm", "frame_0002.PBM", "frame_0001.pbm", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pbm")).unwrap();

        let frames = list_frames(dir.path(), "pbm").unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["frame_0001.pbm", "frame_0002.PBM", "frame_0010.pbm"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_frames_follows_symlinks() {
        let source = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        fs::write(source.path().join("real.pbm"), b"").unwrap();
        fs::write(dir.path().join("frame_0001.pbm"), b"").unwrap();
        std::os::unix::fs::symlink(source.path().join("real.pbm"), dir.path().join("frame_0002.pbm")).unwrap();
        // dangling links are not frames
        std::os::unix::fs::symlink(source.path().join("gone.pbm"), dir.path().join("frame_0003.pbm")).unwrap();

        let frames = list_frames(dir.path(), "pbm").unwrap();
        let names: Vec<_> = frames
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["frame_0001.pbm", "frame_0002.pbm"]);
    }

    #[test]
    fn test_list_frames_empty_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_frames(dir.path(), "pbm"),
            Err(PackError::NoFrames { .. })
        ));
        assert!(matches!(
            list_frames(&dir.path().join("missing"), "pbm"),
            Err(PackError::ListFrames { .. })
        ));
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rle");
        fs::write(&path, b"old contents").unwrap();
        write_atomic(&path, &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), [1, 2, 3]);
        // only the artifact is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_reader_through_embedded_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, [2, 0, 8, 0]).unwrap();
        let mut reader = StdFileReader::open(&path).unwrap();
        assert_eq!(reader.size(), 4);
        let mut buf = [0u8; 4];
        embedded_io::Read::read_exact(&mut reader, &mut buf).unwrap();
        assert_eq!(buf, [2, 0, 8, 0]);
    }
}
