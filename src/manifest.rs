//! Manifest file output.
//!
//! Stage 3 of the manifest pipeline. The manifest is a plain UTF-8 text file,
//! one URL per line, each line terminated by `\n`. There is no header and no
//! trailing metadata; the file is replaced wholesale on every run.
//!
//! ```text
//! https://cdn.example/Brochures/cover.png?v=20250101120000
//! https://cdn.example/Brochures/sub/img.webp?v=20250101120000
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILENAME: &str = "manifest.txt";

/// Write `lines` to `<destination>/manifest.txt`, creating the directory if
/// needed and truncating any previous manifest.
///
/// Each line is trimmed before writing. Returns the absolute path of the
/// written file.
pub fn write_manifest<S: AsRef<str>>(destination: &Path, lines: &[S]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(destination)?;
    let path = destination.join(MANIFEST_FILENAME);

    let mut out = BufWriter::new(File::create(&path)?);
    for line in lines {
        writeln!(out, "{}", line.as_ref().trim())?;
    }
    out.flush()?;
    drop(out);

    log::debug!("Wrote {} line(s) to {}", lines.len(), path.display());
    path.canonicalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_one_line_per_url() {
        let tmp = TempDir::new().unwrap();
        let lines = ["https://a.example/x.png?v=1", "https://a.example/y.webp?v=1"];

        let path = write_manifest(tmp.path(), &lines).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "https://a.example/x.png?v=1\nhttps://a.example/y.webp?v=1\n"
        );
        assert!(path.is_absolute());
        assert!(path.ends_with(MANIFEST_FILENAME));
    }

    #[test]
    fn lines_are_trimmed() {
        let tmp = TempDir::new().unwrap();
        let lines = vec!["  https://a.example/x.png?v=1 \r\n".to_string()];

        let path = write_manifest(tmp.path(), &lines).unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "https://a.example/x.png?v=1\n"
        );
    }

    #[test]
    fn creates_missing_destination() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("out/nested/deeper");

        let path = write_manifest(&dest, &["https://a.example/x.png?v=1"]).unwrap();
        assert!(path.exists());
        assert_eq!(path, dest.join(MANIFEST_FILENAME).canonicalize().unwrap());
    }

    #[test]
    fn overwrites_previous_manifest() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), &["https://old.example/1", "https://old.example/2"]).unwrap();

        let path = write_manifest(tmp.path(), &["https://new.example/1"]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "https://new.example/1\n");
    }

    #[test]
    fn writing_twice_is_identical() {
        let tmp = TempDir::new().unwrap();
        let lines = ["https://a.example/x.png?v=7", "https://a.example/ü.webp?v=7"];

        let first = fs::read(write_manifest(tmp.path(), &lines).unwrap()).unwrap();
        let second = fs::read(write_manifest(tmp.path(), &lines).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap().lines().count(), 2);
    }

    #[test]
    fn empty_lines_give_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_manifest::<&str>(tmp.path(), &[]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn destination_that_is_a_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a dir").unwrap();

        assert!(write_manifest(&blocker, &["https://a.example/x.png"]).is_err());
    }
}
