//! Flat CSV stores.
//!
//! Every store reads its whole file into memory and writes the whole file
//! back; only the rejection log is appended to in place.

pub mod medicines;
pub mod rejections;
pub mod users;

pub use medicines::MedicineStore;
pub use rejections::RejectionLog;
pub use users::UserStore;

use crate::error::MedcheckError;
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Mode for store files created from scratch: owner read/write, others read.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Create `path` holding only `header` if it does not exist yet.
///
/// Returns true if the file was created.
pub(crate) fn ensure_file(path: &Path, header: &[&str]) -> Result<bool, MedcheckError> {
    if path.exists() {
        return Ok(false);
    }
    replace_file(path, header, std::iter::empty::<Vec<&str>>())?;
    info!(path = %path.display(), "created store file");
    Ok(true)
}

/// Open `path` for reading, or `None` if it does not exist.
pub(crate) fn open_existing(path: &Path) -> Result<Option<File>, MedcheckError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Atomically replace `path` with a header row followed by `rows`.
///
/// The table is written to a temporary file in the same directory and then
/// renamed over the target, so readers never see a half-written store. An
/// existing file keeps its permissions; a new one gets `0644` on unix.
pub(crate) fn replace_file<I, R, T>(path: &Path, header: &[&str], rows: I) -> Result<(), MedcheckError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmpfile = NamedTempFile::new_in(dir)?;

    {
        let mut writer = csv::Writer::from_writer(tmpfile.as_file_mut());
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }

    // Temp files are created 0600
    match std::fs::metadata(path) {
        Ok(meta) => tmpfile.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => set_new_file_mode(tmpfile.as_file())?,
        Err(e) => return Err(e.into()),
    }

    tmpfile.persist(path).map_err(|e| MedcheckError::Io(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_mode(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn set_new_file_mode(_file: &File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const HEADER: &[&str] = &["a", "b"];

    fn mode(path: &Path) -> u32 {
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_new_file_is_world_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.csv");
        assert!(ensure_file(&path, HEADER).unwrap());
        assert_eq!(mode(&path), 0o644);
    }

    #[test]
    fn test_replace_keeps_existing_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.csv");
        ensure_file(&path, HEADER).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        replace_file(&path, HEADER, [["1", "2"]]).unwrap();

        assert_eq!(mode(&path), 0o640);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
    }
}
