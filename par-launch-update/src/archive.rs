//! ZIP extraction for downloaded package archives.

use crate::error::UpdateError;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Extract the full contents of a ZIP archive into a destination directory.
///
/// Entry names are resolved through `enclosed_name`, so entries that would
/// escape the destination (absolute paths, `..` components) are skipped.
/// Parent directories are created as needed; on Unix, recorded file modes
/// are restored so extracted executables stay runnable.
///
/// # Errors
///
/// Fails loudly on a corrupt or unreadable archive rather than silently
/// leaving a partial extraction behind: the first bad entry aborts with
/// [`UpdateError::Archive`], and the caller treats the whole install as
/// failed.
pub fn extract_all(archive_path: &Path, destination: &Path) -> Result<(), UpdateError> {
    let archive_err = |e: ZipError| UpdateError::Archive {
        path: archive_path.to_path_buf(),
        source: e,
    };

    let file = File::open(archive_path).map_err(|e| UpdateError::filesystem(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(archive_err)?;

    log::info!(
        "Extracting {} ({} entries) to {}",
        archive_path.display(),
        archive.len(),
        destination.display()
    );

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_err)?;

        let outpath = match entry.enclosed_name() {
            Some(path) => path.to_owned(),
            None => continue,
        };

        if outpath.as_os_str().is_empty() {
            continue;
        }

        let final_path = destination.join(&outpath);

        if entry.is_dir() {
            std::fs::create_dir_all(&final_path)
                .map_err(|e| UpdateError::filesystem(&final_path, e))?;
            continue;
        }

        // Create parent directories if needed
        if let Some(parent) = final_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| UpdateError::filesystem(parent, e))?;
        }

        // Extract file. A read failure here means the entry's compressed
        // data is bad, so report it as an archive error.
        let mut outfile =
            File::create(&final_path).map_err(|e| UpdateError::filesystem(&final_path, e))?;
        std::io::copy(&mut entry, &mut outfile).map_err(|e| archive_err(ZipError::Io(e)))?;

        // Restore executable permission on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&final_path, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| UpdateError::filesystem(&final_path, e))?;
            }
        }
    }

    Ok(())
}
