//! Init command implementation

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use sanitree_core::{CONFIG_FILE_NAME, SanitizerConfig};
use tracing::info;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_starter_config(&config_path, force)?;
    info!("Created {}", config_path.display());
    Ok(())
}

/// Writes the starter configuration to `path`.
///
/// Symlinks are never followed. With `force`, an existing file is removed
/// and creation is retried until it wins.
fn write_starter_config(path: &Path, force: bool) -> Result<()> {
    let mut content = SanitizerConfig::starter().to_json_pretty().into_diagnostic()?;
    content.push('\n');

    loop {
        match create_exclusive(path) {
            Ok(mut file) => return file.write_all(content.as_bytes()).into_diagnostic(),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && force => {
                match std::fs::remove_file(path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(miette::miette!(
                    "Config file already exists. Use --force to overwrite."
                ));
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}

fn create_exclusive(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NOFOLLOW);
    }

    options.open(path)
}
