//! Where the slit scan is read from and written to.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::Error;

/// Output file name used when none is given, placed next to the input.
pub const DEFAULT_OUTFILE: &str = "slitscan.png";

/// Makes `path` absolute against the current directory and folds away `.`
/// and `..` components without touching the filesystem.
pub fn absolute<P: AsRef<Path>>(path: P) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&env::current_dir()?.join(path)))
    }
}

/// Resolves the output path for `input`, which must already be absolute.
///
/// Relative output paths are taken relative to the input's directory. The
/// result has to name a `.png` file.
pub fn resolve_output(input: &Path, outfile: Option<&Path>) -> Result<PathBuf, Error> {
    let dir = input.parent().unwrap_or(input);
    let outfile = outfile.unwrap_or_else(|| Path::new(DEFAULT_OUTFILE));
    let resolved = normalize(&dir.join(outfile));

    if !resolved
        .to_string_lossy()
        .to_ascii_lowercase()
        .ends_with(".png")
    {
        return Err(Error::InvalidArgument(format!(
            "invalid output file path {}",
            resolved.display()
        )));
    }

    Ok(resolved)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}
