use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Objects which the library can describe in human-readable form.
pub trait Dump {
    /// Returns the library's description of this object.
    fn dump_to_string(&self) -> Result<String>;

    fn dump_stdout(&self) -> Result<()> {
        let dump = self.dump_to_string()?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(dump.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Writes the description to a new file at `path`.
    /// An existing file is never overwritten.
    fn dump<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            return Err(Error::PathExists(path.to_path_buf()));
        }
        let dump = self.dump_to_string()?;
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => Error::PathExists(path.to_path_buf()),
                _ => Error::Io(e),
            })?;
        file.write_all(dump.as_bytes())?;
        Ok(())
    }
}

/// Formats the description of a [Dump] object.
///
/// Formatting never fails: when the description cannot be produced, the
/// output is a `<dump failed: ...>` placeholder naming the error.
pub struct DumpDisplay<'a, D>(pub &'a D);

impl<D: Dump> std::fmt::Display for DumpDisplay<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.0.dump_to_string() {
            Ok(dump) => write!(f, "{dump}"),
            Err(e) => write!(f, "<dump failed: {e}>"),
        }
    }
}

/// Implements [Dump] with a native `*_dump_str` function, and renders
/// the dump for [Display](std::fmt::Display) through [DumpDisplay].
macro_rules! impl_dump {
    ($ty:ty, $dump_str:path, $operation:literal) => {
        impl $crate::dump::Dump for $ty {
            fn dump_to_string(&self) -> $crate::error::Result<String> {
                let mut out = std::ptr::null_mut();
                self.context.capi_call($operation, |ctx| unsafe {
                    $dump_str(ctx, self.capi(), &mut out)
                })?;
                $crate::string::NativeString::from_raw(out).contents()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", $crate::dump::DumpDisplay(self))
            }
        }
    };
}
