use std::ffi::c_char;
use std::sync::Arc;

use tiledb_common::filesystem::Filesystem;
use tiledb_common::rc::ReturnCode;
use tiledb_sys::*;

use crate::config::Config;
use crate::error::{Error, NativeError, Result};
use crate::handle::{RawConfig, RawContext};
use crate::string::{copy_cstr, cstring};

/// Tags which identify this binding to the library.
fn default_tags() -> [(&'static str, String); 3] {
    [
        ("x-tiledb-api-language", "rust".to_owned()),
        (
            "x-tiledb-api-language-version",
            env!("CARGO_PKG_VERSION").to_owned(),
        ),
        (
            "x-tiledb-api-sys-platform",
            format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        ),
    ]
}

/// Owns the native context through which every other object is created.
///
/// Cloning a `Context` shares the native context. Every object created
/// from a context holds a clone of it, so the native context is released
/// only after the last such object.
#[derive(Clone)]
pub struct Context {
    raw: Arc<RawContext>,
}

impl Context {
    /// Returns a context using the default configuration.
    pub fn new() -> Result<Self> {
        Self::alloc(std::ptr::null_mut())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::alloc(config.capi())
    }

    /// Returns a context configured by `entries` applied over the defaults.
    pub fn from_map<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_config(&Config::from_map(entries)?)
    }

    fn alloc(config: *mut tiledb_config_t) -> Result<Self> {
        let mut ffi = std::ptr::null_mut();
        let rc = ReturnCode::from(unsafe { tiledb_ctx_alloc(config, &mut ffi) });
        if !rc.is_ok() {
            tracing::debug!(?rc, "Failed to allocate context");
            return Err(Error::from_return_code("allocating context", rc, None));
        }
        let context = Context {
            raw: Arc::new(RawContext::owned(ffi)),
        };
        context.set_tags(default_tags())?;
        Ok(context)
    }

    pub(crate) fn capi(&self) -> *mut tiledb_ctx_t {
        self.raw.capi()
    }

    /// Invokes a native function with this context, translating a failed
    /// return code into an [Error] described by `operation` and the
    /// context's last error message.
    pub fn capi_call<F>(&self, operation: &str, f: F) -> Result<()>
    where
        F: FnOnce(*mut tiledb_ctx_t) -> capi_return_t,
    {
        let rc = ReturnCode::from(f(self.capi()));
        if rc.is_ok() {
            return Ok(());
        }
        let message = if rc.has_context_error() {
            self.last_error().ok().flatten()
        } else {
            None
        };
        tracing::debug!(operation, ?rc, ?message, "Native call failed");
        Err(Error::from_return_code(operation, rc, message))
    }

    /// Invokes a native allocation function with this context and returns
    /// the handle it produces.
    pub(crate) fn alloc_handle<T, F>(&self, operation: &str, f: F) -> Result<*mut T>
    where
        F: FnOnce(*mut tiledb_ctx_t, *mut *mut T) -> capi_return_t,
    {
        let mut ffi = std::ptr::null_mut();
        self.capi_call(operation, |ctx| f(ctx, &mut ffi))?;
        if ffi.is_null() {
            return Err(Error::Native {
                operation: operation.to_owned(),
                message: "library returned a NULL handle".to_owned(),
            });
        }
        Ok(ffi)
    }

    /// Returns the message of the last error raised with this context.
    pub fn last_error(&self) -> Result<Option<String>> {
        let mut err = std::ptr::null_mut();
        let rc = ReturnCode::from(unsafe { tiledb_ctx_get_last_error(self.capi(), &mut err) });
        if !rc.is_ok() {
            return Err(Error::from_return_code("getting last error", rc, None));
        }
        NativeError::from_raw(err).map(|e| e.message()).transpose()
    }

    pub fn set_tag(&self, key: &str, value: &str) -> Result<()> {
        let c_key = cstring(key)?;
        let c_value = cstring(value)?;
        self.capi_call(&format!("setting context tag '{key}'"), |ctx| unsafe {
            tiledb_ctx_set_tag(ctx, c_key.as_ptr(), c_value.as_ptr())
        })
    }

    /// Sets each of `tags` in order, stopping at the first failure.
    pub fn set_tags<I, K, V>(&self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        tags.into_iter()
            .try_for_each(|(key, value)| self.set_tag(key.as_ref(), value.as_ref()))
    }

    /// Returns a copy of the configuration in effect for this context.
    pub fn config(&self) -> Result<Config> {
        let ffi = self.alloc_handle("getting context config", |ctx, config| unsafe {
            tiledb_ctx_get_config(ctx, config)
        })?;
        Ok(Config::from_raw(RawConfig::owned(ffi)))
    }

    pub fn is_supported_fs(&self, fs: Filesystem) -> Result<bool> {
        let mut supported: i32 = 0;
        self.capi_call(&format!("checking support for filesystem {fs}"), |ctx| unsafe {
            tiledb_ctx_is_supported_fs(ctx, fs.into(), &mut supported)
        })?;
        Ok(supported != 0)
    }

    /// Requests cancellation of the background tasks of this context.
    pub fn cancel_tasks(&self) -> Result<()> {
        self.capi_call("cancelling context tasks", |ctx| unsafe { tiledb_ctx_cancel_tasks(ctx) })
    }

    /// Returns the statistics gathered by this context as JSON.
    pub fn stats(&self) -> Result<String> {
        let mut json: *mut c_char = std::ptr::null_mut();
        self.capi_call("getting context stats", |ctx| unsafe {
            tiledb_ctx_get_stats(ctx, &mut json)
        })?;
        if json.is_null() {
            return Ok("{}".to_owned());
        }
        let stats = unsafe { copy_cstr(json) };
        let _ = unsafe { tiledb_stats_free_str(&mut json) };
        let stats = stats?;
        if stats.is_empty() {
            Ok("{}".to_owned())
        } else {
            Ok(stats)
        }
    }
}

/// Returns the `(major, minor, patch)` version of the linked library.
pub fn version() -> (i32, i32, i32) {
    let (mut major, mut minor, mut patch) = (0, 0, 0);
    unsafe { tiledb_version(&mut major, &mut minor, &mut patch) };
    (major, minor, patch)
}
