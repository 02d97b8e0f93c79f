use std::ffi::c_char;
use std::path::Path;

use tiledb_sys::*;

use crate::error::{Error, Result, error_out_call};
use crate::handle::{RawConfig, RawConfigIter};
use crate::string::{copy_cstr, cstring, path_cstring};

/// Parameters which govern the behavior of a [Context](crate::Context)
/// and the objects created through it.
pub struct Config {
    raw: RawConfig,
}

impl Config {
    /// Returns a configuration holding the library defaults.
    pub fn new() -> Result<Self> {
        let mut ffi = std::ptr::null_mut();
        error_out_call("allocating config", |err| unsafe {
            tiledb_config_alloc(&mut ffi, err)
        })?;
        Ok(Config {
            raw: RawConfig::owned(ffi),
        })
    }

    /// Returns a configuration with each of `entries` applied over the defaults.
    ///
    /// Errors name the offending key but never its value, since
    /// configuration values are frequently credentials.
    pub fn from_map<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::new()?;
        for (key, value) in entries {
            let key = key.as_ref();
            config.set(key, value.as_ref()).map_err(|_| {
                Error::InvalidArgument(format!("cannot set config parameter '{key}'"))
            })?;
        }
        Ok(config)
    }

    pub(crate) fn from_raw(raw: RawConfig) -> Self {
        Config { raw }
    }

    pub(crate) fn capi(&self) -> *mut tiledb_config_t {
        self.raw.capi()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let c_key = cstring(key)?;
        let c_value = cstring(value)?;
        error_out_call(&format!("setting config parameter '{key}'"), |err| unsafe {
            tiledb_config_set(self.capi(), c_key.as_ptr(), c_value.as_ptr(), err)
        })
    }

    /// Returns the value of `key`, or `None` if it is not set.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let c_key = cstring(key)?;
        let mut value: *const c_char = std::ptr::null();
        error_out_call(&format!("getting config parameter '{key}'"), |err| unsafe {
            tiledb_config_get(self.capi(), c_key.as_ptr(), &mut value, err)
        })?;
        if value.is_null() {
            Ok(None)
        } else {
            Ok(Some(unsafe { copy_cstr(value) }?))
        }
    }

    /// Resets `key` to its default value.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let c_key = cstring(key)?;
        error_out_call(&format!("unsetting config parameter '{key}'"), |err| unsafe {
            tiledb_config_unset(self.capi(), c_key.as_ptr(), err)
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let c_path = path_cstring(path.as_ref())?;
        error_out_call("loading config from file", |err| unsafe {
            tiledb_config_load_from_file(self.capi(), c_path.as_ptr(), err)
        })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let c_path = path_cstring(path.as_ref())?;
        error_out_call("saving config to file", |err| unsafe {
            tiledb_config_save_to_file(self.capi(), c_path.as_ptr(), err)
        })
    }

    /// Returns an iterator over the parameters whose names begin with `prefix`,
    /// or over every parameter if `prefix` is `None`.
    pub fn iter(&self, prefix: Option<&str>) -> Result<ConfigIter<'_>> {
        ConfigIter::new(self, prefix)
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        let mut equal: u8 = 0;
        let rc = unsafe { tiledb_config_compare(self.capi(), other.capi(), &mut equal) };
        rc == TILEDB_OK && equal == 1
    }
}

/// Cursor over the parameters of a [Config].
///
/// As an [Iterator] it yields `(parameter, value)` pairs; the first error
/// ends the iteration.
pub struct ConfigIter<'c> {
    config: &'c Config,
    raw: RawConfigIter,
    failed: bool,
}

fn prefix_cstring(prefix: Option<&str>) -> Result<Option<std::ffi::CString>> {
    prefix.map(cstring).transpose()
}

impl<'c> ConfigIter<'c> {
    pub fn new(config: &'c Config, prefix: Option<&str>) -> Result<Self> {
        let c_prefix = prefix_cstring(prefix)?;
        let prefix_ptr = c_prefix.as_ref().map_or(std::ptr::null(), |p| p.as_ptr());
        let mut ffi = std::ptr::null_mut();
        error_out_call("allocating config iterator", |err| unsafe {
            tiledb_config_iter_alloc(config.capi(), prefix_ptr, &mut ffi, err)
        })?;
        Ok(ConfigIter {
            config,
            raw: RawConfigIter::owned(ffi),
            failed: false,
        })
    }

    /// Returns the parameter and value at the current position.
    pub fn here(&self) -> Result<(String, String)> {
        let mut param: *const c_char = std::ptr::null();
        let mut value: *const c_char = std::ptr::null();
        error_out_call("reading config iterator", |err| unsafe {
            tiledb_config_iter_here(self.raw.capi(), &mut param, &mut value, err)
        })?;
        Ok(unsafe { (copy_cstr(param)?, copy_cstr(value)?) })
    }

    /// Moves to the next parameter.
    pub fn advance(&mut self) -> Result<()> {
        error_out_call("advancing config iterator", |err| unsafe {
            tiledb_config_iter_next(self.raw.capi(), err)
        })
    }

    pub fn done(&self) -> Result<bool> {
        let mut done: i32 = 0;
        error_out_call("checking config iterator", |err| unsafe {
            tiledb_config_iter_done(self.raw.capi(), &mut done, err)
        })?;
        Ok(done == 1)
    }

    /// Restarts iteration over the parameters which begin with `prefix`.
    pub fn reset(&mut self, prefix: Option<&str>) -> Result<()> {
        let c_prefix = prefix_cstring(prefix)?;
        let prefix_ptr = c_prefix.as_ref().map_or(std::ptr::null(), |p| p.as_ptr());
        error_out_call("resetting config iterator", |err| unsafe {
            tiledb_config_iter_reset(self.config.capi(), self.raw.capi(), prefix_ptr, err)
        })?;
        self.failed = false;
        Ok(())
    }

    fn step(&mut self) -> Result<Option<(String, String)>> {
        if self.done()? {
            return Ok(None);
        }
        let entry = self.here()?;
        self.advance()?;
        Ok(Some(entry))
    }
}

impl Iterator for ConfigIter<'_> {
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(entry) => entry.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
