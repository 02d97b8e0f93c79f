//! TileDB objects and the callback through which the native library
//! reports them during a walk.
//!
//! `tiledb_object_walk` and `tiledb_object_ls` accept a C function pointer
//! and an opaque `void*` which is passed back on each call. The visitor
//! closure lives in a [VisitorState] on the caller's stack; the token is a
//! pointer to that state, and [visit_trampoline] is monomorphised for the
//! closure type so that it can restore the closure from the token.

use std::any::Any;
use std::ffi::{CStr, c_char, c_void};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::ControlFlow;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::str::Utf8Error;

use crate::InvalidDiscriminant;

c_enum! {
    /// Kind of a TileDB resource found at a path.
    pub enum ObjectType {
        Invalid = 0 => "INVALID",
        Group = 1 => "GROUP",
        Array = 2 => "ARRAY",
    }
}

c_enum! {
    /// Whether a recursive walk visits a group before or after its contents.
    pub enum WalkOrder {
        PreOrder = 0 => "PREORDER",
        PostOrder = 1 => "POSTORDER",
    }
}

/// Continue traversal.
pub const VISIT_CONTINUE: i32 = 1;
/// Stop traversal without error.
pub const VISIT_STOP: i32 = 0;
/// Stop traversal with an error.
pub const VISIT_ERROR: i32 = -1;

/// Signature of the callback accepted by the object walk entry points.
pub type ObjectVisitorFn =
    unsafe extern "C" fn(path: *const c_char, object_type: u32, data: *mut c_void) -> i32;

/// A TileDB resource visited by a walk.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ObjectEntry {
    pub path: String,
    pub object_type: ObjectType,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ObjectEntryError {
    #[error("Object path is NULL")]
    NullPath,
    #[error("Object path is not UTF-8: {0}")]
    PathNotUtf8(#[from] Utf8Error),
    #[error(transparent)]
    ObjectType(#[from] InvalidDiscriminant),
}

impl ObjectEntry {
    /// Copies the arguments of a visitor callback into an owned entry.
    ///
    /// # Safety
    ///
    /// `path` must be NULL or point to a NUL-terminated string which is
    /// valid for the duration of this call.
    pub unsafe fn from_raw(
        path: *const c_char,
        object_type: u32,
    ) -> Result<Self, ObjectEntryError> {
        if path.is_null() {
            return Err(ObjectEntryError::NullPath);
        }
        let path = unsafe { CStr::from_ptr(path) }.to_str()?.to_owned();
        Ok(ObjectEntry {
            path,
            object_type: ObjectType::try_from(object_type)?,
        })
    }
}

impl Display for ObjectEntry {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} ({})", self.path, self.object_type)
    }
}

/// Objects collected by a walk, in visit order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObjectList {
    entries: Vec<ObjectEntry>,
}

impl ObjectList {
    pub fn push(&mut self, entry: ObjectEntry) {
        self.entries.push(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectEntry> {
        self.entries.iter()
    }

    /// Returns the entries which are of type `object_type`.
    pub fn of_type(&self, object_type: ObjectType) -> impl Iterator<Item = &ObjectEntry> {
        self.entries
            .iter()
            .filter(move |e| e.object_type == object_type)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }
}

impl IntoIterator for ObjectList {
    type Item = ObjectEntry;
    type IntoIter = std::vec::IntoIter<ObjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a ObjectEntry;
    type IntoIter = std::slice::Iter<'a, ObjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ObjectEntry> for ObjectList {
    fn from_iter<T: IntoIterator<Item = ObjectEntry>>(iter: T) -> Self {
        ObjectList {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Why a walk was aborted from inside the visitor callback.
enum Abort {
    Entry(ObjectEntryError),
    Panic(Box<dyn Any + Send + 'static>),
}

/// Owns a visitor closure for the duration of one walk.
pub struct VisitorState<F> {
    visitor: F,
    abort: Option<Abort>,
    visited: usize,
}

impl<F> VisitorState<F>
where
    F: FnMut(ObjectEntry) -> ControlFlow<()>,
{
    pub fn new(visitor: F) -> Self {
        VisitorState {
            visitor,
            abort: None,
            visited: 0,
        }
    }

    /// Returns the callback which restores this state from its token.
    pub fn callback(&self) -> ObjectVisitorFn {
        visit_trampoline::<F>
    }

    /// Returns the opaque token passed through the C API.
    /// The token is valid for as long as `self` is neither moved nor dropped.
    pub fn token(&mut self) -> *mut c_void {
        self as *mut Self as *mut c_void
    }

    /// Returns the number of entries handed to the visitor.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Ends the walk, returning any error raised while restoring an entry.
    /// A panic raised by the visitor is resumed here, after control has
    /// returned from the native library.
    pub fn finish(self) -> Result<usize, ObjectEntryError> {
        match self.abort {
            None => Ok(self.visited),
            Some(Abort::Entry(e)) => Err(e),
            Some(Abort::Panic(payload)) => std::panic::resume_unwind(payload),
        }
    }
}

/// Restores the [VisitorState] behind `data` and hands it the visited entry.
///
/// # Safety
///
/// `data` must be a token produced by [VisitorState::token] for a state with
/// visitor type `F`, and that state must be live for the duration of the call.
pub unsafe extern "C" fn visit_trampoline<F>(
    path: *const c_char,
    object_type: u32,
    data: *mut c_void,
) -> i32
where
    F: FnMut(ObjectEntry) -> ControlFlow<()>,
{
    if data.is_null() {
        return VISIT_ERROR;
    }
    let state = unsafe { &mut *(data as *mut VisitorState<F>) };

    let entry = match unsafe { ObjectEntry::from_raw(path, object_type) } {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!("Aborting object walk: {e}");
            state.abort = Some(Abort::Entry(e));
            return VISIT_ERROR;
        }
    };

    state.visited += 1;
    let visitor = &mut state.visitor;
    match catch_unwind(AssertUnwindSafe(|| visitor(entry))) {
        Ok(ControlFlow::Continue(())) => VISIT_CONTINUE,
        Ok(ControlFlow::Break(())) => VISIT_STOP,
        Err(payload) => {
            tracing::warn!("Object walk visitor panicked; aborting walk");
            state.abort = Some(Abort::Panic(payload));
            VISIT_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;

    use super::*;

    /// Invokes the callback the way the native library would.
    fn visit<F>(state: &mut VisitorState<F>, path: &str, object_type: u32) -> i32
    where
        F: FnMut(ObjectEntry) -> ControlFlow<()>,
    {
        let path = CString::new(path).unwrap();
        let callback = state.callback();
        let token = state.token();
        unsafe { callback(path.as_ptr(), object_type, token) }
    }

    #[test]
    fn collect_entries() {
        let mut list = ObjectList::default();
        let mut state = VisitorState::new(|entry: ObjectEntry| {
            list.push(entry);
            ControlFlow::Continue(())
        });

        assert_eq!(VISIT_CONTINUE, visit(&mut state, "mem://group", 1));
        assert_eq!(VISIT_CONTINUE, visit(&mut state, "mem://group/array", 2));
        assert_eq!(Ok(2), state.finish());

        assert_eq!(
            vec!["mem://group", "mem://group/array"],
            list.paths().collect::<Vec<_>>()
        );
        assert_eq!(1, list.of_type(ObjectType::Array).count());
    }

    #[test]
    fn stop_early() {
        let mut state = VisitorState::new(|entry: ObjectEntry| {
            if entry.object_type == ObjectType::Array {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(VISIT_CONTINUE, visit(&mut state, "a", 1));
        assert_eq!(VISIT_STOP, visit(&mut state, "b", 2));
        assert_eq!(Ok(2), state.finish());
    }

    #[test]
    fn invalid_object_type() {
        let mut state = VisitorState::new(|_: ObjectEntry| ControlFlow::Continue(()));
        assert_eq!(VISIT_ERROR, visit(&mut state, "a", 9));
        assert_eq!(
            Err(ObjectEntryError::ObjectType(InvalidDiscriminant::new(
                "ObjectType",
                9u32
            ))),
            state.finish()
        );
    }

    #[test]
    fn null_arguments() {
        let mut state = VisitorState::new(|_: ObjectEntry| ControlFlow::Continue(()));
        let callback = state.callback();
        let token = state.token();
        assert_eq!(VISIT_ERROR, unsafe {
            callback(std::ptr::null(), 1, token)
        });
        assert_eq!(VISIT_ERROR, unsafe {
            callback(c"a".as_ptr(), 1, std::ptr::null_mut())
        });
        assert_eq!(Err(ObjectEntryError::NullPath), state.finish());
    }

    #[test]
    fn non_utf8_path() {
        let mut state = VisitorState::new(|_: ObjectEntry| ControlFlow::Continue(()));
        let path = CString::new(vec![0xffu8, 0xfe]).unwrap();
        let callback = state.callback();
        let token = state.token();
        assert_eq!(VISIT_ERROR, unsafe { callback(path.as_ptr(), 2, token) });
        assert!(matches!(
            state.finish(),
            Err(ObjectEntryError::PathNotUtf8(_))
        ));
    }

    #[test]
    fn panic_is_resumed_after_walk() {
        let mut state = VisitorState::new(|_: ObjectEntry| -> ControlFlow<()> {
            panic!("visitor failed")
        });
        assert_eq!(VISIT_ERROR, visit(&mut state, "a", 2));

        let resumed = std::panic::catch_unwind(AssertUnwindSafe(move || state.finish()));
        let payload = resumed.expect_err("Expected visitor panic to be resumed");
        assert_eq!(Some(&"visitor failed"), payload.downcast_ref::<&str>());
    }
}
