use std::ffi::c_void;
use std::io::Write;
use std::marker::PhantomData;

use tiledb_common::datatype::Datatype;
use tiledb_sys::*;

use crate::context::Context;
use crate::error::Result;
use crate::handle::{RawBuffer, RawBufferList};

/// A typed span of bytes exchanged with the library.
///
/// `'data` bounds the memory the buffer may refer to: caller memory given
/// to [Buffer::set_data], or the [BufferList] the buffer was taken from.
pub struct Buffer<'data> {
    context: Context,
    raw: RawBuffer,
    _data: PhantomData<&'data mut [u8]>,
}

impl<'data> Buffer<'data> {
    pub fn new(context: &Context) -> Result<Self> {
        let ffi = context.alloc_handle("allocating buffer", |ctx, buffer| unsafe {
            tiledb_buffer_alloc(ctx, buffer)
        })?;
        Ok(Self::from_raw(context, RawBuffer::owned(ffi)))
    }

    fn from_raw(context: &Context, raw: RawBuffer) -> Self {
        Buffer {
            context: context.clone(),
            raw,
            _data: PhantomData,
        }
    }

    fn capi(&self) -> *mut tiledb_buffer_t {
        self.raw.capi()
    }

    pub fn set_datatype(&mut self, datatype: Datatype) -> Result<()> {
        self.context.capi_call("setting buffer type", |ctx| unsafe {
            tiledb_buffer_set_type(ctx, self.capi(), datatype.into())
        })
    }

    pub fn datatype(&self) -> Result<Datatype> {
        let mut c_type = 0;
        self.context.capi_call("getting buffer type", |ctx| unsafe {
            tiledb_buffer_get_type(ctx, self.capi(), &mut c_type)
        })?;
        Ok(Datatype::try_from(c_type)?)
    }

    /// Returns a view of the buffer contents without copying them.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        let mut data: *mut c_void = std::ptr::null_mut();
        let mut size: u64 = 0;
        self.context.capi_call("getting buffer data", |ctx| unsafe {
            tiledb_buffer_get_data(ctx, self.capi(), &mut data, &mut size)
        })?;
        if data.is_null() || size == 0 {
            return Ok(&[]);
        }
        Ok(unsafe { std::slice::from_raw_parts(data as *const u8, size as usize) })
    }

    /// Points the buffer at `data`, which it borrows rather than copies.
    pub fn set_data(&mut self, data: &'data mut [u8]) -> Result<()> {
        self.context.capi_call("setting buffer data", |ctx| unsafe {
            tiledb_buffer_set_data(
                ctx,
                self.capi(),
                data.as_mut_ptr() as *mut c_void,
                data.len() as u64,
            )
        })
    }
}

/// An ordered sequence of [Buffer]s which together hold one message,
/// such as a serialized object.
pub struct BufferList {
    context: Context,
    raw: RawBufferList,
}

impl BufferList {
    pub fn new(context: &Context) -> Result<Self> {
        let ffi = context.alloc_handle("allocating buffer list", |ctx, list| unsafe {
            tiledb_buffer_list_alloc(ctx, list)
        })?;
        Ok(BufferList {
            context: context.clone(),
            raw: RawBufferList::owned(ffi),
        })
    }

    fn capi(&self) -> *mut tiledb_buffer_list_t {
        self.raw.capi()
    }

    pub fn num_buffers(&self) -> Result<u64> {
        let mut n = 0;
        self.context.capi_call("getting number of buffers", |ctx| unsafe {
            tiledb_buffer_list_get_num_buffers(ctx, self.capi(), &mut n)
        })?;
        Ok(n)
    }

    /// Returns the buffer at `index`, which shares memory with this list.
    pub fn buffer(&self, index: u64) -> Result<Buffer<'_>> {
        let ffi = self
            .context
            .alloc_handle(&format!("getting buffer {index}"), |ctx, buffer| unsafe {
                tiledb_buffer_list_get_buffer(ctx, self.capi(), index, buffer)
            })?;
        Ok(Buffer::from_raw(&self.context, RawBuffer::owned(ffi)))
    }

    /// Returns the combined size in bytes of every buffer.
    pub fn total_size(&self) -> Result<u64> {
        let mut size = 0;
        self.context.capi_call("getting buffer list size", |ctx| unsafe {
            tiledb_buffer_list_get_total_size(ctx, self.capi(), &mut size)
        })?;
        Ok(size)
    }

    /// Copies every buffer, in order, into one new buffer.
    #[deprecated(note = "use `write_to`, which does not allocate a copy of the list")]
    pub fn flatten(&self) -> Result<Buffer<'static>> {
        let ffi = self
            .context
            .alloc_handle("flattening buffer list", |ctx, buffer| unsafe {
                tiledb_buffer_list_flatten(ctx, self.capi(), buffer)
            })?;
        Ok(Buffer::from_raw(&self.context, RawBuffer::owned(ffi)))
    }

    /// Writes the contents of every buffer, in order, to `writer`,
    /// returning the number of bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<u64> {
        let mut written = 0;
        for i in 0..self.num_buffers()? {
            let buffer = self.buffer(i)?;
            let bytes = buffer.as_bytes()?;
            writer.write_all(bytes)?;
            written += bytes.len() as u64;
        }
        writer.flush()?;
        Ok(written)
    }
}
