//! Byte buffer with independent read and write cursors.
//!
//! All multi-byte values are big-endian. Every encode and decode advances its
//! cursor by exactly the field width and never touches bytes outside the
//! backing array: an access that would cross the end fails with
//! [`VisionError::BufferOverrun`] and leaves the cursor where it was.
//!
//! A `PacketBuffer` is a scratch resource owned by one reader or writer. It is
//! not meant to be shared between concurrent callers.

use crate::{Result, VisionError};

/// Fixed-capacity byte buffer with big-endian encode/decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketBuffer {
    data: Vec<u8>,
    read_pos: usize,
    write_pos: usize,
}

impl PacketBuffer {
    /// Width of an encoded byte.
    pub const BYTE_SIZE: usize = 1;
    /// Width of an encoded 32-bit integer.
    pub const INT_SIZE: usize = 4;
    /// Width of an encoded 64-bit float.
    pub const DOUBLE_SIZE: usize = 8;
    /// Width of an encoded boolean.
    pub const BOOL_SIZE: usize = 1;

    /// Create a zero-filled buffer with `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; capacity], read_pos: 0, write_pos: 0 }
    }

    /// Wrap existing bytes; both cursors start at 0.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, read_pos: 0, write_pos: 0 }
    }

    /// Reset both cursors and zero the backing array at its current capacity.
    pub fn clear(&mut self) {
        let capacity = self.data.len();
        self.data.clear();
        self.data.resize(capacity, 0);
        self.read_pos = 0;
        self.write_pos = 0;
    }

    /// Replace the backing array wholesale. Cursors are left untouched.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Borrow the backing array.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Capacity of the backing array in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn read_position(&self) -> usize {
        self.read_pos
    }

    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    /// Bytes left between the read cursor and the end of the array.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.read_pos)
    }

    pub fn encode_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    pub fn encode_i32(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Encode the IEEE-754 bit pattern of `value`.
    pub fn encode_f64(&mut self, value: f64) -> Result<()> {
        self.write_bytes(&value.to_bits().to_be_bytes())
    }

    pub fn encode_bool(&mut self, value: bool) -> Result<()> {
        self.write_bytes(&[u8::from(value)])
    }

    pub fn decode_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn decode_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array::<4>()?))
    }

    pub fn decode_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(u64::from_be_bytes(self.read_array::<8>()?)))
    }

    pub fn decode_bool(&mut self) -> Result<bool> {
        Ok(self.decode_u8()? != 0)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let start = self.write_pos;
        let end = start + bytes.len();
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(start..end)
            .ok_or_else(|| VisionError::buffer_overrun(start, bytes.len(), len))?;
        slot.copy_from_slice(bytes);
        self.write_pos = end;
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let start = self.read_pos;
        let end = start + N;
        let len = self.data.len();
        let bytes = self
            .data
            .get(start..end)
            .ok_or_else(|| VisionError::buffer_overrun(start, N, len))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.read_pos = end;
        Ok(out)
    }
}
