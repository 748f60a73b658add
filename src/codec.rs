//! Binary codec helpers shared by every record kind.
//!
//! Layout:
//! ```text
//! bounded string: [len:u16 BE][bytes:len]   len <= field maximum
//! number:         [value:N BE]              N = 1, 2, 4 or 8 bytes
//! ```
//! There is no header, footer or record count; records are concatenated.

use std::io::{self, Read, Write};

use crate::errors::{CollectorError, Result};

/// Width of the length prefix in front of every bounded string.
pub const LENGTH_PREFIX_WIDTH: usize = 2;

/// Unsigned integers with a fixed big-endian encoding.
pub trait FixedWidth: Copy {
    const WIDTH: usize;

    fn encode(self, buf: &mut [u8]);

    fn decode(buf: &[u8]) -> Self;
}

macro_rules! fixed_width {
    ($($ty:ty),*) => {$(
        impl FixedWidth for $ty {
            const WIDTH: usize = core::mem::size_of::<$ty>();

            #[inline]
            fn encode(self, buf: &mut [u8]) {
                buf[..Self::WIDTH].copy_from_slice(&self.to_be_bytes());
            }

            #[inline]
            fn decode(buf: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(&buf[..Self::WIDTH]);
                <$ty>::from_be_bytes(raw)
            }
        }
    )*};
}

fixed_width!(u8, u16, u32, u64);

fn read_exact(r: &mut dyn Read, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => CollectorError::Truncated,
        _ => CollectorError::Io(e),
    })
}

pub fn write_number<N: FixedWidth>(w: &mut dyn Write, value: N) -> Result<()> {
    let mut buf = [0u8; 8];
    value.encode(&mut buf);
    w.write_all(&buf[..N::WIDTH])?;
    Ok(())
}

pub fn read_number<N: FixedWidth>(r: &mut dyn Read) -> Result<N> {
    let mut buf = [0u8; 8];
    read_exact(r, &mut buf[..N::WIDTH])?;
    Ok(N::decode(&buf))
}

/// Write `s` as a bounded string. Fails before touching the stream if `s`
/// is longer than `max` bytes.
pub fn write_string(w: &mut dyn Write, s: &str, max: usize) -> Result<()> {
    let len = s.len();
    if len > max || len > u16::MAX as usize {
        return Err(CollectorError::FieldTooLong { len, max });
    }
    write_number(w, len as u16)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

/// Read a bounded string, rejecting a declared length above `max` before
/// reading the payload.
pub fn read_string(r: &mut dyn Read, max: usize) -> Result<String> {
    let len = read_number::<u16>(r)? as usize;
    if len > max {
        return Err(CollectorError::FieldTooLong { len, max });
    }
    let mut bytes = vec![0u8; len];
    read_exact(r, &mut bytes)?;
    Ok(String::from_utf8(bytes)?)
}
