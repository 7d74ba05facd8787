//! Fixed capacity text buffers for display fields

use core::fmt;

use super::Error;

/// "00" to "23", or "01" to "12"
pub const HOUR_WIDTH: usize = 2;
/// "0" to "59"
pub const MINUTE_WIDTH: usize = 2;
/// "0" to "82" (23 + 59)
pub const TOTAL_WIDTH: usize = 2;
/// "HH:MM"
pub const CLOCK_WIDTH: usize = HOUR_WIDTH + 1 + MINUTE_WIDTH;

/// Buffer size of every field, the widest of the widths above
pub const FIELD_CAPACITY: usize = max(
    max(HOUR_WIDTH, MINUTE_WIDTH),
    max(TOTAL_WIDTH, CLOCK_WIDTH),
);

const fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Text of one display field, overwritten in place on every update
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FieldText {
    str_buf: [u8; FIELD_CAPACITY],
    len: usize,
}

impl FieldText {
    pub const fn empty() -> Self {
        Self {
            str_buf: [0; FIELD_CAPACITY],
            len: 0,
        }
    }

    /// Format into a new field, failing instead of truncating
    pub fn format(args: fmt::Arguments) -> Result<Self, Error> {
        let mut str_buf = [0; FIELD_CAPACITY];
        let len = format_no_std::show(&mut str_buf, args)
            .map_err(|_| Error::TextTooLong)?
            .len();
        Ok(Self { str_buf, len })
    }

    /// Copy text into a new field
    pub fn new(text: &str) -> Result<Self, Error> {
        let bytes = text.as_bytes();
        if bytes.len() > FIELD_CAPACITY {
            return Err(Error::TextTooLong);
        }
        let mut field = Self::empty();
        field.str_buf[..bytes.len()].copy_from_slice(bytes);
        field.len = bytes.len();
        Ok(field)
    }

    pub fn as_str(&self) -> &str {
        // Only ever filled from `str`s
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for FieldText {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for FieldText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<&str> for FieldText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
