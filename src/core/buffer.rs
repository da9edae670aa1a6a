//! Fixed-capacity line buffer.

/// Capacity of every session buffer, terminator slot included
pub const BUFFER_CAPACITY: usize = 256;

/// Owned byte buffer with explicit length tracking.
///
/// At most `BUFFER_CAPACITY - 1` content bytes are stored; the last slot is
/// kept free the way a terminated C buffer would be.
#[derive(Clone)]
pub struct LineBuffer {
    bytes: [u8; BUFFER_CAPACITY],
    len: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Maximum number of content bytes
    pub const MAX_LEN: usize = BUFFER_CAPACITY - 1;

    pub fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_CAPACITY],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= Self::MAX_LEN
    }

    /// Append a byte. Returns false (and stores nothing) when full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        true
    }

    /// Remove and return the last byte, if any.
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let byte = self.bytes[self.len];
        self.bytes[self.len] = 0;
        Some(byte)
    }

    /// Zero the buffer.
    pub fn clear(&mut self) {
        self.bytes[..self.len].fill(0);
        self.len = 0;
    }

    /// Replace the contents with `text`, truncated to `MAX_LEN` on a char boundary.
    pub fn set(&mut self, text: &str) {
        self.clear();
        let mut end = text.len().min(Self::MAX_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.bytes[..end].copy_from_slice(&text.as_bytes()[..end]);
        self.len = end;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Contents as text. A trailing partial UTF-8 sequence is left out.
    pub fn as_str(&self) -> &str {
        let bytes = self.as_bytes();
        match std::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("len", &self.len)
            .field("text", &self.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stops_at_max_len() {
        let mut buf = LineBuffer::new();
        for _ in 0..BUFFER_CAPACITY + 10 {
            buf.push(b'x');
        }
        assert_eq!(buf.len(), BUFFER_CAPACITY - 1);
        assert!(buf.is_full());
        assert!(!buf.push(b'y'));
    }

    #[test]
    fn test_pop_on_empty_does_not_underflow() {
        let mut buf = LineBuffer::new();
        assert_eq!(buf.pop(), None);
        assert_eq!(buf.len(), 0);

        buf.push(b'a');
        assert_eq!(buf.pop(), Some(b'a'));
        assert_eq!(buf.pop(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_set_truncates_on_char_boundary() {
        let mut buf = LineBuffer::new();
        let long = "é".repeat(200); // 400 bytes
        buf.set(&long);
        assert!(buf.len() <= LineBuffer::MAX_LEN);
        assert_eq!(buf.as_str().chars().count(), buf.len() / 2);

        buf.set("ps -d");
        assert_eq!(buf.as_str(), "ps -d");
    }

    #[test]
    fn test_as_str_skips_partial_sequence() {
        let mut buf = LineBuffer::new();
        buf.push(b'o');
        buf.push(b'k');
        buf.push(0xC3); // first half of a two-byte char
        assert_eq!(buf.as_str(), "ok");
    }
}
