//! Shared handle to the image bytes attached to a classify call.
//!
//! The handle wraps a caller-supplied reader (an open file, an in-memory
//! buffer, a zip archive...) behind `Arc<Mutex<..>>`, so copying options or
//! builders shares one stream instead of duplicating it. The reader is
//! dropped (and a file handle closed) exactly once, when the last clone of
//! the handle goes away.

use std::fmt;
use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex};

use crate::error_handler::{Result, VisualRecognitionError};

type SharedReader = Arc<Mutex<Box<dyn Read + Send>>>;

/// An image (`.jpg`, `.png`) or a `.zip` of images, as a byte stream.
///
/// Service limits: 10 MB per image, at most 20 images, 100 MB per zip.
/// They are enforced remotely, not here.
#[derive(Clone)]
pub struct ImageData {
    inner: SharedReader,
}

impl ImageData {
    /// Wraps any reader. The stream is consumed when the request is encoded.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Box::new(reader))),
        }
    }

    /// Wraps an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Cursor::new(bytes.into()))
    }

    /// Drains the remaining bytes of the stream.
    ///
    /// Clones share one cursor: a second call (from this handle or any clone)
    /// returns only what was left after the first.
    ///
    /// # Errors
    /// [`VisualRecognitionError::ImageRead`] if the reader fails or a previous
    /// reader panicked while holding the lock.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        let mut guard = self.inner.lock().map_err(|_| {
            VisualRecognitionError::ImageRead(std::io::Error::other("image stream lock poisoned"))
        })?;
        let mut buf = Vec::new();
        guard
            .read_to_end(&mut buf)
            .map_err(VisualRecognitionError::ImageRead)?;
        Ok(buf)
    }

    /// True when both handles point at the same underlying stream.
    pub fn ptr_eq(&self, other: &ImageData) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ImageData {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}
