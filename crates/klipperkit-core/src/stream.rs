//! Sliced G-code stream representation
//!
//! A print job arrives as an ordered sequence of text chunks, each chunk a
//! block of newline-separated instruction lines. The transform mutates
//! individual chunks in place and hands the stream back, so the chunk
//! boundaries the slicer produced are preserved exactly.

use crate::error::{Error, Result};
use std::path::Path;

/// Marker a slicer places at the start of each layer chunk.
const LAYER_MARKER: &str = ";LAYER:";

/// An ordered sequence of G-code text chunks for one print job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcodeStream {
    chunks: Vec<String>,
}

impl GcodeStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream from pre-chunked text, preserving chunk order.
    pub fn from_chunks(chunks: Vec<String>) -> Self {
        Self { chunks }
    }

    /// Build a stream from a whole G-code file, splitting into chunks at
    /// layer boundaries the way a slicer hands chunks to post-processors.
    /// Text before the first layer marker becomes the leading chunk.
    pub fn from_text(text: &str) -> Self {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for line in text.split_inclusive('\n') {
            if line.trim_start().starts_with(LAYER_MARKER) && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(line);
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        Self { chunks }
    }

    /// Read and chunk a G-code file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// Write the stream back out as one file.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reassemble the stream into a single text blob.
    pub fn to_text(&self) -> String {
        self.chunks.concat()
    }

    /// Number of chunks in the stream.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the stream has no chunks at all.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// All chunks in order.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// A single chunk by index.
    pub fn chunk(&self, index: usize) -> Option<&str> {
        self.chunks.get(index).map(|c| c.as_str())
    }

    /// Replace a chunk in place. Returns false when the index is out of range.
    pub fn set_chunk(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.chunks.get_mut(index) {
            Some(chunk) => {
                *chunk = text.into();
                true
            }
            None => false,
        }
    }
}

impl From<&str> for GcodeStream {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let stream = GcodeStream::new();
        assert!(stream.is_empty());
        assert_eq!(stream.to_text(), "");
    }

    #[test]
    fn test_single_chunk_without_layers() {
        let stream = GcodeStream::from_text("G28\nG1 Z5\n");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.chunk(0), Some("G28\nG1 Z5\n"));
    }

    #[test]
    fn test_splits_at_layer_markers() {
        let text = ";Generated with Cura\nM140 S60\n;LAYER:0\nG1 X1\n;LAYER:1\nG1 X2\n";
        let stream = GcodeStream::from_text(text);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.chunk(0), Some(";Generated with Cura\nM140 S60\n"));
        assert_eq!(stream.chunk(1), Some(";LAYER:0\nG1 X1\n"));
        assert_eq!(stream.chunk(2), Some(";LAYER:1\nG1 X2\n"));
    }

    #[test]
    fn test_to_text_round_trip() {
        let text = ";header\n;LAYER:0\nG1 X1\n;LAYER:1\nG1 X2";
        assert_eq!(GcodeStream::from_text(text).to_text(), text);
    }

    #[test]
    fn test_set_chunk() {
        let mut stream = GcodeStream::from_chunks(vec!["a\n".into(), "b\n".into()]);
        assert!(stream.set_chunk(1, "c\n"));
        assert_eq!(stream.chunk(1), Some("c\n"));
        assert!(!stream.set_chunk(5, "d\n"));
    }
}
