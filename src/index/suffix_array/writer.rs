//! Suffix array writer
//!
//! Writes suffix array data structures to disk in a format optimized for
//! memory-mapped reading.

use super::builder::SuffixIndex;
use super::types::*;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Writes suffix array files to an index directory
pub struct SuffixArrayWriter;

impl SuffixArrayWriter {
    /// Write all suffix array files to `dir`, creating it if needed
    ///
    /// Creates:
    /// - text.bin: The indexed text
    /// - sa.bin: The suffix array keys
    /// - lcp.bin: The LCP array
    /// - meta.json: Metadata
    pub fn write<L: Layout>(dir: &Path, index: &SuffixIndex<L>) -> Result<()> {
        fs::create_dir_all(dir)?;

        Self::write_text(dir, index.text())?;
        Self::write_suffix_array(dir, index.suffix_array(), L::DIRECTION)?;
        Self::write_lcp(dir, index.lcp_array(), L::DIRECTION)?;
        Self::write_meta(dir, index)?;

        debug!(dir = %dir.display(), len = index.len(), "wrote suffix array");
        Ok(())
    }

    /// Write the text to text.bin
    fn write_text(dir: &Path, text: &[u8]) -> Result<()> {
        let mut file = BufWriter::with_capacity(65536, File::create(dir.join("text.bin"))?);
        file.write_all(text)?;
        file.flush()?;
        Ok(())
    }

    /// Write suffix array keys to sa.bin
    fn write_suffix_array(dir: &Path, keys: &[usize], direction: Direction) -> Result<()> {
        let mut file = BufWriter::with_capacity(65536, File::create(dir.join("sa.bin"))?);
        file.write_all(&ArrayHeader::new(keys.len() as u64, direction).to_bytes())?;

        // Using a buffer to reduce system call overhead
        let mut buffer = Vec::with_capacity(8 * 1024); // 1024 entries at a time
        for &key in keys {
            buffer.extend_from_slice(&(key as u64).to_le_bytes());
            if buffer.len() >= 8 * 1024 {
                file.write_all(&buffer)?;
                buffer.clear();
            }
        }
        if !buffer.is_empty() {
            file.write_all(&buffer)?;
        }

        file.flush()?;
        Ok(())
    }

    /// Write the LCP array to lcp.bin
    fn write_lcp(dir: &Path, lcp: &[isize], direction: Direction) -> Result<()> {
        let mut file = BufWriter::with_capacity(65536, File::create(dir.join("lcp.bin"))?);
        file.write_all(&ArrayHeader::new(lcp.len() as u64, direction).to_bytes())?;
        for &value in lcp {
            file.write_all(&(value as i64).to_le_bytes())?;
        }
        file.flush()?;
        Ok(())
    }

    /// Write meta.json
    fn write_meta<L: Layout>(dir: &Path, index: &SuffixIndex<L>) -> Result<()> {
        let meta = SuffixArrayMeta {
            direction: L::DIRECTION,
            text_len: index.text().len() as u64,
            suffix_count: index.len() as u64,
            config: index.config().clone(),
        };
        let file = BufWriter::new(File::create(dir.join("meta.json"))?);
        serde_json::to_writer_pretty(file, &meta)?;
        Ok(())
    }
}

impl<L: Layout> SuffixIndex<L> {
    /// Persist this index into `dir`
    pub fn save(&self, dir: &Path) -> Result<()> {
        SuffixArrayWriter::write(dir, self)
    }
}
