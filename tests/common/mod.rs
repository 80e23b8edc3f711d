/*!
 * Common test utilities for the subshape test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use tempfile::TempDir;

use subshape::segment::Segment;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Shorthand for building a segment
pub fn seg(index: usize, start_ms: u64, end_ms: u64, text: &str) -> Segment {
    Segment::new(index, start_ms, end_ms, text)
}

/// A small well-formed transcript with three continuous cards and one after
/// a long silence
pub fn sample_transcript() -> &'static str {
    "1\n\
     00:00:01,000 --> 00:00:02,500\n\
     Good evening and welcome.\n\
     \n\
     2\n\
     00:00:02,600 --> 00:00:04,000\n\
     Tonight we look at the harvest.\n\
     \n\
     3\n\
     00:00:04,100 --> 00:00:06,000\n\
     Farmers across the region are worried.\n\
     \n\
     4\n\
     00:00:10,000 --> 00:00:12,000\n\
     More after the break."
}
