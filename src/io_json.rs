//! JSON staging for box collections and ranking inputs.
//!
//! Box collections are plain JSON arrays of `[top, left, bottom, right]`
//! rows. Ranking inputs are an object with `actual` and `predicted` lists of
//! label lists. This is a convenience layer for the CLI and tests; the
//! metric and perturbation modules never read or write files.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BboxEvalError;
use crate::geometry::BBox;

/// Paired label lists for mean average precision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingInput {
    pub actual: Vec<Vec<String>>,
    pub predicted: Vec<Vec<String>>,
}

/// Reads a box collection from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_boxes_json(path: &Path) -> Result<Vec<BBox>, BboxEvalError> {
    read_json(path)
}

/// Writes a box collection to a JSON file.
pub fn write_boxes_json(path: &Path, boxes: &[BBox]) -> Result<(), BboxEvalError> {
    let file = File::create(path).map_err(BboxEvalError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, boxes).map_err(|source| BboxEvalError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads ranking lists from a JSON file.
pub fn read_ranking_json(path: &Path) -> Result<RankingInput, BboxEvalError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BboxEvalError> {
    let file = File::open(path).map_err(BboxEvalError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| BboxEvalError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a box collection from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_json_str(json: &str) -> Result<Vec<BBox>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a box collection from JSON bytes.
pub fn from_json_slice(bytes: &[u8]) -> Result<Vec<BBox>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a box collection to a compact JSON string.
pub fn to_json_string(boxes: &[BBox]) -> Result<String, serde_json::Error> {
    serde_json::to_string(boxes)
}
