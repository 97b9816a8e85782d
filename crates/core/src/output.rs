//! File writers for the two generator products: the geometry document and
//! the module-to-FEB channel table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::gdml::Document;
use crate::model::{FebAssignment, FebMap};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the geometry document as pretty-printed XML.
pub fn write_gdml(doc: &Document, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(doc.to_xml().as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write the FEB channel map as CSV, one row per module in creation order.
///
/// Single-ended modules produce `mod,feb,pos`; dual-ended modules produce
/// `mod,feb1,pos1,feb2,pos2`. Rows deliberately vary in width, so the writer
/// runs in flexible mode.
pub fn write_feb_map(map: &FebMap, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for (mod_id, assignment) in map.iter() {
        match assignment {
            FebAssignment::Single(ch) => {
                writer.write_record([
                    mod_id.to_string(),
                    ch.feb.to_string(),
                    ch.pos.to_string(),
                ])?;
            }
            FebAssignment::Dual(a, b) => {
                writer.write_record([
                    mod_id.to_string(),
                    a.feb.to_string(),
                    a.pos.to_string(),
                    b.feb.to_string(),
                    b.pos.to_string(),
                ])?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FebChannel, FebMap};

    #[test]
    fn feb_map_rows_match_assignment_arity() {
        let mut map = FebMap::new();
        map.insert(0, FebAssignment::Dual(FebChannel::new(1, 1), FebChannel::new(2, 1)));
        map.insert(1, FebAssignment::Single(FebChannel::new(3, 2)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feb_map.txt");
        write_feb_map(&map, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["0,1,1,2,1", "1,3,2"]);
    }
}
