use super::dataset::{Dataset, Party, Vote};
use crate::error::{Id3Error, Result};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Number of yes/no attributes in every record of the input file.
pub const NUM_ATTRIBUTES: usize = 14;

fn parse_vote(token: &str, line: usize) -> Result<Vote> {
    match token {
        "y" => Ok(Vote::Yes),
        "n" => Ok(Vote::No),
        other => Err(Id3Error::Parse {
            line,
            message: format!("Invalid attribute value: '{}'", other),
        }),
    }
}

fn parse_party(token: &str, line: usize) -> Result<Party> {
    match token {
        "democrat" => Ok(Party::Democrat),
        "republican" => Ok(Party::Republican),
        other => Err(Id3Error::Parse {
            line,
            message: format!("Invalid class label: {}", other),
        }),
    }
}

/// Reads records of the form `n,y,y,...,democrat` from any reader.
///
/// Each line holds `num_attributes` fields that are either `y` or `n` followed by the class label.
///
/// # Errors
///
/// Returns an error on malformed lines or if no record was read.
pub fn read_records<R: Read>(input: R, num_attributes: usize) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut records = Vec::new();
    for (lineno, result) in reader.records().enumerate() {
        let record = result?;
        // blank lines are skipped by the reader, so the enumeration index can lag behind
        let line = record
            .position()
            .map_or(lineno + 1, |position| position.line() as usize);

        if record.len() != num_attributes + 1 {
            return Err(Id3Error::Parse {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    num_attributes + 1,
                    record.len()
                ),
            });
        }

        let attributes = record
            .iter()
            .take(num_attributes)
            .map(|token| parse_vote(token, line))
            .collect::<Result<Vec<_>>>()?;
        let label = parse_party(&record[num_attributes], line)?;
        records.push((attributes, label));
    }

    if records.is_empty() {
        return Err(Id3Error::NoRecords);
    }
    debug!(records = records.len(), "read input records");

    Dataset::from_records(records)
}

/// Reads a record file with [`NUM_ATTRIBUTES`] attributes per line.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = std::fs::File::open(path)?;
    read_records(file, NUM_ATTRIBUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records() {
        let input = "\
n,y,y,n,y,n,n,n,y,n,y,n,n,y,democrat
n,y,y,n,y,n,n,n,n,n,y,y,y,y,democrat
n,y,n,y,y,n,n,n,n,y,y,y,n,y,republican
";
        let dataset = read_records(input.as_bytes(), NUM_ATTRIBUTES).unwrap();
        assert_eq!(dataset.nrows(), 3);
        assert_eq!(dataset.ncols(), NUM_ATTRIBUTES);
        assert_eq!(dataset.x[(0, 0)], Vote::No);
        assert_eq!(dataset.x[(0, 1)], Vote::Yes);
        assert_eq!(dataset.y[2], Party::Republican);
    }

    #[test]
    fn test_read_records_trims_whitespace() {
        let dataset = read_records("y, n ,republican \n".as_bytes(), 2).unwrap();
        assert_eq!(dataset.x[(0, 1)], Vote::No);
        assert_eq!(dataset.y[0], Party::Republican);
    }

    #[test]
    fn test_read_records_invalid_attribute() {
        let err = read_records("y,x,democrat\n".as_bytes(), 2).unwrap_err();
        assert!(matches!(err, Id3Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_records_invalid_label() {
        let err = read_records("y,n,democrat\ny,n,whig\n".as_bytes(), 2).unwrap_err();
        assert!(matches!(err, Id3Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_read_records_reports_physical_line_after_blank_line() {
        let err = read_records("y,n,democrat\n\ny,n,whig\n".as_bytes(), 2).unwrap_err();
        assert!(matches!(err, Id3Error::Parse { line: 3, .. }));
        assert_eq!(err.to_string(), "Line 3: Invalid class label: whig");
    }

    #[test]
    fn test_read_records_wrong_field_count() {
        let err = read_records("y,democrat\n".as_bytes(), 2).unwrap_err();
        assert!(matches!(err, Id3Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_records_empty_input() {
        assert!(matches!(
            read_records("".as_bytes(), 2),
            Err(Id3Error::NoRecords)
        ));
    }
}
