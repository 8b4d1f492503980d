// Primitives for reading the ratings CSV file.

use std::io::Read;

use log::{debug, info};
use snafu::prelude::*;

use pairwise_ranking::PairwiseRating;

use crate::session::{
    CsvLineParseSnafu, CsvOpenSnafu, CsvRowMalformedSnafu, SessionResult,
};

/// Reads a complete set of ratings: one `first,second,rating` row per pair.
/// An optional header row is skipped.
pub fn read_ratings_csv(path: String) -> SessionResult<Vec<PairwiseRating>> {
    info!("Attempting to read ratings file {:?}", path);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.clone())
        .context(CsvOpenSnafu { path })?;
    parse_ratings(rdr)
}

fn parse_ratings<R: Read>(rdr: csv::Reader<R>) -> SessionResult<Vec<PairwiseRating>> {
    let mut res: Vec<PairwiseRating> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("{:?} {:?}", lineno, line);
        let first = line.get(0).context(CsvRowMalformedSnafu { lineno })?;
        let second = line.get(1).context(CsvRowMalformedSnafu { lineno })?;
        let rating_cell = line.get(2).context(CsvRowMalformedSnafu { lineno })?;
        let rating = match rating_cell.parse::<u32>() {
            Result::Ok(x) => x,
            // The first row may be a header. It is detected by a non-numeric
            // rating cell.
            Result::Err(_) if lineno == 1 => {
                debug!("parse_ratings: skipping header row {:?}", line);
                continue;
            }
            Result::Err(_) => return CsvRowMalformedSnafu { lineno }.fail(),
        };
        res.push(PairwiseRating {
            first: first.to_string(),
            second: second.to_string(),
            rating,
        });
    }
    Ok(res)
}
