use log::{debug, info, warn};

use pairwise_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::session::config_reader::*;

pub mod io_csv;

#[derive(Debug, Snafu)]
pub enum SessionError {
    #[snafu(display("Error opening session file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening ratings file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display(""))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Malformed ratings row at line {lineno}"))]
    CsvRowMalformed { lineno: usize },
    #[snafu(display(""))]
    MissingParentDir {},
    #[snafu(display("Error writing summary file {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;

pub mod config_reader {
    use crate::session::*;

    /// One alternative as declared in the session file.
    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct SessionAlternative {
        pub code: String,
        pub label: String,
    }

    /// One pairwise rating as declared in the session file. The `first` code
    /// must precede the `second` one in the catalog.
    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct SessionRating {
        pub first: String,
        pub second: String,
        pub rating: u32,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct SessionConfig {
        #[serde(rename = "sessionName")]
        pub session_name: String,
        /// Display metadata only. The scoring algorithm never reads it.
        pub expert: Option<String>,
        pub alternatives: Vec<SessionAlternative>,
        /// Inline ratings. They win over `ratingsFile` when both are present.
        pub ratings: Option<Vec<SessionRating>>,
        #[serde(rename = "ratingsFile")]
        pub ratings_file: Option<String>,
        #[serde(rename = "outputPath")]
        pub output_path: Option<String>,
    }

    /// The session metadata echoed at the head of the summary.
    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputConfig {
        pub session: String,
        pub expert: Option<String>,
    }

    pub fn read_summary(path: String) -> SessionResult<JSValue> {
        let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
        debug!("read content: {:?}", contents);
        let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        Ok(js)
    }
}

fn to_alternatives(config: &SessionConfig) -> Vec<Alternative> {
    config
        .alternatives
        .iter()
        .map(|a| Alternative {
            code: a.code.clone(),
            label: a.label.clone(),
        })
        .collect()
}

fn load_ratings(root_path: &Path, config: &SessionConfig) -> SessionResult<Vec<PairwiseRating>> {
    if let Some(inline) = &config.ratings {
        if config.ratings_file.is_some() {
            warn!("load_ratings: both inline ratings and a ratings file are declared, using the inline ratings");
        }
        return Ok(inline
            .iter()
            .map(|r| PairwiseRating {
                first: r.first.clone(),
                second: r.second.clone(),
                rating: r.rating,
            })
            .collect());
    }
    match &config.ratings_file {
        Some(f) => {
            let p: PathBuf = [
                root_path.as_os_str().to_str().unwrap().to_string(),
                f.clone(),
            ]
            .iter()
            .collect();
            io_csv::read_ratings_csv(p.as_path().display().to_string())
        }
        None => whatever!("The session file declares neither ratings nor a ratings file"),
    }
}

fn format_matrix(alternatives: &[SessionAlternative], matrix: &PreferenceMatrix) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>4}", ""));
    for alt in alternatives.iter() {
        out.push_str(&format!("{:>6}", alt.code));
    }
    out.push('\n');
    for (i, alt) in alternatives.iter().enumerate() {
        out.push_str(&format!("{:>4}", alt.code));
        for j in 0..matrix.dim() {
            out.push_str(&format!("{:>6.2}", matrix.get(i, j)));
        }
        out.push('\n');
    }
    out
}

fn format_ranking(entries: &[ScoreEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4} {:<6}{:>8}{:>9}  {}\n",
        "rank", "code", "f", "g", "label"
    ));
    for e in entries.iter() {
        out.push_str(&format!(
            "{:>4} {:<6}{:>8.2}{:>9.4}  {}\n",
            e.rank, e.code, e.raw_score, e.normalized_score, e.label
        ));
    }
    out
}

fn print_result(config: &SessionConfig, rv: &ScoringResult) {
    println!("Session: {}", config.session_name);
    if let Some(expert) = &config.expert {
        println!("Expert: {}", expert);
    }
    println!();
    println!("Preference matrix P:");
    print!("{}", format_matrix(&config.alternatives, &rv.matrix));
    println!();
    println!("Preference scores:");
    print!("{}", format_ranking(&rv.entries));
    println!();
    let labels: JSMap<String, JSValue> = config
        .alternatives
        .iter()
        .map(|a| (a.code.clone(), json!(a.label)))
        .collect();
    println!(
        "Most preferred alternative: {} - {}",
        rv.most_preferred,
        labels[&rv.most_preferred].as_str().unwrap_or("")
    );
    println!(
        "Least preferred alternative: {} - {}",
        rv.least_preferred,
        labels[&rv.least_preferred].as_str().unwrap_or("")
    );
}

fn matrix_to_json(alternatives: &[SessionAlternative], matrix: &PreferenceMatrix) -> JSValue {
    let mut rows: JSMap<String, JSValue> = JSMap::new();
    for (i, alt) in alternatives.iter().enumerate() {
        let row: Vec<JSValue> = (0..matrix.dim())
            .map(|j| json!(format!("{:.2}", matrix.get(i, j))))
            .collect();
        rows.insert(alt.code.clone(), json!(row));
    }
    json!(rows)
}

fn ranking_to_json(rv: &ScoringResult) -> Vec<JSValue> {
    rv.entries
        .iter()
        .map(|e| {
            json!({
                "rank": e.rank,
                "code": e.code,
                "label": e.label,
                "rawScore": format!("{:.2}", e.raw_score),
                "normalizedScore": format!("{:.4}", e.normalized_score),
            })
        })
        .collect()
}

fn build_summary_js(config: &SessionConfig, rv: &ScoringResult) -> JSValue {
    let c = OutputConfig {
        session: config.session_name.clone(),
        expert: config.expert.clone(),
    };
    json!({
        "config": c,
        "matrix": matrix_to_json(&config.alternatives, &rv.matrix),
        "ranking": ranking_to_json(rv),
        "mostPreferred": rv.most_preferred,
        "leastPreferred": rv.least_preferred,
    })
}

pub fn run_session(
    config_path: String,
    out_path: Option<String>,
    check_summary_path: Option<String>,
) -> SessionResult<()> {
    let config_p = Path::new(config_path.as_str());
    let config_str = fs::read_to_string(config_path.clone()).context(OpeningJsonSnafu {
        path: config_path.clone(),
    })?;
    let config: SessionConfig =
        serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);

    let root_p = config_p.parent().context(MissingParentDirSnafu {})?;
    let ratings = load_ratings(root_p, &config)?;
    debug!("ratings: {:?}", ratings);

    let alternatives = to_alternatives(&config);
    let result = match run_scoring_session(&alternatives, &ratings) {
        Result::Ok(x) => x,
        Result::Err(x) => {
            whatever!("Scoring error: {}", x)
        }
    };

    print_result(&config, &result);

    // Assemble the final json
    let result_js = build_summary_js(&config, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out = out_path.or_else(|| config.output_path.clone());
    match out.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(p) => {
            info!("Writing summary to {:?}", p);
            fs::write(p, pretty_js_stats.as_str()).context(WritingSummarySnafu {
                path: p.to_string(),
            })?;
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        info!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary")
        }
    }

    Ok(())
}
