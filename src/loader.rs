use crate::error::{FormError, FormResult};
use crate::pose::{Landmark, PoseFrame};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameDocument {
    Many(Vec<PoseFrame>),
    One(PoseFrame),
}

/// Reads either a JSON array of frames or a single frame object.
pub fn load_frames_json<R: Read>(reader: R) -> FormResult<Vec<PoseFrame>> {
    let doc: FrameDocument = serde_json::from_reader(reader)?;
    Ok(match doc {
        FrameDocument::Many(frames) => frames,
        FrameDocument::One(frame) => vec![frame],
    })
}

struct CsvColumns {
    frame: usize,
    timestamp: Option<usize>,
    name: usize,
    x: usize,
    y: usize,
    z: Option<usize>,
    visibility: Option<usize>,
}

impl CsvColumns {
    fn from_headers(headers: &csv::StringRecord) -> FormResult<Self> {
        let find = |col: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(col))
        };
        let require = |col: &str| {
            find(col).ok_or_else(|| {
                FormError::Validation(format!("CSV is missing required column '{}'", col))
            })
        };

        Ok(Self {
            frame: require("frame")?,
            timestamp: find("timestamp"),
            name: require("name")?,
            x: require("x")?,
            y: require("y")?,
            z: find("z"),
            visibility: find("visibility"),
        })
    }
}

fn parse_opt(rec: &csv::StringRecord, idx: Option<usize>) -> Option<f32> {
    idx.and_then(|i| rec.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// Reads long-format landmark rows: `frame,timestamp,name,x,y[,z][,visibility]`.
///
/// Rows are grouped by `frame` in first-seen order. Rows with an unreadable
/// coordinate are skipped.
pub fn load_frames_csv<R: Read>(reader: R) -> FormResult<Vec<PoseFrame>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let cols = CsvColumns::from_headers(rdr.headers()?)?;

    let mut frames: Vec<PoseFrame> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;

    for result in rdr.records() {
        row_idx += 1;
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                warn!("[Row {}] CSV Parse Error: {}", row_idx, e);
                skipped += 1;
                continue;
            }
        };

        let (Some(frame_id), Some(name)) = (rec.get(cols.frame), rec.get(cols.name)) else {
            skipped += 1;
            continue;
        };
        if frame_id.is_empty() || name.is_empty() {
            skipped += 1;
            continue;
        }

        let (Some(x), Some(y)) = (parse_opt(&rec, Some(cols.x)), parse_opt(&rec, Some(cols.y)))
        else {
            skipped += 1;
            continue;
        };

        let slot = match index.get(frame_id) {
            Some(&i) => i,
            None => {
                let timestamp = cols
                    .timestamp
                    .and_then(|i| rec.get(i))
                    .and_then(|s| s.parse::<f64>().ok())
                    .unwrap_or(frames.len() as f64);
                frames.push(PoseFrame::new(timestamp));
                index.insert(frame_id.to_string(), frames.len() - 1);
                frames.len() - 1
            }
        };

        frames[slot].landmarks.insert(
            name.to_string(),
            Landmark {
                x,
                y,
                z: parse_opt(&rec, cols.z),
                visibility: parse_opt(&rec, cols.visibility),
            },
        );
    }

    if skipped > 0 {
        warn!("Skipped {} invalid landmark rows.", skipped);
    }
    debug!("Loaded {} frames from {} rows", frames.len(), row_idx);

    Ok(frames)
}

/// Picks the reader by extension: `.csv` is CSV, anything else is JSON.
pub fn load_frames_from_file<P: AsRef<Path>>(path: P) -> FormResult<Vec<PoseFrame>> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_frames_csv(file)
    } else {
        load_frames_json(file)
    }
}
