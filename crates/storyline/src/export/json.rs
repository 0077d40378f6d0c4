use log::debug;
use serde::Serialize;

use crate::{
    export::{self, Exporter},
    layout::Projection,
};

#[derive(Debug, Serialize)]
struct Report<'a> {
    positions: Vec<Option<Position<'a>>>,
    max_visible_index: Option<usize>,
    orphans: Vec<String>,
    passes: usize,
}

#[derive(Debug, Serialize)]
struct Position<'a> {
    index: usize,
    speech_id: String,
    name: &'a str,
}

/// Pretty-printed JSON report of a projection.
#[derive(Debug, Default)]
pub struct Json;

impl Exporter for Json {
    fn export(&self, projection: &Projection) -> Result<String, export::Error> {
        let positions = projection
            .positions()
            .iter()
            .enumerate()
            .map(|(index, speech)| {
                speech.as_ref().map(|speech| Position {
                    index,
                    speech_id: speech.id().to_string(),
                    name: speech.name(),
                })
            })
            .collect();
        let report = Report {
            positions,
            max_visible_index: projection.max_visible_index(),
            orphans: projection.orphans().iter().map(ToString::to_string).collect(),
            passes: projection.passes(),
        };

        let json = serde_json::to_string_pretty(&report)?;
        debug!(bytes = json.len(); "JSON report rendered");
        Ok(json)
    }
}
