//! Batch description parsing
//!
//! Each `<overlapping>` or `<simpletiled>` child of the root element becomes
//! one [`ModelConfig`]; omitted attributes take the defaults from
//! [`crate::io::configuration`].

use crate::algorithm::selection::Heuristic;
use crate::analysis::patterns::OverlappingOptions;
use crate::io::configuration::{
    Attributes, DEFAULT_HEURISTIC, DEFAULT_OVERLAPPING_SIZE, DEFAULT_PATTERN_SIZE,
    DEFAULT_SCREENSHOTS, DEFAULT_SYMMETRY, DEFAULT_TILED_SIZE, ModelConfig, ModelKind,
};
use crate::io::error::{Result, io_error};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parse a batch description from XML text
///
/// # Errors
///
/// Returns an error if the XML is malformed or an entry has a missing name or
/// an unparsable value
pub fn parse_samples(xml: &str) -> Result<Vec<ModelConfig>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut configs = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if depth == 1 {
                    configs.extend(model_entry(e)?);
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if depth == 1 {
                    configs.extend(model_entry(e)?);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(configs)
}

/// Read and parse a batch description file
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<ModelConfig>> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| io_error(path, "read samples", e))?;
    parse_samples(&xml)
}

fn model_entry(e: &BytesStart<'_>) -> Result<Option<ModelConfig>> {
    let (element, overlapping) = match e.name().as_ref() {
        b"overlapping" => ("overlapping", true),
        b"simpletiled" => ("simpletiled", false),
        other => {
            tracing::warn!(
                element = %String::from_utf8_lossy(other),
                "ignoring unknown model entry"
            );
            return Ok(None);
        }
    };

    let attributes = Attributes::read(element, e)?;
    let name = attributes.required("name")?;
    let default_size = if overlapping {
        DEFAULT_OVERLAPPING_SIZE
    } else {
        DEFAULT_TILED_SIZE
    };
    let size = attributes.number("size", default_size)?;
    let limit: i64 = attributes.number("limit", -1)?;

    let kind = if overlapping {
        ModelKind::Overlapping {
            options: OverlappingOptions {
                pattern_size: attributes.number("N", DEFAULT_PATTERN_SIZE)?,
                periodic_input: attributes.boolean("periodicInput", true)?,
                symmetry: attributes.number("symmetry", DEFAULT_SYMMETRY)?,
            },
            ground: attributes.boolean("ground", false)?,
        }
    } else {
        ModelKind::Tiled {
            subset: attributes.string("subset").map(str::to_string),
            black_background: attributes.boolean("blackBackground", false)?,
            text_output: attributes.boolean("textOutput", false)?,
        }
    };

    Ok(Some(ModelConfig {
        name: name.to_string(),
        width: attributes.number("width", size)?,
        height: attributes.number("height", size)?,
        periodic: attributes.boolean("periodic", false)?,
        heuristic: Heuristic::from_name(attributes.string("heuristic").unwrap_or(DEFAULT_HEURISTIC)),
        screenshots: attributes.number("screenshots", DEFAULT_SCREENSHOTS)?,
        limit: usize::try_from(limit).ok(),
        kind,
    }))
}
