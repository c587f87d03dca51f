//! Tileset description parsing
//!
//! ```xml
//! <set unique="False">
//!   <tiles>
//!     <tile name="corner" symmetry="L" weight="0.5"/>
//!   </tiles>
//!   <neighbors>
//!     <neighbor left="corner 1" right="corner"/>
//!   </neighbors>
//!   <subsets>
//!     <subset name="simple"><tile name="corner"/></subset>
//!   </subsets>
//! </set>
//! ```

use crate::analysis::tileset::{
    NeighborRule, SymmetryClass, TileDescription, TileRef, TilesetDescription,
};
use crate::io::configuration::Attributes;
use crate::io::error::{Result, io_error};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

#[derive(Debug, Default)]
struct Section {
    in_tiles: bool,
    in_neighbors: bool,
    subset: Option<(String, Vec<String>)>,
}

/// Parse a tileset description from XML text
///
/// # Errors
///
/// Returns an error if the XML is malformed, a tile or neighbor lacks a
/// required attribute, or a value cannot be parsed
pub fn parse_tileset(xml: &str) -> Result<TilesetDescription> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut description = TilesetDescription::default();
    let mut section = Section::default();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                open_element(e, &mut description, &mut section)?;
                match e.name().as_ref() {
                    b"tiles" => section.in_tiles = true,
                    b"neighbors" => section.in_neighbors = true,
                    b"subset" => {
                        let name = Attributes::read("subset", e)?.required("name")?.to_string();
                        section.subset = Some((name, Vec::new()));
                    }
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"subset" {
                    let name = Attributes::read("subset", e)?.required("name")?.to_string();
                    description.subsets.insert(name, Vec::new());
                } else {
                    open_element(e, &mut description, &mut section)?;
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"tiles" => section.in_tiles = false,
                b"neighbors" => section.in_neighbors = false,
                b"subset" => {
                    if let Some((name, tiles)) = section.subset.take() {
                        description.subsets.insert(name, tiles);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(description)
}

/// Read and parse a tileset description file
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse
pub fn load_tileset<P: AsRef<Path>>(path: P) -> Result<TilesetDescription> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| io_error(path, "read tileset", e))?;
    parse_tileset(&xml)
}

fn open_element(
    e: &BytesStart<'_>,
    description: &mut TilesetDescription,
    section: &mut Section,
) -> Result<()> {
    match e.name().as_ref() {
        b"set" => {
            description.unique = Attributes::read("set", e)?.boolean("unique", false)?;
        }
        b"tile" => {
            let attributes = Attributes::read("tile", e)?;
            let name = attributes.required("name")?.to_string();
            if let Some((_, tiles)) = section.subset.as_mut() {
                tiles.push(name);
            } else if section.in_tiles {
                description.tiles.push(TileDescription {
                    name,
                    symmetry: SymmetryClass::from_code(attributes.string("symmetry").unwrap_or("X")),
                    weight: attributes.number("weight", 1.0)?,
                });
            }
        }
        b"neighbor" if section.in_neighbors => {
            let attributes = Attributes::read("neighbor", e)?;
            description.neighbors.push(NeighborRule {
                left: TileRef::parse(attributes.required("left")?),
                right: TileRef::parse(attributes.required("right")?),
            });
        }
        _ => {}
    }
    Ok(())
}
