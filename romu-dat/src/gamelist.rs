//! EmulationStation `gamelist.xml` reading and writing.
//!
//! Parsing yields one [`MetadataEntry`] per `<game>` that names both a path
//! and a title. Writing emits only the fields that carry a value.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use romu_catalog::MetadataEntry;
use romu_core::util::base_name;

use crate::error::DatError;

/// Parse gamelist XML content.
pub fn parse_gamelist(content: &str) -> Result<Vec<MetadataEntry>, DatError> {
    let mut xml = Reader::from_reader(content.as_bytes());
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();

    let mut saw_root = false;
    let mut depth = 0usize;
    let mut current: Option<MetadataEntry> = None;
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                depth += 1;
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag.as_str() {
                    "gameList" => saw_root = true,
                    "game" => current = Some(MetadataEntry::default()),
                    _ if current.is_some() => {
                        field = Some(tag);
                        text.clear();
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                if field.is_some() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"game" => {
                        if let Some(entry) = current.take().and_then(finish_entry) {
                            entries.push(entry);
                        }
                    }
                    _ => {
                        if let (Some(entry), Some(tag)) = (current.as_mut(), field.take()) {
                            assign_field(entry, &tag, text.trim());
                        }
                        text.clear();
                    }
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"gameList" {
                    saw_root = true;
                }
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(DatError::invalid_gamelist(format!(
                        "Unexpected end of file ({} unclosed elements)",
                        depth
                    )));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(DatError::invalid_gamelist("Missing <gameList> root element"));
    }

    Ok(entries)
}

/// Read and parse a gamelist file from disk.
pub fn parse_gamelist_file(path: &Path) -> Result<Vec<MetadataEntry>, DatError> {
    let content = std::fs::read_to_string(path)?;
    parse_gamelist(&content)
}

fn assign_field(entry: &mut MetadataEntry, tag: &str, value: &str) {
    let value = (!value.is_empty()).then(|| value.to_string());
    match tag {
        "path" => entry.path = value.unwrap_or_default(),
        "name" => entry.name = value,
        "desc" => entry.description = value,
        "releasedate" => entry.release_date = value,
        "developer" => entry.developer = value,
        "publisher" => entry.publisher = value,
        "genre" => entry.genre = value,
        "players" => entry.players = value,
        "rating" => entry.rating = value,
        "image" => entry.image = value,
        "thumbnail" => entry.thumbnail = value,
        "marquee" => entry.marquee = value,
        _ => {}
    }
}

/// Keep entries that name both a file and a title.
fn finish_entry(mut entry: MetadataEntry) -> Option<MetadataEntry> {
    let filename = base_name(entry.path.trim_end_matches(['/', '\\']));
    if filename.is_empty() || filename == "." || entry.name.is_none() {
        log::debug!("Skipping gamelist entry without path or name: {:?}", entry.path);
        return None;
    }
    entry.filename = filename.to_string();
    Some(entry)
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Render entries as a gamelist document.
pub fn write_gamelist(entries: &[MetadataEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<gameList>\n");

    for entry in entries {
        xml.push_str("  <game>\n");
        write_tag(&mut xml, "path", Some(entry.path.as_str()));
        write_tag(&mut xml, "name", entry.name.as_deref());
        write_tag(&mut xml, "desc", entry.description.as_deref());
        write_tag(&mut xml, "releasedate", entry.release_date.as_deref());
        write_tag(&mut xml, "developer", entry.developer.as_deref());
        write_tag(&mut xml, "publisher", entry.publisher.as_deref());
        write_tag(&mut xml, "genre", entry.genre.as_deref());
        write_tag(&mut xml, "players", entry.players.as_deref());
        write_tag(&mut xml, "rating", entry.rating.as_deref());
        write_tag(&mut xml, "image", entry.image.as_deref());
        write_tag(&mut xml, "thumbnail", entry.thumbnail.as_deref());
        write_tag(&mut xml, "marquee", entry.marquee.as_deref());
        xml.push_str("  </game>\n");
    }

    xml.push_str("</gameList>\n");
    xml
}

/// Write a gamelist document to disk, creating parent directories.
pub fn write_gamelist_file(path: &Path, entries: &[MetadataEntry]) -> Result<(), DatError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, write_gamelist(entries))?;
    Ok(())
}

fn write_tag(xml: &mut String, tag: &str, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    xml.push_str("    <");
    xml.push_str(tag);
    xml.push('>');
    xml.push_str(&escape_xml(value));
    xml.push_str("</");
    xml.push_str(tag);
    xml.push_str(">\n");
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
