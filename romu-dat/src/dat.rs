use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use romu_catalog::{ChecksumRecord, ChecksumSet};
use romu_core::Platform;

use crate::error::DatError;
use crate::systems::platform_from_header;

/// The two checksum-database grammars understood by [`parse_checksum_db`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatDialect {
    /// Logiqx XML (`<datafile><header>...<game><rom .../>`).
    Logiqx,
    /// ClrMamePro line-oriented blocks (`clrmamepro ( ... )`, `game ( ... )`).
    ClrMamePro,
}

impl DatDialect {
    /// Pick the dialect from the first non-blank line of the content.
    ///
    /// A `clrmamepro` header selects the line-oriented grammar, markup
    /// selects XML, and anything else is read as header-less line blocks.
    pub fn sniff(content: &str) -> DatDialect {
        let first = content
            .trim_start_matches('\u{feff}')
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        if first.starts_with("clrmamepro") {
            DatDialect::ClrMamePro
        } else if first.starts_with('<') {
            DatDialect::Logiqx
        } else {
            DatDialect::ClrMamePro
        }
    }
}

/// Header and games of a checksum database, before platform resolution.
#[derive(Debug, Clone, Default)]
pub struct DatFile {
    pub name: String,
    pub description: String,
    pub version: String,
    pub games: Vec<DatGame>,
}

/// A single game entry. `name` is empty for ROMs declared outside a named game.
#[derive(Debug, Clone, Default)]
pub struct DatGame {
    pub name: String,
    pub roms: Vec<DatRom>,
}

/// A single ROM entry within a game. Hashes are uppercase hex or empty.
#[derive(Debug, Clone, Default)]
pub struct DatRom {
    pub name: String,
    pub size: u64,
    pub crc: String,
    pub md5: String,
    pub sha1: String,
}

/// Parse a checksum database and flatten it into canonical records.
///
/// `platform` overrides header inference. Without it, the header title must
/// match one of the known patterns or the call fails with
/// [`DatError::UnresolvedPlatform`].
pub fn parse_checksum_db(content: &str, platform: Option<Platform>) -> Result<ChecksumSet, DatError> {
    let dat = parse_dat(content)?;

    let platform = match platform {
        Some(p) => p,
        None => platform_from_header(&dat.name)
            .ok_or_else(|| DatError::unresolved_platform(dat.name.clone()))?,
    };

    let mut records = Vec::new();
    for game in &dat.games {
        for rom in &game.roms {
            let title = if game.name.is_empty() {
                rom.name.clone()
            } else {
                game.name.clone()
            };
            records.push(ChecksumRecord {
                game_title: title,
                platform,
                crc32: rom.crc.clone(),
                md5: rom.md5.clone(),
                sha1: rom.sha1.clone(),
                size: rom.size,
            });
        }
    }

    log::debug!(
        "Parsed DAT '{}': {} games, {} ROM records, platform {}",
        dat.name,
        dat.games.len(),
        records.len(),
        platform
    );

    Ok(ChecksumSet {
        source: dat.name,
        platform,
        records,
    })
}

/// Read and parse a checksum database from disk.
pub fn parse_checksum_file(path: &Path, platform: Option<Platform>) -> Result<ChecksumSet, DatError> {
    let content = std::fs::read_to_string(path)?;
    parse_checksum_db(&content, platform)
}

/// Parse either dialect into a [`DatFile`].
pub fn parse_dat(content: &str) -> Result<DatFile, DatError> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Err(DatError::invalid_dat("Empty DAT file"));
    }
    match DatDialect::sniff(content) {
        DatDialect::Logiqx => parse_xml(content),
        DatDialect::ClrMamePro => parse_clrmamepro(content),
    }
}

fn normalize_hash(value: &str) -> String {
    value.trim().to_uppercase()
}

fn parse_size(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Logiqx XML parser
// ---------------------------------------------------------------------------

fn parse_xml(content: &str) -> Result<DatFile, DatError> {
    let mut xml = Reader::from_reader(content.as_bytes());
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut dat = DatFile::default();

    let mut saw_root = false;
    let mut depth = 0usize;
    let mut in_header = false;
    let mut current_tag = String::new();
    let mut current_game: Option<DatGame> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                depth += 1;
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "datafile" => saw_root = true,
                    "header" => in_header = true,
                    "game" | "machine" => {
                        current_game = Some(DatGame {
                            name: name_attribute(e)?,
                            roms: Vec::new(),
                        });
                    }
                    "rom" => push_rom(&mut current_game, e)?,
                    _ => current_tag = tag_name,
                }
            }
            Event::Empty(ref e) => {
                if e.name().as_ref() == b"rom" {
                    push_rom(&mut current_game, e)?;
                }
            }
            Event::Text(ref e) => {
                if in_header {
                    let text = e.unescape()?.to_string();
                    match current_tag.as_str() {
                        "name" => dat.name = text,
                        "description" => dat.description = text,
                        "version" => dat.version = text,
                        _ => {}
                    }
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"header" => in_header = false,
                    b"game" | b"machine" => {
                        if let Some(game) = current_game.take() {
                            dat.games.push(game);
                        }
                    }
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(DatError::invalid_dat(format!(
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
        return Err(DatError::invalid_dat("Missing <datafile> root element"));
    }
    if dat.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in XML DAT file",
        ));
    }

    Ok(dat)
}

fn name_attribute(e: &BytesStart<'_>) -> Result<String, DatError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Ok(String::new())
}

fn push_rom(game: &mut Option<DatGame>, e: &BytesStart<'_>) -> Result<(), DatError> {
    let rom = parse_xml_rom_attributes(e)?;
    match game {
        Some(game) => game.roms.push(rom),
        None => log::debug!("Ignoring ROM '{}' outside a game element", rom.name),
    }
    Ok(())
}

fn parse_xml_rom_attributes(e: &BytesStart<'_>) -> Result<DatRom, DatError> {
    let mut rom = DatRom::default();

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"name" => rom.name = value.to_string(),
            b"size" => rom.size = parse_size(&value),
            b"crc" => rom.crc = normalize_hash(&value),
            b"md5" => rom.md5 = normalize_hash(&value),
            b"sha1" => rom.sha1 = normalize_hash(&value),
            _ => {}
        }
    }

    Ok(rom)
}

// ---------------------------------------------------------------------------
// ClrMamePro DAT parser
// ---------------------------------------------------------------------------

/// Block currently open in a ClrMamePro file.
enum Block {
    Header,
    Game(DatGame),
    Other,
}

/// Parse a ClrMamePro format DAT file.
///
/// Format:
/// ```text
/// clrmamepro (
///     name "System Name"
///     version 20240101-000000
/// )
///
/// game (
///     name "Game Name (Region)"
///     rom ( name "Game Name (Region).ext" size 12345 crc AABBCCDD md5 ... sha1 ... )
/// )
/// ```
///
/// A block may also sit on one line (`game ( name "X" rom ( ... ) )`).
/// A `rom ( ... )` line outside any game block becomes a game of its own
/// with an empty name.
fn parse_clrmamepro(content: &str) -> Result<DatFile, DatError> {
    let mut dat = DatFile::default();
    let mut block: Option<Block> = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if block.is_none() {
            if let Some(block_type) = detect_block_start(trimmed) {
                block = Some(match block_type.as_str() {
                    "clrmamepro" => Block::Header,
                    "game" | "machine" => Block::Game(DatGame::default()),
                    _ => Block::Other,
                });
            } else if let Some((block_type, inner)) = split_inline_block(trimmed) {
                let tokens = tokenize_rom_line(inner);
                match block_type.as_str() {
                    "clrmamepro" => apply_header_tokens(&mut dat, &tokens),
                    "game" | "machine" => dat.games.push(game_from_tokens(&tokens)),
                    "rom" => {
                        if let Some(rom) = rom_from_tokens(&tokens) {
                            dat.games.push(DatGame {
                                name: String::new(),
                                roms: vec![rom],
                            });
                        }
                    }
                    _ => {}
                }
            }
            continue;
        }

        if trimmed == ")" {
            if let Some(Block::Game(game)) = block.take() {
                dat.games.push(game);
            }
            continue;
        }

        let Some((key, value)) = parse_kv(trimmed) else {
            continue;
        };
        match block.as_mut() {
            Some(Block::Header) => match key {
                "name" => dat.name = value,
                "description" => dat.description = value,
                "version" => dat.version = value,
                _ => {}
            },
            Some(Block::Game(game)) => match key {
                "name" if game.name.is_empty() => game.name = value,
                "rom" => {
                    if let Some(rom) = parse_clr_rom_inline(&value) {
                        game.roms.push(rom);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    // Unterminated game block at EOF
    if let Some(Block::Game(game)) = block {
        dat.games.push(game);
    }

    if dat.name.is_empty() && dat.games.is_empty() {
        return Err(DatError::invalid_dat(
            "No header or games found in ClrMamePro DAT file",
        ));
    }

    Ok(dat)
}

/// Detect a block start like `clrmamepro (` or `game (`.
fn detect_block_start(line: &str) -> Option<String> {
    let stripped = line.trim_end();
    let block_type = stripped.strip_suffix('(')?.trim();
    if !block_type.is_empty() && block_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some(block_type.to_lowercase());
    }
    None
}

/// Parse a key-value line like `name "Some Value"` or `version 20240101`.
/// For `rom ( ... )` lines, the value is the content inside outer parens.
fn parse_kv(line: &str) -> Option<(&str, String)> {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("rom") {
        let rest = rest.trim();
        if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            return Some(("rom", inner.trim().to_string()));
        }
    }

    let mut parts = trimmed.splitn(2, |c: char| c.is_ascii_whitespace());
    let key = parts.next()?.trim();
    let raw_value = parts.next()?.trim();

    let value = raw_value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw_value)
        .to_string();

    Some((key, value))
}

/// Split a block opened and closed on one line, `game ( ... )`, into its
/// lowercase type and the text between the outer parens.
fn split_inline_block(line: &str) -> Option<(String, &str)> {
    let open = line.find('(')?;
    let block_type = line[..open].trim();
    if block_type.is_empty() || !block_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let inner = line[open + 1..].trim_end().strip_suffix(')')?;
    Some((block_type.to_lowercase(), inner.trim()))
}

fn apply_header_tokens(dat: &mut DatFile, tokens: &[String]) {
    for pair in tokens.chunks(2) {
        if let [key, value] = pair {
            match key.as_str() {
                "name" => dat.name = value.clone(),
                "description" => dat.description = value.clone(),
                "version" => dat.version = value.clone(),
                _ => {}
            }
        }
    }
}

/// Build a game from the tokens of a one-line game block. Nested groups
/// other than `rom ( ... )` are skipped.
fn game_from_tokens(tokens: &[String]) -> DatGame {
    let mut game = DatGame::default();
    let mut i = 0;
    while i < tokens.len() {
        let key = tokens[i].as_str();
        if tokens.get(i + 1).is_some_and(|t| t == "(") {
            let body = i + 2;
            let end = tokens[body..]
                .iter()
                .position(|t| t == ")")
                .map_or(tokens.len(), |p| body + p);
            if key == "rom" {
                if let Some(rom) = rom_from_tokens(&tokens[body..end]) {
                    game.roms.push(rom);
                }
            }
            i = end + 1;
            continue;
        }
        if key == "name" && game.name.is_empty() {
            if let Some(value) = tokens.get(i + 1) {
                game.name = value.clone();
            }
        }
        i += 2;
    }
    game
}

/// Parse an inline ROM entry like:
/// `name "Game (Region).ext" size 12345 crc AABBCCDD md5 ... sha1 ...`
fn parse_clr_rom_inline(inner: &str) -> Option<DatRom> {
    rom_from_tokens(&tokenize_rom_line(inner))
}

fn rom_from_tokens(tokens: &[String]) -> Option<DatRom> {
    let mut rom = DatRom::default();

    let mut pairs = tokens.iter();
    while let Some(key) = pairs.next() {
        let Some(value) = pairs.next() else { break };
        match key.as_str() {
            "name" => rom.name = value.clone(),
            "size" => rom.size = parse_size(value),
            "crc" => rom.crc = normalize_hash(value),
            "md5" => rom.md5 = normalize_hash(value),
            "sha1" => rom.sha1 = normalize_hash(value),
            _ => {}
        }
    }

    if rom.name.is_empty() {
        return None;
    }
    Some(rom)
}

/// Tokenize a ROM line, respecting quoted strings.
/// `name "Game (Region).ext" size 12345 crc AB` → ["name", "Game (Region).ext", "size", "12345", "crc", "AB"]
fn tokenize_rom_line(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            chars.next();
        }

        let Some(&first) = chars.peek() else { break };

        let mut token = String::new();
        if first == '"' {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_ascii_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    tokens
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
