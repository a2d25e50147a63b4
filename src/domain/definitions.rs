//! Tag definition table: maps numeric tag ids to a kind and an alias
//!
//! Definitions arrive as line-oriented text of the shape
//! `0xHHHH, kind:alias` (or `0xHHHH, alias` for untyped ids). The table is
//! built once per analysis run and read-only afterwards.

use crate::error::MtagsError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Regex for the hex id token: `0x` followed by hex digits
fn id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]+$").unwrap())
}

/// Structural role of a tag id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    /// No structural role
    Untyped,
    /// Opens a named interval
    Start,
    /// Closes a named interval
    Stop,
    /// Instantaneous occurrence
    Event,
    /// Single opaque 32-bit sample
    Data,
    /// One fragment of a multi-tag byte payload
    VarData,
}

/// One parsed definition: the kind prefix plus the human-readable alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub kind: DefKind,
    pub alias: String,
}

impl TagDefinition {
    /// Split a raw definition string into kind and alias. A missing or
    /// unrecognized prefix yields an untyped definition whose alias is the
    /// full string.
    pub fn parse(definition: &str) -> Self {
        let kinds = [
            ("start:", DefKind::Start),
            ("stop:", DefKind::Stop),
            ("event:", DefKind::Event),
            ("data:", DefKind::Data),
            ("vardata:", DefKind::VarData),
        ];
        for (prefix, kind) in kinds {
            if let Some(alias) = definition.strip_prefix(prefix) {
                return TagDefinition {
                    kind,
                    alias: alias.to_string(),
                };
            }
        }
        TagDefinition {
            kind: DefKind::Untyped,
            alias: definition.to_string(),
        }
    }
}

/// Mapping from tag id to definition, merged across loads (last write wins)
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    entries: HashMap<u16, TagDefinition>,
}

impl DefinitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the definition for a tag id
    pub fn get(&self, id: u16) -> Option<&TagDefinition> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest alias in the table, used by the renderer for
    /// column alignment
    pub fn max_alias_len(&self) -> usize {
        self.entries
            .values()
            .map(|d| d.alias.len())
            .max()
            .unwrap_or(0)
    }

    /// Merge definitions from line-oriented text into the table.
    ///
    /// Blank lines and `#` comments are ignored; malformed lines are skipped
    /// without aborting the load. Returns the number of ids that were not
    /// previously present (an overwrite does not count as new).
    pub fn load_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match Self::parse_line(line) {
                Ok((id, definition)) => {
                    if self.entries.insert(id, definition).is_none() {
                        added += 1;
                    }
                }
                Err(_) => continue,
            }
        }
        added
    }

    /// Parse one non-comment, non-blank definition line.
    fn parse_line(line: &str) -> Result<(u16, TagDefinition), MtagsError> {
        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() != 2 {
            return Err(MtagsError::MalformedDefinition(line.to_string()));
        }

        let id_token = tokens[0].trim();
        if !id_regex().is_match(id_token) {
            return Err(MtagsError::MalformedDefinition(line.to_string()));
        }
        let id = u16::from_str_radix(&id_token[2..], 16)
            .map_err(|_| MtagsError::MalformedDefinition(line.to_string()))?;

        Ok((id, TagDefinition::parse(tokens[1].trim())))
    }
}
