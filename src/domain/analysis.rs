//! Tag analysis: classification, interval matching, payload reassembly
//!
//! A single pass over the raw tag sequence produces one analysed tag per raw
//! tag, in the same order. Starts and stops are cross-linked by index into
//! the analysed sequence, and consecutive same-alias vardata tags are chained
//! into payload fragments. All matching state is owned by the pass itself, so
//! re-running analysis on the same input is idempotent.

use crate::domain::codec::RawTag;
use crate::domain::definitions::{DefKind, DefinitionTable};
use crate::domain::time::{TickConverter, TimeValue};

/// Payload bytes a root vardata fragment can carry alongside the length
const ROOT_FRAGMENT_BYTES: usize = 3;

/// Payload bytes each continuation fragment can carry
const CONT_FRAGMENT_BYTES: usize = 4;

/// One fragment of a variable-length payload spread across consecutive
/// same-alias vardata tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDataFragment {
    /// Index of the previous fragment in this chain, none for the root
    pub prev: Option<usize>,
    /// 0-based position within the chain
    pub fragment_index: usize,
    /// Total payload length in bytes, declared by the root fragment
    pub total_len: usize,
    /// Bytes this fragment contributes to the payload
    pub bytes: Vec<u8>,
    /// Whether this fragment completes the payload
    pub is_last: bool,
}

/// Structural classification of one analysed tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Untyped,
    Start { matched_stop: Option<usize> },
    Stop { matched_start: Option<usize> },
    Event,
    Data,
    VarData(VarDataFragment),
}

impl TagKind {
    /// Tick-based tags carry a timestamp in their data field
    pub fn is_tick_based(&self) -> bool {
        matches!(
            self,
            TagKind::Start { .. } | TagKind::Stop { .. } | TagKind::Event
        )
    }
}

/// The classified, position-aware form of one raw tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysedTag {
    /// Position in the analysed sequence
    pub index: usize,
    pub id: u16,
    pub data: u32,
    /// Alias from the definition table, none when the id is unknown
    pub alias: Option<String>,
    pub kind: TagKind,
}

/// Classify a raw tag sequence and cross-link starts, stops and vardata
/// chains. The output has the same length and order as the input.
pub fn analyse(raw: &[RawTag], defs: &DefinitionTable) -> Vec<AnalysedTag> {
    let mut tags: Vec<AnalysedTag> = Vec::with_capacity(raw.len());

    // Indices of starts that have not been closed yet, most recent last
    let mut open_starts: Vec<usize> = Vec::new();

    for (index, raw_tag) in raw.iter().enumerate() {
        let (alias, mut kind) = match defs.get(raw_tag.id) {
            None => (None, TagKind::Untyped),
            Some(def) => {
                let kind = match def.kind {
                    DefKind::Untyped => TagKind::Untyped,
                    DefKind::Start => TagKind::Start { matched_stop: None },
                    DefKind::Stop => TagKind::Stop { matched_start: None },
                    DefKind::Event => TagKind::Event,
                    DefKind::Data => TagKind::Data,
                    DefKind::VarData => {
                        TagKind::VarData(next_fragment(tags.last(), &def.alias, raw_tag.data))
                    }
                };
                (Some(def.alias.clone()), kind)
            }
        };

        match &mut kind {
            TagKind::Start { .. } => {
                open_starts.push(index);
            }
            TagKind::Stop { matched_start } => {
                // Nearest enclosing open start with the same alias; starts of
                // other aliases may sit above it on the stack and stay open
                if let Some(pos) = open_starts.iter().rposition(|&j| tags[j].alias == alias) {
                    let start_index = open_starts.remove(pos);
                    *matched_start = Some(start_index);
                    if let TagKind::Start { matched_stop } = &mut tags[start_index].kind {
                        *matched_stop = Some(index);
                    }
                }
                // No same-alias open start: the stop stays unmatched
            }
            _ => {}
        }

        tags.push(AnalysedTag {
            index,
            id: raw_tag.id,
            data: raw_tag.data,
            alias,
            kind,
        });
    }

    tags
}

/// Build the vardata fragment for the tag currently being analysed.
///
/// The tag continues a chain only when the immediately preceding analysed tag
/// is a non-final vardata fragment of the same alias; anything else starts a
/// fresh chain.
fn next_fragment(previous: Option<&AnalysedTag>, alias: &str, data: u32) -> VarDataFragment {
    let link = previous.and_then(|tag| match &tag.kind {
        TagKind::VarData(fragment)
            if !fragment.is_last && tag.alias.as_deref() == Some(alias) =>
        {
            Some((tag.index, fragment))
        }
        _ => None,
    });

    let be = data.to_be_bytes();
    match link {
        None => {
            // Root: top 8 bits carry the total length, the low 3 bytes carry
            // the first payload bytes
            let total_len = (data >> 24) as usize;
            let take = total_len.min(ROOT_FRAGMENT_BYTES);
            VarDataFragment {
                prev: None,
                fragment_index: 0,
                total_len,
                bytes: be[1..1 + take].to_vec(),
                is_last: total_len <= ROOT_FRAGMENT_BYTES,
            }
        }
        Some((prev_index, prev_fragment)) => {
            let fragment_index = prev_fragment.fragment_index + 1;
            let offset = ROOT_FRAGMENT_BYTES + CONT_FRAGMENT_BYTES * (fragment_index - 1);
            let remaining = prev_fragment.total_len.saturating_sub(offset);
            let take = remaining.min(CONT_FRAGMENT_BYTES);
            VarDataFragment {
                prev: Some(prev_index),
                fragment_index,
                total_len: prev_fragment.total_len,
                bytes: be[..take].to_vec(),
                is_last: remaining < CONT_FRAGMENT_BYTES,
            }
        }
    }
}

/// The analysed tag sequence together with the tick-to-time projection
pub struct AnalysedLog {
    tags: Vec<AnalysedTag>,
    to_time: TickConverter,
}

impl AnalysedLog {
    /// Run analysis over a materialized raw tag sequence
    pub fn analyse(raw: &[RawTag], defs: &DefinitionTable, to_time: TickConverter) -> Self {
        AnalysedLog {
            tags: analyse(raw, defs),
            to_time,
        }
    }

    pub fn tags(&self) -> &[AnalysedTag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Project a raw tick value through the injected conversion
    pub fn time(&self, ticks: u32) -> TimeValue {
        (self.to_time)(ticks)
    }

    pub fn time_str(&self, ticks: u32) -> String {
        self.time(ticks).format()
    }

    /// Scaled difference between two tick values, formatted with the stop
    /// side's unit and precision
    pub fn time_diff_str(&self, start_ticks: u32, stop_ticks: u32) -> String {
        let start = self.time(start_ticks);
        let stop = self.time(stop_ticks);
        TimeValue {
            value: stop.value - start.value,
            unit: stop.unit,
            precision: stop.precision,
        }
        .format()
    }

    /// Reconstruct the payload of a vardata chain from its final fragment.
    ///
    /// Returns the concatenation of every fragment's bytes from the root to
    /// the given index, or none if the index is not an `is_last` fragment.
    pub fn payload(&self, index: usize) -> Option<Vec<u8>> {
        let tag = self.tags.get(index)?;
        let TagKind::VarData(fragment) = &tag.kind else {
            return None;
        };
        if !fragment.is_last {
            return None;
        }

        let mut chunks = vec![fragment.bytes.as_slice()];
        let mut prev = fragment.prev;
        while let Some(j) = prev {
            let TagKind::VarData(f) = &self.tags[j].kind else {
                break;
            };
            chunks.push(f.bytes.as_slice());
            prev = f.prev;
        }

        let mut payload = Vec::with_capacity(fragment.total_len);
        for chunk in chunks.iter().rev() {
            payload.extend_from_slice(chunk);
        }
        Some(payload)
    }
}
