//! Listing renderer for analysed tag sequences

use crate::domain::{AnalysedLog, AnalysedTag, TagKind};
use owo_colors::OwoColorize;

/// Minimum width of the alias column
const MIN_ALIAS_WIDTH: usize = 8;

/// Width of the time/data column
const VALUE_WIDTH: usize = 20;

/// Render the analysed log as a listing, one line per tag.
///
/// `alias_width_hint` is typically the longest alias in the definition table
/// so that runs over the same table align identically regardless of which
/// ids actually occur.
pub fn format_log(log: &AnalysedLog, alias_width_hint: usize, color: bool) -> String {
    let alias_width = log
        .tags()
        .iter()
        .filter_map(|tag| tag.alias.as_ref().map(|alias| alias.len()))
        .max()
        .unwrap_or(0)
        .max(alias_width_hint)
        .max(MIN_ALIAS_WIDTH);
    let index_width = log.len().to_string().len();

    let mut lines = Vec::with_capacity(log.len());
    for tag in log.tags() {
        lines.push(format_tag(log, tag, alias_width, index_width, color));
    }
    lines.join("\n")
}

fn format_tag(
    log: &AnalysedLog,
    tag: &AnalysedTag,
    alias_width: usize,
    index_width: usize,
    color: bool,
) -> String {
    let mut line = format!("{:>width$}: ", tag.index, width = index_width);

    // Kind sigil and alias column
    let sigil = match &tag.kind {
        TagKind::Start { .. } => '<',
        TagKind::Stop { .. } => '>',
        TagKind::Event => '!',
        TagKind::Data => 'D',
        TagKind::VarData(_) => 'V',
        TagKind::Untyped => '?',
    };
    let alias_text = match &tag.alias {
        Some(alias) => alias.clone(),
        None => format!("[0x{:04X}]", tag.id),
    };
    // Pad before coloring so ANSI codes never break alignment
    let alias_field = format!("{:<width$}", alias_text, width = alias_width + 2);
    let alias_field = if color {
        match &tag.kind {
            TagKind::Start { .. } => alias_field.bold().green().to_string(),
            TagKind::Stop { .. } => alias_field.bold().red().to_string(),
            TagKind::Event => alias_field.bold().yellow().to_string(),
            TagKind::Data => alias_field.bold().blue().to_string(),
            TagKind::VarData(_) => alias_field.bold().magenta().to_string(),
            TagKind::Untyped => alias_field,
        }
    } else {
        alias_field
    };
    line.push(sigil);
    line.push(' ');
    line.push_str(&alias_field);

    // Time or data column
    if tag.kind.is_tick_based() {
        line.push_str(&format!(
            "{:>width$}  ",
            log.time_str(tag.data),
            width = VALUE_WIDTH
        ));
    } else {
        let value = format!("{:>width$}  ", format!("[ 0x{:08X} ]", tag.data), width = VALUE_WIDTH);
        if color {
            line.push_str(&value.bold().blue().to_string());
        } else {
            line.push_str(&value);
        }
    }

    // Cross-links: match arrows, time differences, reassembled payloads
    match &tag.kind {
        TagKind::Start { matched_stop } => {
            line.push_str(&format!(
                "--->[ {:>width$} ]",
                index_or_question(*matched_stop),
                width = index_width
            ));
        }
        TagKind::Stop { matched_start } => {
            line.push_str(&format!(
                "[ {:>iw$} ]---({:^aw$})--->[ {:>iw$} ]",
                index_or_question(*matched_start),
                tag.alias.as_deref().unwrap_or(""),
                tag.index,
                iw = index_width,
                aw = alias_width
            ));
            if let Some(start_index) = matched_start {
                let start_ticks = log.tags()[*start_index].data;
                line.push_str(&format!(
                    "{:>width$}",
                    log.time_diff_str(start_ticks, tag.data),
                    width = VALUE_WIDTH
                ));
            }
        }
        TagKind::VarData(fragment) => {
            line.push_str(&format!("#{}", fragment.fragment_index));
            if let Some(payload) = log.payload(tag.index) {
                line.push_str(&format!(
                    " ==> \"{}\" ({} bytes)",
                    printable(&payload),
                    payload.len()
                ));
            }
        }
        _ => {}
    }

    line
}

fn index_or_question(index: Option<usize>) -> String {
    match index {
        Some(i) => i.to_string(),
        None => "?".to_string(),
    }
}

/// Payload bytes as ASCII, with a dot for anything non-printable
fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if (0x20..0x7F).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}
