//! Log analysis use case
//!
//! Orchestrates the full workflow: load the definition table, import tag
//! codes from the log file, decode them and run the analysis pass.

use crate::domain::codec::{self, RawTag};
use crate::domain::time::TickConverter;
use crate::domain::{AnalysedLog, DefinitionTable};
use crate::error::Result;
use crate::infrastructure::{read_definition_lines, read_tag_codes};
use std::path::PathBuf;

/// Options for a single analysis run
pub struct AnalyzeOptions {
    /// Tag-code log file
    pub input: PathBuf,

    /// Definition table file (optional; without it every tag is untyped)
    pub definitions: Option<PathBuf>,

    /// Tick-to-time projection for tick-based tags
    pub to_time: TickConverter,
}

/// Result of an analysis run, including import counts for reporting
pub struct AnalyzeReport {
    pub imported_definitions: usize,
    pub imported_tags: usize,
    pub max_alias_len: usize,
    pub log: AnalysedLog,
}

/// Service for analyzing microtag logs
pub struct AnalyzeLogService;

impl AnalyzeLogService {
    /// Execute the analysis.
    ///
    /// Unreadable source files abort the run; individual undecodable codes
    /// and malformed definition lines are skipped and reflected only in the
    /// reported counts.
    pub fn execute(options: AnalyzeOptions) -> Result<AnalyzeReport> {
        // 1. Build the definition table
        let mut defs = DefinitionTable::new();
        let imported_definitions = match &options.definitions {
            Some(path) => {
                let lines = read_definition_lines(path)?;
                defs.load_lines(&lines)
            }
            None => 0,
        };

        // 2. Import and decode the tag codes
        let codes = read_tag_codes(&options.input)?;
        let raw = Self::decode_codes(&codes);
        let imported_tags = raw.len();

        // 3. Analyse
        let log = AnalysedLog::analyse(&raw, &defs, options.to_time);

        Ok(AnalyzeReport {
            imported_definitions,
            imported_tags,
            max_alias_len: defs.max_alias_len(),
            log,
        })
    }

    /// Decode tag codes, dropping the ones that fail
    fn decode_codes(codes: &[String]) -> Vec<RawTag> {
        codes
            .iter()
            .filter_map(|code| codec::decode(code).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{time, TagKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_execute_full_run() {
        let defs = temp_file("0x0000, start:Direct\n0x0001, stop:Direct\n");
        let input = temp_file("# log\nAAAABQAA\nAAAACgAB\n");

        let report = AnalyzeLogService::execute(AnalyzeOptions {
            input: input.path().to_path_buf(),
            definitions: Some(defs.path().to_path_buf()),
            to_time: time::ticks(),
        })
        .unwrap();

        assert_eq!(report.imported_definitions, 2);
        assert_eq!(report.imported_tags, 2);

        let tags = report.log.tags();
        assert_eq!(tags[0].kind, TagKind::Start { matched_stop: Some(1) });
        assert_eq!(tags[1].kind, TagKind::Stop { matched_start: Some(0) });
        assert_eq!(report.log.time_diff_str(tags[0].data, tags[1].data), "5 ticks");
    }

    #[test]
    fn test_execute_without_definitions() {
        let input = temp_file("AAAABQAA\n");

        let report = AnalyzeLogService::execute(AnalyzeOptions {
            input: input.path().to_path_buf(),
            definitions: None,
            to_time: time::ticks(),
        })
        .unwrap();

        assert_eq!(report.imported_definitions, 0);
        assert_eq!(report.imported_tags, 1);
        assert_eq!(report.log.tags()[0].kind, TagKind::Untyped);
    }

    #[test]
    fn test_undecodable_codes_are_counted_out() {
        // "!!!!!!!!" survives the 8-character filter but is not base64
        let input = temp_file("AAAABQAA\n!!!!!!!!\nAAAACgAB\n");

        let report = AnalyzeLogService::execute(AnalyzeOptions {
            input: input.path().to_path_buf(),
            definitions: None,
            to_time: time::ticks(),
        })
        .unwrap();

        assert_eq!(report.imported_tags, 2);
        assert_eq!(report.log.len(), 2);
    }

    #[test]
    fn test_missing_input_aborts() {
        let result = AnalyzeLogService::execute(AnalyzeOptions {
            input: PathBuf::from("/nonexistent/tags.log"),
            definitions: None,
            to_time: time::ticks(),
        });
        assert!(result.is_err());
    }
}
