//! Subversion backend
//!
//! Uses `svnversion` for the revision range, `svn info` for the repository
//! root and `svn log --xml` for the history.

use crate::errors::{ReleaseNotesError, Result};
use crate::vcs::{find_tool, run_tool, HistoryEntry, RevisionRange, VersionControl};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct SvnClient;

impl SvnClient {
    pub fn new() -> Self {
        Self
    }
}

impl VersionControl for SvnClient {
    fn name(&self) -> &'static str {
        "svn"
    }

    fn revision_range(&self, dir: &Path) -> Result<(String, RevisionRange)> {
        let svnversion = find_tool("svnversion")?;
        let svn = find_tool("svn")?;

        let version = run_tool("svnversion", &svnversion, &["-n", "."], dir)?;
        let range = parse_svnversion(&version)?;

        let root = run_tool("svn", &svn, &["info", "--show-item", "repos-root-url", "."], dir)?;
        Ok((root.trim().to_string(), range))
    }

    fn history(&self, dir: &Path) -> Result<Vec<HistoryEntry>> {
        let svn = find_tool("svn")?;
        let xml = run_tool("svn", &svn, &["log", "--xml", "."], dir)?;
        parse_svn_log(&xml)
    }
}

/// Parse `svnversion` output such as `4123:4168MS`.
///
/// `M` marks local modifications, `S` a switched subtree and `P` a sparse
/// checkout; the last one does not affect the range.
pub fn parse_svnversion(output: &str) -> Result<RevisionRange> {
    let output = output.trim();
    let unversioned = || ReleaseNotesError::VcsUnavailable {
        tool: "svn".to_string(),
        reason: format!("svnversion reported '{}'", output),
    };

    if !output.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(unversioned());
    }

    let revisions = output.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let flags = &output[revisions.len()..];
    let mut modified = false;
    let mut switched = false;
    for flag in flags.chars() {
        match flag {
            'M' => modified = true,
            'S' => switched = true,
            'P' => {}
            _ => return Err(unversioned()),
        }
    }

    let (start, end) = revisions.split_once(':').unwrap_or((revisions, revisions));
    let is_revision = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !is_revision(start) || !is_revision(end) {
        return Err(unversioned());
    }

    Ok(RevisionRange {
        start: start.to_string(),
        end: end.to_string(),
        modified,
        switched,
    })
}

/// Fields of a `<logentry>` collected while reading.
#[derive(Debug, Default)]
struct PendingEntry {
    revision: String,
    author: Option<String>,
    msg: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum LogField {
    Author,
    Msg,
}

fn log_error(e: impl std::fmt::Display) -> ReleaseNotesError {
    ReleaseNotesError::VcsQuery(format!("Failed to parse svn log: {}", e))
}

/// Parse the output of `svn log --xml`, keeping the entry order.
///
/// Message text is taken verbatim, including leading and trailing
/// whitespace.
pub fn parse_svn_log(xml: &str) -> Result<Vec<HistoryEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut history = Vec::new();
    let mut entry: Option<PendingEntry> = None;
    let mut field: Option<LogField> = None;

    loop {
        match reader.read_event().map_err(log_error)? {
            Event::Start(start) => match start.name().as_ref() {
                b"logentry" => {
                    let revision = start
                        .try_get_attribute("revision")
                        .map_err(log_error)?
                        .ok_or_else(|| log_error("logentry without revision"))?
                        .unescape_value()
                        .map_err(log_error)?
                        .into_owned();
                    entry = Some(PendingEntry {
                        revision,
                        ..PendingEntry::default()
                    });
                }
                b"author" => field = Some(LogField::Author),
                b"msg" => {
                    field = Some(LogField::Msg);
                    if let Some(entry) = entry.as_mut() {
                        entry.msg.get_or_insert_with(String::new);
                    }
                }
                _ => field = None,
            },
            Event::Text(text) => {
                if let (Some(entry), Some(field)) = (entry.as_mut(), field) {
                    let text = text.unescape().map_err(log_error)?;
                    let target = match field {
                        LogField::Author => &mut entry.author,
                        LogField::Msg => &mut entry.msg,
                    };
                    target.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::End(end) => {
                field = None;
                if end.name().as_ref() == b"logentry" {
                    if let Some(done) = entry.take() {
                        history.push(HistoryEntry::new(
                            done.revision,
                            done.author.unwrap_or_default(),
                            done.msg.as_deref(),
                        ));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_revision() {
        let range = parse_svnversion("4168").unwrap();
        assert_eq!(range.start, "4168");
        assert_eq!(range.end, "4168");
        assert!(!range.modified);
        assert!(!range.switched);
    }

    #[test]
    fn test_parse_mixed_revision_with_flags() {
        let range = parse_svnversion("4123:4168MS\n").unwrap();
        assert_eq!(range.start, "4123");
        assert_eq!(range.end, "4168");
        assert!(range.modified);
        assert!(range.switched);

        let sparse = parse_svnversion("17P").unwrap();
        assert_eq!(sparse.end, "17");
        assert!(!sparse.modified);
    }

    #[test]
    fn test_unversioned_directory_is_rejected() {
        for output in ["Unversioned directory", "Uncommitted local addition, copy or move", "exported", "12X", "1:", ""] {
            let err = parse_svnversion(output).unwrap_err();
            assert!(
                matches!(err, ReleaseNotesError::VcsUnavailable { .. }),
                "expected failure for {:?}",
                output
            );
        }
    }

    #[test]
    fn test_parse_log_keeps_order_and_duplicates() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry revision="5">
<author>alice</author>
<date>2021-08-02T10:25:58.620988Z</date>
<msg>fix</msg>
</logentry>
<logentry revision="4">
<author>bob</author>
<date>2021-08-01T09:00:00.000000Z</date>
<msg>init</msg>
</logentry>
<logentry revision="4">
<author>bob</author>
<date>2021-08-01T09:00:00.000000Z</date>
<msg>init</msg>
</logentry>
</log>"#;

        let history = parse_svn_log(xml).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], HistoryEntry::new("5", "alice", Some("fix")));
        assert_eq!(history[1], HistoryEntry::new("4", "bob", Some("init")));
        assert_eq!(history[1], history[2]);
    }

    #[test]
    fn test_parse_log_without_author_or_message() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<log>
<logentry revision="1">
<date>2020-01-01T00:00:00.000000Z</date>
</logentry>
<logentry revision="2">
<author>carol</author>
<msg>first line&amp;more

second line</msg>
</logentry>
</log>"#;

        let history = parse_svn_log(xml).unwrap();
        assert_eq!(history[0].author, "");
        assert_eq!(history[0].message, "(no message)");
        assert_eq!(history[1].message, "first line&more\nsecond line");
    }

    #[test]
    fn test_parse_log_keeps_message_whitespace() {
        let xml = "<?xml version=\"1.0\"?>\n<log>\n<logentry revision=\"9\">\n<author>erin</author>\n<msg>  indented\n\nnext  </msg>\n</logentry>\n</log>";

        let history = parse_svn_log(xml).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].author, "erin");
        assert_eq!(history[0].message, "  indented\nnext  ");
    }

    #[test]
    fn test_malformed_log_is_query_error() {
        let err = parse_svn_log("<log><logentry revision=\"1\"><msg>x</author></logentry></log>").unwrap_err();
        assert!(matches!(err, ReleaseNotesError::VcsQuery(_)));
    }

    #[test]
    fn test_empty_log() {
        let history = parse_svn_log("<?xml version=\"1.0\"?>\n<log>\n</log>").unwrap();
        assert!(history.is_empty());
    }
}
