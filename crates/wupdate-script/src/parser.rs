//! Script compilation: segmentation on `;` and per-statement classification.
//!
//! Statements the classifier rejects are dropped from the compiled script.
//! They are logged at debug level and never stop compilation, so one bad
//! statement cannot prevent the rest of a script from running.

use thiserror::Error;
use tracing::debug;

use crate::ast::*;
use crate::text::{leading_blank_len, trim};

/// Statement terminator. Not escapable, even inside quotes.
pub const TERMINATOR: char = ';';

/// A raw statement, before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// 1-based line of the first non-blank character.
    pub line: usize,
}

/// Lazy iterator over the `;`-separated segments of a script.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: Option<&'a str>,
    line: usize,
}

/// Split `source` into statement segments.
pub fn segments(source: &str) -> Segments<'_> {
    Segments {
        rest: Some(source),
        line: 1,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let rest = self.rest?;
        let (text, remainder) = match rest.find(TERMINATOR) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + TERMINATOR.len_utf8()..])),
            None => (rest, None),
        };
        self.rest = remainder;

        let leading = leading_blank_len(text);
        let line = self.line + text[..leading].matches('\n').count();
        self.line += text.matches('\n').count();
        Some(Segment { text, line })
    }
}

/// Why a statement produced no directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    #[error("blank statement")]
    Blank,

    #[error("unknown directive")]
    Unknown,

    #[error("{keyword} requires `{marker}`")]
    MissingMarker {
        keyword: &'static str,
        marker: &'static str,
    },
}

/// Classify one raw statement.
///
/// Keywords are case-sensitive and tried in a fixed order; the first
/// matching prefix decides the kind.
pub fn classify(raw: &str) -> Result<DirectiveKind, Rejected> {
    let l = trim(raw);
    if l.is_empty() {
        return Err(Rejected::Blank);
    }

    if let Some(rest) = l.strip_prefix("MKDIR ") {
        return Ok(DirectiveKind::MakeDir(rest.to_string()));
    }
    if let Some(rest) = l.strip_prefix("MKFILE ") {
        return Ok(DirectiveKind::MakeFile(rest.to_string()));
    }
    if let Some(rest) = l.strip_prefix("DOWNLOAD ") {
        let (url, path) = rest.split_once(" TO ").ok_or(Rejected::MissingMarker {
            keyword: "DOWNLOAD",
            marker: " TO ",
        })?;
        return Ok(DirectiveKind::Download {
            url: url.to_string(),
            path: path.to_string(),
        });
    }
    if let Some(rest) = l.strip_prefix("COMPARE ") {
        let (left, right) = rest.split_once("==").ok_or(Rejected::MissingMarker {
            keyword: "COMPARE",
            marker: "==",
        })?;
        return Ok(DirectiveKind::Compare {
            left: trim(left).to_string(),
            right: trim(right).to_string(),
        });
    }
    if let Some(rest) = l.strip_prefix("PRINT ") {
        return Ok(DirectiveKind::Print(rest.to_string()));
    }
    if let Some(rest) = l.strip_prefix("READ ") {
        return Ok(DirectiveKind::Read(rest.to_string()));
    }
    if let Some(rest) = l.strip_prefix("SET ") {
        let (name, value) = rest.split_once('=').ok_or(Rejected::MissingMarker {
            keyword: "SET",
            marker: "=",
        })?;
        return Ok(DirectiveKind::Set {
            name: trim(name).to_string(),
            value: trim(value).to_string(),
        });
    }
    if let Some(rest) = l.strip_prefix("IF ") {
        return Ok(DirectiveKind::If(trim(rest).to_string()));
    }

    match l {
        "ELSE" => Ok(DirectiveKind::Else),
        "ENDIF" => Ok(DirectiveKind::EndIf),
        _ => Err(Rejected::Unknown),
    }
}

/// Compile script text into directives.
pub fn parse(source: &str) -> Script {
    let mut directives = Vec::new();
    for segment in segments(source) {
        match classify(segment.text) {
            Ok(kind) => directives.push(Directive {
                kind,
                line: segment.line,
            }),
            Err(Rejected::Blank) => {}
            Err(reason) => {
                debug!(line = segment.line, %reason, statement = trim(segment.text), "statement dropped");
            }
        }
    }
    Script { directives }
}
