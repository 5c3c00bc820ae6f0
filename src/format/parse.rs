//! Reading a dump back into (name, content) pairs

use lazy_static::lazy_static;
use regex::Regex;

use super::MarkerFormatter;
use crate::config::MarkerStyle;
use crate::error::{CollateError, Result};

lazy_static! {
    // Begin marker in any supported style; open and close are checked for consistency below
    static ref BEGIN_LINE: Regex =
        Regex::new(r"^(// =====|# =====|/\* =====|<!-- =====) Begin (.+) (=====|===== \*/|===== -->)$")
            .unwrap();
}

const STYLES: [MarkerStyle; 4] = [
    MarkerStyle::Slash,
    MarkerStyle::Hash,
    MarkerStyle::Block,
    MarkerStyle::Xml,
];

/// One block recovered from a dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub name: String,
    pub style: MarkerStyle,
    pub content: String,
}

fn malformed(offset: usize, reason: impl Into<String>) -> CollateError {
    CollateError::MalformedDump {
        offset,
        reason: reason.into(),
    }
}

/// Splits a dump into its blocks.
///
/// Content runs from the line after the begin marker up to the first
/// newline-delimited end marker carrying the same name.
pub fn parse_dump(text: &str) -> Result<Vec<ParsedBlock>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let after_blank = rest
            .strip_prefix('\n')
            .ok_or_else(|| malformed(pos, "expected blank line before begin marker"))?;
        let line_start = pos + 1;
        let line_len = after_blank
            .find('\n')
            .ok_or_else(|| malformed(line_start, "unterminated begin marker"))?;
        let line = &after_blank[..line_len];

        let caps = BEGIN_LINE
            .captures(line)
            .ok_or_else(|| malformed(line_start, format!("not a begin marker: {:?}", line)))?;
        let style = STYLES
            .into_iter()
            .find(|s| s.delimiters() == (&caps[1], &caps[3]))
            .ok_or_else(|| malformed(line_start, "mismatched marker delimiters"))?;
        let name = caps[2].to_string();

        let content_start = line_start + line_len + 1;
        let terminator = format!("\n{}\n", MarkerFormatter::new(style).end_line(&name));
        let content_len = text[content_start..]
            .find(&terminator)
            .ok_or_else(|| malformed(content_start, format!("missing end marker for {}", name)))?;

        blocks.push(ParsedBlock {
            name,
            style,
            content: text[content_start..content_start + content_len].to_string(),
        });
        pos = content_start + content_len + terminator.len();
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(style: MarkerStyle, files: &[(&str, &str)]) -> String {
        let formatter = MarkerFormatter::new(style);
        let mut out = Vec::new();
        for (name, content) in files {
            formatter.write_block(&mut out, name, content).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_recovers_exact_content() {
        let files = [
            ("a.hpp", "#pragma once\nint a();\n"),
            ("a.cpp", "int a() { return 1; }"),
            ("blank.cpp", ""),
            ("trailing.cpp", "x\n\n\n"),
        ];
        for style in STYLES {
            let blocks = parse_dump(&dump(style, &files)).unwrap();
            let recovered: Vec<(&str, &str)> = blocks
                .iter()
                .map(|b| (b.name.as_str(), b.content.as_str()))
                .collect();
            assert_eq!(recovered, files);
            assert!(blocks.iter().all(|b| b.style == style));
        }
    }

    #[test]
    fn test_other_files_end_marker_is_content() {
        let inner = "// ===== End other.cpp =====\n";
        let text = dump(MarkerStyle::Slash, &[("a.cpp", inner)]);
        let blocks = parse_dump(&text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, inner);
    }

    #[test]
    fn test_empty_dump() {
        assert!(parse_dump("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(
            parse_dump("garbage"),
            Err(CollateError::MalformedDump { offset: 0, .. })
        ));
        assert!(parse_dump("\n// ===== Begin a.cpp =====\nbody\n").is_err());
        assert!(parse_dump("\n// ===== Begin a.cpp ===== */\nx\n\n// ===== End a.cpp =====\n").is_err());
    }
}
