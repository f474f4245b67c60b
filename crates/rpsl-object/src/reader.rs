//! Splits RPSL text into objects.

use crate::error::ReadError;
use crate::object::RpslObject;
use tracing::debug;

/// Number of lines kept when quoting a bad object.
const EXCERPT_LINES: usize = 3;

/// Iterator over the blank-line separated paragraphs of an RPSL document.
///
/// `%` remark lines are dropped; paragraphs holding nothing but `#` comments
/// are skipped.
pub struct ObjectReader<'a> {
    lines: std::iter::Peekable<std::str::Lines<'a>>,
}

impl<'a> ObjectReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().peekable(),
        }
    }
}

impl Iterator for ObjectReader<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            while self.lines.next_if(|l| l.trim().is_empty()).is_some() {}
            self.lines.peek()?;

            let mut paragraph = String::new();
            let mut has_content = false;
            while let Some(line) = self.lines.next_if(|l| !l.trim().is_empty()) {
                if line.starts_with('%') {
                    continue;
                }
                has_content |= !line.starts_with('#');
                paragraph.push_str(line);
                paragraph.push('\n');
            }

            if has_content {
                return Some(paragraph);
            }
        }
    }
}

/// Parses every object in `text`, in input order.
///
/// A paragraph that fails to parse yields a [`ReadError`] carrying an excerpt;
/// the remaining paragraphs are still read.
pub fn read_objects(text: &str) -> impl Iterator<Item = Result<RpslObject, ReadError>> + '_ {
    ObjectReader::new(text).map(|paragraph| {
        RpslObject::parse(&paragraph).map_err(|source| {
            let excerpt = excerpt(&paragraph);
            debug!("failed to parse object '{}': {}", excerpt, source);
            ReadError { excerpt, source }
        })
    })
}

fn excerpt(paragraph: &str) -> String {
    let lines: Vec<&str> = paragraph.lines().collect();
    let mut text = lines
        .iter()
        .take(EXCERPT_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join(" / ");
    if lines.len() > EXCERPT_LINES {
        text.push_str(" ...");
    }
    text
}
