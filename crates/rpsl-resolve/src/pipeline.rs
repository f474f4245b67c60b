//! Input, resolution and output for one run.

use crate::emitter::Emitter;
use crate::error::{ResolveError, Result};
use rpsl_object::read_objects;
use rpsl_policy::PolicyDocument;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Counts and rendered text from one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Objects read successfully.
    pub objects: usize,
    /// Paragraphs that failed to parse.
    pub skipped: usize,
    /// AutNums built from the document.
    pub aut_nums: usize,
    pub output: String,
}

/// Parses `text`, builds the document and renders it with `emitter`.
///
/// Objects that fail to parse are logged and skipped.
pub fn resolve_text(text: &str, emitter: &Emitter) -> Result<Resolution> {
    let mut skipped = 0;
    let objects: Vec<_> = read_objects(text)
        .filter_map(|result| match result {
            Ok(object) => Some(object),
            Err(e) => {
                warn!("Unable to parse object, skipping: {}", e);
                skipped += 1;
                None
            }
        })
        .collect();
    let object_count = objects.len();

    let document = PolicyDocument::from_objects(objects);
    let aut_nums = document.aut_nums();
    info!(
        "Resolved {} aut-nums from {} objects ({} skipped)",
        aut_nums.len(),
        object_count,
        skipped
    );

    let output = emitter.emit(&document, &aut_nums)?;
    Ok(Resolution {
        objects: object_count,
        skipped,
        aut_nums: aut_nums.len(),
        output,
    })
}

/// Reads the whole input file, or stdin when `path` is `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| ResolveError::file(path, e)),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Writes `text` to the output file, or stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, text).map_err(|e| ResolveError::file(path, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bad_objects_are_skipped() {
        let text = "route-set: rs-a\nmembers: 1.1.1.0/24\n\n\
                    this line has no separator\n\n\
                    aut-num: AS1\nas-name: ONE\nexport: to AS2 at 1.1.1.1 announce rs-a\n";
        let resolution = resolve_text(text, &Emitter::Null).unwrap();
        assert_eq!(resolution.objects, 2);
        assert_eq!(resolution.skipped, 1);
        assert_eq!(resolution.aut_nums, 1);
        assert_eq!(resolution.output, "");
    }

    #[test]
    fn test_empty_input() {
        let resolution = resolve_text("", &Emitter::Text { aut_num: None }).unwrap();
        assert_eq!(resolution.objects, 0);
        assert_eq!(resolution.output, "");
    }

    #[test]
    fn test_missing_input_file() {
        assert!(matches!(
            read_input(Some(Path::new("/nonexistent/input.rpsl"))),
            Err(ResolveError::File { .. })
        ));
    }
}
