//! Path grammar for addressing frames.
//!
//! An absolute path is a sequence of non-empty name segments separated by
//! `/`, optionally prefixed by `/`. The empty path and `"/"` both denote the
//! root. A relative path uses the same grammar but is resolved from a given
//! starting frame; the segments `.` (current frame) and `..` (parent frame)
//! are part of the grammar, while `/`-prefixing a relative path simply
//! anchors it at the root.
//!
//! Parsing is purely syntactic: malformed paths (empty segments from doubled
//! or trailing separators) are rejected before any tree walk.

use crate::errors::{FrameError, FrameResult};

pub const SEPARATOR: char = '/';

/// One step of a resolution walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Descend into the child with this name.
    Child(&'a str),
    /// Stay on the current frame (`.`).
    Current,
    /// Move to the parent frame (`..`).
    Parent,
}

/// Splits a path into segments, rejecting malformed syntax.
///
/// Returns an empty segment list for the root designators `""` and `"/"`.
pub fn parse(path: &str) -> FrameResult<Vec<Segment<'_>>> {
    let trimmed = path.strip_prefix(SEPARATOR).unwrap_or(path);
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::with_capacity(trimmed.matches(SEPARATOR).count() + 1);
    for raw in trimmed.split(SEPARATOR) {
        let segment = match raw {
            "" => return Err(FrameError::invalid_path(path, "empty path segment")),
            "." => Segment::Current,
            ".." => Segment::Parent,
            name => Segment::Child(name),
        };
        segments.push(segment);
    }
    Ok(segments)
}

/// Checks that `name` is usable as a frame name: non-empty, no separator,
/// and not one of the reserved walk segments.
pub fn validate_name(name: &str) -> FrameResult<()> {
    if name.is_empty() {
        return Err(FrameError::invalid_path(name, "frame name must not be empty"));
    }
    if name.contains(SEPARATOR) {
        return Err(FrameError::invalid_path(
            name,
            "frame name must not contain the path separator",
        ));
    }
    if name == "." || name == ".." {
        return Err(FrameError::invalid_path(name, "frame name is reserved"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("/")]
    fn test_parse_root_designators(#[case] path: &str) {
        assert!(parse(path).unwrap().is_empty());
    }

    #[test]
    fn test_parse_absolute_path() {
        let segments = parse("/world/base/camera").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Child("world"),
                Segment::Child("base"),
                Segment::Child("camera"),
            ]
        );
    }

    #[test]
    fn test_parse_treats_leading_separator_as_optional() {
        assert_eq!(parse("world/base").unwrap(), parse("/world/base").unwrap());
    }

    #[test]
    fn test_parse_walk_segments() {
        let segments = parse("../sibling/.").unwrap();
        assert_eq!(
            segments,
            vec![Segment::Parent, Segment::Child("sibling"), Segment::Current]
        );
    }

    #[rstest]
    #[case("//world")]
    #[case("/world//base")]
    #[case("world/")]
    #[case("//")]
    fn test_parse_rejects_empty_segments(#[case] path: &str) {
        let err = parse(path).unwrap_err();
        assert!(err.to_string().contains("empty path segment"), "{err}");
    }

    #[rstest]
    #[case("")]
    #[case("a/b")]
    #[case(".")]
    #[case("..")]
    fn test_validate_name_rejects_invalid(#[case] name: &str) {
        assert!(validate_name(name).is_err());
    }

    #[test]
    fn test_validate_name_accepts_plain_names() {
        assert!(validate_name("base_link").is_ok());
        assert!(validate_name("camera-0").is_ok());
    }
}
