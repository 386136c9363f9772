//! HTTP Range request parsing module
//!
//! Single-range `Range` header parsing per RFC 7233, resolved eagerly
//! against the body size.

/// A byte range resolved against the full body size, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

/// Outcome of evaluating a `Range` header
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve a 206 with this range
    Partial(ByteRange),
    /// Range cannot be satisfied, respond 416
    Unsatisfiable,
    /// No header, non-bytes unit, or malformed: serve the full content
    Full,
}

/// Evaluate a `Range` header against the body size
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Multi-range requests and anything malformed fall back to the full
/// response rather than an error.
pub fn evaluate_range(range_header: Option<&str>, size: usize) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Full;
    };

    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Full;
    };

    // Single range only
    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    // Suffix form: "-500" means the last 500 bytes
    if start_str.is_empty() {
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Partial(ByteRange {
            start: size.saturating_sub(suffix),
            end: size - 1,
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        end.min(size - 1)
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Partial(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header() {
        assert_eq!(evaluate_range(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn test_standard_range() {
        assert_eq!(
            evaluate_range(Some("bytes=0-9"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 9 })
        );
    }

    #[test]
    fn test_open_ended_range() {
        assert_eq!(
            evaluate_range(Some("bytes=50-"), 100),
            RangeOutcome::Partial(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(
            evaluate_range(Some("bytes=-20"), 100),
            RangeOutcome::Partial(ByteRange { start: 80, end: 99 })
        );
        // Suffix longer than the body covers the whole body
        assert_eq!(
            evaluate_range(Some("bytes=-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn test_end_clamped_to_size() {
        assert_eq!(
            evaluate_range(Some("bytes=90-200"), 100),
            RangeOutcome::Partial(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn test_unsatisfiable() {
        assert_eq!(evaluate_range(Some("bytes=200-"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate_range(Some("bytes=-0"), 100), RangeOutcome::Unsatisfiable);
        assert_eq!(evaluate_range(Some("bytes=9-5"), 100), RangeOutcome::Unsatisfiable);
    }

    #[test]
    fn test_malformed_falls_back_to_full() {
        assert_eq!(evaluate_range(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("bytes=0-9,20-29"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("items=0-9"), 100), RangeOutcome::Full);
        assert_eq!(evaluate_range(Some("bytes=09"), 100), RangeOutcome::Full);
    }
}
