//! Character extents over the document text.

use std::ops::Range;

/// A half-open `[begin, end)` extent over the document text.
///
/// Offsets are UTF-8 byte offsets and must fall on char boundaries; the
/// [`AnnotationStoreBuilder`](crate::AnnotationStoreBuilder) rejects spans
/// that don't.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start offset
    pub begin: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `other` lies entirely within this span.
    ///
    /// Boundaries are inclusive on both sides, so a span contains itself and
    /// an empty span sitting on either edge.
    pub fn contains(&self, other: &Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// `true` if the two spans share at least one offset.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive_on_both_edges() {
        let outer = Span::new(2, 8);

        assert!(outer.contains(&outer));
        assert!(outer.contains(&Span::new(2, 4)));
        assert!(outer.contains(&Span::new(5, 8)));
        assert!(outer.contains(&Span::new(8, 8)));

        assert!(!outer.contains(&Span::new(1, 4)));
        assert!(!outer.contains(&Span::new(6, 9)));
    }

    #[test]
    fn overlap_ignores_touching_spans() {
        let span = Span::new(2, 5);

        assert!(span.overlaps(&Span::new(4, 10)));
        assert!(span.overlaps(&Span::new(0, 3)));
        assert!(!span.overlaps(&Span::new(5, 7)));
        assert!(!span.overlaps(&Span::new(0, 2)));
    }

    #[test]
    fn span_from_range() {
        let span: Span = (3..7).into();
        assert_eq!(span, Span::new(3, 7));
        assert_eq!(span.len(), 4);
        assert_eq!(span.range(), 3..7);
        assert!(Span::new(4, 4).is_empty());
    }
}
