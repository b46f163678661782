//! Offset nodes and half-open node-id spans.

/// Identifier of an offset node in `TextWithNodes`.
pub type NodeId = u64;

/// An offset node together with the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub id: NodeId,
    /// Text between this node and the next one.
    pub fragment: String,
}

impl TextNode {
    pub fn new(id: NodeId, fragment: impl Into<String>) -> Self {
        Self {
            id,
            fragment: fragment.into(),
        }
    }
}

/// Half-open range of node ids: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: NodeId,
    pub end: NodeId,
}

impl Span {
    /// Create a span. Returns `None` when `end < start`.
    pub fn new(start: NodeId, end: NodeId) -> Option<Self> {
        if end < start {
            None
        } else {
            Some(Self { start, end })
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.start <= id && id < self.end
    }

    /// Overlap test used when pairing annotations.
    ///
    /// True when `self.start` falls in `[other.start, other.end)` or `self.end` falls in
    /// `(other.start, other.end]`. Spans that only touch at a boundary never pair. The test is
    /// asymmetric: a span strictly enclosing `other` on both sides does not pair with it.
    pub fn pairs_with(&self, other: &Span) -> bool {
        let start_inside = other.start <= self.start && self.start < other.end;
        let end_inside = other.start < self.end && self.end <= other.end;
        start_inside || end_inside
    }
}
