//! Operation types for the template directive language

/// A single patch operation produced from one directive.
///
/// Content is the directive's raw block text with trailing blank lines
/// stripped. It is stored unresolved; color substitution happens at apply
/// time, not parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `@full` - replace the whole target with the content's lines.
    Full { content: String },
    /// `@line N` - overwrite one 1-based line.
    SetLine { line: usize, content: String },
    /// `@lines A-B` - overwrite an inclusive 1-based range; the replacement
    /// may carry a different number of lines than the range it covers.
    SetRange {
        start: usize,
        end: usize,
        content: String,
    },
    /// `@match "regex"` - replace every line matching the pattern. The
    /// pattern is compiled at apply time.
    ReplaceMatching { pattern: String, content: String },
    /// `@append` - add the content's lines at the end of the target.
    Append { content: String },
    /// `@prepend` - insert the content's lines at the start of the target.
    Prepend { content: String },
}

impl Operation {
    /// The raw template text attached to this operation.
    pub fn content(&self) -> &str {
        match self {
            Operation::Full { content }
            | Operation::SetLine { content, .. }
            | Operation::SetRange { content, .. }
            | Operation::ReplaceMatching { content, .. }
            | Operation::Append { content }
            | Operation::Prepend { content } => content,
        }
    }
}

/// An ordered sequence of operations parsed from one template source.
///
/// Immutable once constructed; operations never reference each other, they
/// only share the target buffer at apply time, strictly in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    operations: Vec<Operation>,
}

impl Template {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
