//! Row-oriented query results.

use std::collections::VecDeque;

use tracing::Span;

use crate::{error::BoxError, types::BindingSet};

/// Backend cursor over the rows of a SELECT query.
///
/// `close` releases whatever the backend holds for the query; it may fail,
/// but [`ResultSet`] never lets that failure reach the caller.
pub trait RowCursor: Send {
    /// Variables projected by the query, in query order
    fn binding_names(&self) -> &[String];

    fn next_row(&mut self) -> Option<BindingSet>;

    fn close(&mut self) -> std::result::Result<(), BoxError>;
}

/// Cursor over rows already held in memory.
#[derive(Debug, Default)]
pub struct MemoryCursor {
    names: Vec<String>,
    rows: VecDeque<BindingSet>,
}

impl MemoryCursor {
    pub fn new(names: Vec<String>, rows: impl IntoIterator<Item = BindingSet>) -> Self {
        Self {
            names,
            rows: rows.into_iter().collect(),
        }
    }
}

impl RowCursor for MemoryCursor {
    fn binding_names(&self) -> &[String] {
        &self.names
    }

    fn next_row(&mut self) -> Option<BindingSet> {
        self.rows.pop_front()
    }

    fn close(&mut self) -> std::result::Result<(), BoxError> {
        self.rows.clear();
        Ok(())
    }
}

/// Result of a SELECT query.
///
/// Iterating yields one [`BindingSet`] per row. Closing is best-effort: the
/// backend cursor is closed exactly once and a failure is reported as a
/// warning in the span the result set was created in. Dropping an unclosed
/// result set closes it.
pub struct ResultSet {
    cursor: Box<dyn RowCursor>,
    span: Span,
    closed: bool,
}

impl ResultSet {
    pub fn new(cursor: Box<dyn RowCursor>) -> Self {
        Self {
            cursor,
            span: Span::current(),
            closed: false,
        }
    }

    /// Report cleanup failures inside `span` instead of the current span.
    pub fn in_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn from_rows(names: Vec<String>, rows: Vec<BindingSet>) -> Self {
        Self::new(Box::new(MemoryCursor::new(names, rows)))
    }

    pub fn binding_names(&self) -> &[String] {
        self.cursor.binding_names()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(error) = self.cursor.close() {
            tracing::warn!(
                parent: &self.span,
                error = %error,
                "Failed to close query result cursor"
            );
        }
    }
}

impl Iterator for ResultSet {
    type Item = BindingSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.cursor.next_row()
    }
}

impl Drop for ResultSet {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultSet")
            .field("binding_names", &self.cursor.binding_names())
            .field("closed", &self.closed)
            .finish()
    }
}
