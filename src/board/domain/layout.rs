//! Board layout configuration: the fixed, ordered set of columns.

use super::{BoardDomainError, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declaration of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column identifier, matched against task statuses.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
    /// Maximum number of tasks the column accepts through moves.
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl ColumnSpec {
    /// Creates an unbounded column declaration.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            capacity: None,
        }
    }

    /// Sets the capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Ordered column declarations for a board view.
///
/// Layouts are validated on construction: at least one column and no
/// repeated identifiers.
///
/// # Examples
///
/// ```rust
/// use taskboard::board::domain::{BoardLayout, ColumnId};
///
/// let layout = BoardLayout::default();
/// assert_eq!(layout.columns().len(), 4);
///
/// let dev = ColumnId::new("dev").expect("valid column id");
/// let limited = layout.with_capacity(&dev, 2).expect("known column");
/// assert_eq!(limited.column(&dev).and_then(|spec| spec.capacity), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BoardLayout {
    columns: Vec<ColumnSpec>,
}

impl BoardLayout {
    /// Creates a validated layout.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyLayout`] when no columns are given,
    /// [`BoardDomainError::EmptyColumnId`] for a blank identifier, or
    /// [`BoardDomainError::DuplicateColumn`] when an identifier repeats.
    pub fn new(columns: impl IntoIterator<Item = ColumnSpec>) -> Result<Self, BoardDomainError> {
        let columns: Vec<ColumnSpec> = columns.into_iter().collect();
        if columns.is_empty() {
            return Err(BoardDomainError::EmptyLayout);
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for spec in &columns {
            if spec.id.as_str().trim().is_empty() {
                return Err(BoardDomainError::EmptyColumnId);
            }
            if !seen.insert(&spec.id) {
                return Err(BoardDomainError::DuplicateColumn(spec.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Parses a layout from a JSON array of column declarations.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidLayout`] for malformed JSON, or any
    /// validation error from [`BoardLayout::new`].
    pub fn from_json(json: &str) -> Result<Self, BoardDomainError> {
        let columns: Vec<ColumnSpec> = serde_json::from_str(json)
            .map_err(|err| BoardDomainError::InvalidLayout(err.to_string()))?;
        Self::new(columns)
    }

    /// Returns a copy of the layout with `column` limited to `capacity` tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownColumn`] when the column is not
    /// declared.
    pub fn with_capacity(mut self, column: &ColumnId, capacity: usize) -> Result<Self, BoardDomainError> {
        let spec = self
            .columns
            .iter_mut()
            .find(|spec| &spec.id == column)
            .ok_or_else(|| BoardDomainError::UnknownColumn(column.clone()))?;
        spec.capacity = Some(capacity);
        Ok(self)
    }

    /// Returns the column declarations in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Looks up a column declaration.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| &spec.id == id)
    }
}

impl Default for BoardLayout {
    /// The four-stage workflow: backlog, selected for development, in
    /// progress and done, all unbounded.
    fn default() -> Self {
        let columns = [
            ("backlog", "Backlog"),
            ("dev", "Selected for Development"),
            ("progress", "In Progress"),
            ("done", "Done"),
        ]
        .into_iter()
        .map(|(id, title)| ColumnSpec::new(ColumnId(id.to_owned()), title))
        .collect();
        Self { columns }
    }
}

impl<'de> Deserialize<'de> for BoardLayout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let columns = Vec::<ColumnSpec>::deserialize(deserializer)?;
        Self::new(columns).map_err(serde::de::Error::custom)
    }
}
