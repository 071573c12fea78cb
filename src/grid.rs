// Table Renderer model
// A generic grid of columns + display rows, independent of the terminal
// layer so the pinning/scroll behavior is testable headless. The last
// column can be pinned as an action column: it stays visible no matter how
// far the grid is scrolled horizontally, always rendered last.

/// One grid column: header text and render width in terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: u16,
}

impl Column {
    pub const fn new(header: &'static str, width: u16) -> Self {
        Column { header, width }
    }
}

/// A display-ready table. Rows are parallel to `columns`; when an action
/// column is pinned, it is the final entry of both `columns` and each row.
#[derive(Debug, Clone)]
pub struct Grid {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub empty_state: String,
    pinned_action: bool,
}

impl Grid {
    pub fn new(title: impl Into<String>, columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        Grid {
            title: title.into(),
            columns,
            rows,
            empty_state: "No results.".to_string(),
            pinned_action: false,
        }
    }

    /// Pin the last column as the action column.
    pub fn with_pinned_action(mut self) -> Self {
        self.pinned_action = true;
        self
    }

    /// Replace the zero-row message (e.g. a permission notice).
    pub fn with_empty_state(mut self, message: impl Into<String>) -> Self {
        self.empty_state = message.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_pinned_action(&self) -> bool {
        self.pinned_action
    }

    /// Number of columns that participate in horizontal scrolling.
    fn scrollable_len(&self) -> usize {
        if self.pinned_action {
            self.columns.len().saturating_sub(1)
        } else {
            self.columns.len()
        }
    }

    /// Largest useful scroll offset; at max scroll one scrollable column
    /// remains visible.
    pub fn max_scroll(&self) -> usize {
        self.scrollable_len().saturating_sub(1)
    }

    /// Columns visible at a given scroll offset. The pinned action column is
    /// always included, last.
    pub fn visible_columns(&self, scroll: usize) -> Vec<&Column> {
        let start = scroll.min(self.max_scroll());
        let mut visible: Vec<&Column> = self.columns[start..self.scrollable_len()].iter().collect();
        if self.pinned_action {
            if let Some(action) = self.columns.last() {
                visible.push(action);
            }
        }
        visible
    }

    /// Cells of one row, windowed the same way as `visible_columns`.
    pub fn visible_cells(&self, row: usize, scroll: usize) -> Vec<&str> {
        let Some(cells) = self.rows.get(row) else {
            return Vec::new();
        };
        let start = scroll.min(self.max_scroll());
        let end = self.scrollable_len().min(cells.len());
        let mut visible: Vec<&str> = cells[start.min(end)..end].iter().map(String::as_str).collect();
        if self.pinned_action {
            if let Some(action) = cells.last() {
                visible.push(action);
            }
        }
        visible
    }

    /// All header/value pairs of one row, unwindowed and untruncated. Used
    /// by the detail panel.
    pub fn row_fields(&self, row: usize) -> Vec<(&'static str, &str)> {
        match self.rows.get(row) {
            Some(cells) => self
                .columns
                .iter()
                .zip(cells.iter())
                .map(|(col, cell)| (col.header, cell.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }
}
