//! HTML utilities for navigating Banner's table-based page layout.

mod utils;

pub use utils::{
    element_text, enclosing, has_class, labelled_lines, normalize_whitespace, row_cells,
    selector, table_rows, Line,
};
