//! Matrix and table layout.

extern crate alloc;

use super::Typesetter;
use crate::atom::{ColumnAlignment, Range, Table};
use crate::display::{DisplayContent, DisplayNode, Point};
use crate::error::LayoutError;
use crate::font::MathFont;
use alloc::vec::Vec;

/// Extra vertical space per jot, as a fraction of the point size. A jot is
/// 3pt at a 10pt base size.
const JOT_FACTOR: f64 = 0.3;
/// Preferred baseline-to-baseline distance, as a fraction of the point size.
const BASELINE_SKIP_FACTOR: f64 = 1.2;
/// Minimum clearance between rows that are too tall for the baseline skip.
const LINE_SKIP_FACTOR: f64 = 0.1;

impl<F: MathFont, G: Clone> Typesetter<'_, F, G> {
    /// Lay out a table: cells column-aligned, rows stacked by TeX's
    /// baseline-skip rules, and the whole grid centered on the math axis.
    pub(super) fn make_table(
        &self,
        table: &Table,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let n_columns = table.n_columns();

        let mut cells: Vec<Vec<DisplayNode<F, G>>> = Vec::with_capacity(table.n_rows());
        let mut column_widths = vec![0.0_f64; n_columns];
        for row in &table.cells {
            let mut laid_out = Vec::with_capacity(row.len());
            for (column, cell) in row.iter().enumerate() {
                let node = self.sub_line(cell, self.style, self.cramped)?;
                column_widths[column] = column_widths[column].max(node.width);
                laid_out.push(node);
            }
            cells.push(laid_out);
        }

        let column_gap =
            table.inter_column_spacing * metrics.mu_unit(&self.style_font);
        let mut rows: Vec<DisplayNode<F, G>> = Vec::with_capacity(cells.len());
        for row_cells in cells {
            let mut positioned = Vec::with_capacity(row_cells.len());
            let mut column_start = 0.0;
            for (column, mut cell) in row_cells.into_iter().enumerate() {
                let offset = match table.alignment(column) {
                    ColumnAlignment::Left => 0.0,
                    ColumnAlignment::Center => (column_widths[column] - cell.width) / 2.0,
                    ColumnAlignment::Right => column_widths[column] - cell.width,
                };
                cell.position = Point::new(column_start + offset, 0.0);
                column_start += column_widths[column] + column_gap;
                positioned.push(cell);
            }
            rows.push(DisplayNode::from_children(positioned, range));
        }

        self.stack_rows(&mut rows, table.inter_row_additional_spacing);

        let (_, ascent, descent) = crate::display::extents(&rows);
        let shift_down = 0.5 * (ascent - descent) - metrics.axis_height(&self.style_font);
        for row in &mut rows {
            row.position.y -= shift_down;
        }
        let (width, ascent, descent) = crate::display::extents(&rows);
        Ok(DisplayNode::with_metrics(
            DisplayContent::Table { rows },
            width,
            ascent,
            descent,
            range,
        ))
    }

    /// Assign each row's vertical position by the baseline-skip rules: a
    /// fixed preferred skip, stretched when adjacent rows would come closer
    /// than the line-skip limit.
    fn stack_rows(&self, rows: &mut [DisplayNode<F, G>], jots: f64) {
        let point_size = self.style_font.point_size();
        let open_up = jots * JOT_FACTOR * point_size;
        let baseline_skip = open_up + BASELINE_SKIP_FACTOR * point_size;
        let line_skip = open_up + LINE_SKIP_FACTOR * point_size;
        let line_skip_limit = open_up;

        let mut current_y = 0.0;
        let mut previous_descent = 0.0;
        for (index, row) in rows.iter_mut().enumerate() {
            if index > 0 {
                let mut skip = baseline_skip;
                if skip - (previous_descent + row.ascent()) < line_skip_limit {
                    skip = previous_descent + row.ascent() + line_skip;
                }
                current_y -= skip;
            }
            row.position.y = current_y;
            previous_descent = row.descent();
        }
    }
}
