use crate::scene::{Point, Rect, Scene, Stroke, Text, TextAnchor, TextStyle, VerticalAlign};

/// Grid of labelled cells. Row 0 is the header and is drawn bold.
#[derive(Debug, Clone)]
pub(crate) struct CellGrid {
    origin: Point,
    column_widths: Vec<f32>,
    row_height: f32,
    header_height: f32,
    column_gap: f32,
    row_gap: f32,
    header_fill: String,
    header_text: String,
    body_fill: String,
    body_text: String,
    border: Stroke,
    font_size: f32,
    align: TextAnchor,
    padding: f32,
    nulls: Option<(String, String)>,
}

impl CellGrid {
    pub(crate) fn new(origin: Point, column_widths: Vec<f32>, row_height: f32) -> Self {
        Self {
            origin,
            column_widths,
            row_height,
            header_height: row_height,
            column_gap: 0.0,
            row_gap: 0.0,
            header_fill: "#DDDDDD".to_string(),
            header_text: "#000000".to_string(),
            body_fill: "#FFFFFF".to_string(),
            body_text: "#000000".to_string(),
            border: Stroke::new("#000000", 1.0),
            font_size: 12.0,
            align: TextAnchor::Middle,
            padding: 6.0,
            nulls: None,
        }
    }

    /// Uniform columns, the common case for the plotted tables.
    pub(crate) fn uniform(origin: Point, columns: usize, cell_width: f32, row_height: f32) -> Self {
        Self::new(origin, vec![cell_width; columns], row_height)
    }

    pub(crate) fn gaps(mut self, column_gap: f32, row_gap: f32) -> Self {
        self.column_gap = column_gap;
        self.row_gap = row_gap;
        self
    }

    /// Taller header row for wrapped column titles.
    pub(crate) fn header_height(mut self, height: f32) -> Self {
        self.header_height = height;
        self
    }

    pub(crate) fn header(mut self, fill: impl Into<String>, text: impl Into<String>) -> Self {
        self.header_fill = fill.into();
        self.header_text = text.into();
        self
    }

    pub(crate) fn body(mut self, fill: impl Into<String>, text: impl Into<String>) -> Self {
        self.body_fill = fill.into();
        self.body_text = text.into();
        self
    }

    pub(crate) fn border(mut self, color: impl Into<String>, width: f32) -> Self {
        self.border = Stroke::new(color, width);
        self
    }

    pub(crate) fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Left-align cell text, inset by `padding`.
    pub(crate) fn align_start(mut self, padding: f32) -> Self {
        self.align = TextAnchor::Start;
        self.padding = padding;
        self
    }

    /// Body cells reading `NULL` get their own fill and text color.
    pub(crate) fn highlight_nulls(mut self, fill: impl Into<String>, text: impl Into<String>) -> Self {
        self.nulls = Some((fill.into(), text.into()));
        self
    }

    pub(crate) fn cell_rect(&self, row: usize, column: usize) -> Rect {
        let x = self.origin.x
            + self.column_widths[..column].iter().sum::<f32>()
            + self.column_gap * column as f32;
        if row == 0 {
            return Rect::new(x, self.origin.y, self.column_widths[column], self.header_height);
        }
        let y = self.origin.y
            + self.header_height
            + self.row_gap
            + (self.row_height + self.row_gap) * (row - 1) as f32;
        Rect::new(x, y, self.column_widths[column], self.row_height)
    }

    pub(crate) fn draw(&self, scene: &mut Scene, rows: &[&[&str]]) {
        for (row_idx, row) in rows.iter().enumerate() {
            let header = row_idx == 0;
            for (col_idx, cell) in row.iter().enumerate().take(self.column_widths.len()) {
                let (mut fill, mut text_color) = if header {
                    (self.header_fill.as_str(), self.header_text.as_str())
                } else {
                    (self.body_fill.as_str(), self.body_text.as_str())
                };
                if !header
                    && *cell == "NULL"
                    && let Some((null_fill, null_text)) = &self.nulls
                {
                    fill = null_fill.as_str();
                    text_color = null_text.as_str();
                }

                let rect = self
                    .cell_rect(row_idx, col_idx)
                    .fill(fill)
                    .stroke(self.border.color.clone(), self.border.width);
                let center = rect.center();
                let text_x = match self.align {
                    TextAnchor::Start => rect.origin.x + self.padding,
                    TextAnchor::Middle => center.x,
                    TextAnchor::End => rect.origin.x + rect.width - self.padding,
                };
                scene.push(rect);

                if cell.is_empty() {
                    continue;
                }
                let mut style = TextStyle::new(self.font_size, text_color)
                    .anchor(self.align)
                    .align(VerticalAlign::Center);
                if header {
                    style = style.bold();
                }
                scene.push(Text::new(text_x, center.y, *cell, style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Instruction;

    #[test]
    fn cells_step_by_width_plus_gap() {
        let grid = CellGrid::new(Point::new(10.0, 20.0), vec![50.0, 30.0, 40.0], 15.0).gaps(5.0, 2.0);
        let rect = grid.cell_rect(2, 2);
        assert_eq!(rect.origin, Point::new(10.0 + 80.0 + 10.0, 20.0 + 34.0));
        assert_eq!(rect.width, 40.0);
    }

    #[test]
    fn header_height_pushes_body_rows_down() {
        let grid = CellGrid::uniform(Point::new(0.0, 0.0), 2, 40.0, 20.0).header_height(50.0);
        assert_eq!(grid.cell_rect(0, 1).height, 50.0);
        assert_eq!(grid.cell_rect(2, 0).origin.y, 70.0);
        assert_eq!(grid.cell_rect(2, 0).height, 20.0);
    }

    #[test]
    fn null_cells_are_highlighted_outside_header() {
        let grid = CellGrid::uniform(Point::new(0.0, 0.0), 2, 40.0, 20.0)
            .body("#EEEEEE", "#111111")
            .highlight_nulls("#FFE082", "#E65100");
        let mut scene = Scene::new(100.0, 100.0, "#FFFFFF");
        grid.draw(&mut scene, &[&["NULL", "Name"], &["NULL", "Bob"]]);

        let fills: Vec<&str> = scene
            .rects()
            .map(|rect| rect.paint.fill.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(fills, ["#DDDDDD", "#DDDDDD", "#FFE082", "#EEEEEE"]);
        let null_body = scene
            .instructions()
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Text(text) if text.content == "NULL" => Some(text.style.color.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(null_body, ["#000000", "#E65100"]);
    }
}
