use super::axes::{Axes, pt};
use super::table::CellGrid;
use crate::scene::{
    Circle, Line, Point, Rect, Scene, Stroke, Text, TextAnchor, TextBox, TextStyle,
    VerticalAlign,
};
use crate::theme::{Palette, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinKind {
    Inner,
    Left,
    Right,
    FullOuter,
    LeftExcluding,
    RightExcluding,
}

impl JoinKind {
    const ALL: [JoinKind; 6] = [
        JoinKind::Inner,
        JoinKind::Left,
        JoinKind::Right,
        JoinKind::FullOuter,
        JoinKind::LeftExcluding,
        JoinKind::RightExcluding,
    ];

    fn title(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::LeftExcluding => "LEFT EXCLUDING JOIN",
            JoinKind::RightExcluding => "RIGHT EXCLUDING JOIN",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "SELECT * FROM A\nINNER JOIN B\nON A.id = B.id",
            JoinKind::Left => "SELECT * FROM A\nLEFT JOIN B\nON A.id = B.id",
            JoinKind::Right => "SELECT * FROM A\nRIGHT JOIN B\nON A.id = B.id",
            JoinKind::FullOuter => "SELECT * FROM A\nFULL OUTER JOIN B\nON A.id = B.id",
            JoinKind::LeftExcluding => {
                "SELECT * FROM A\nLEFT JOIN B\nON A.id = B.id\nWHERE B.id IS NULL"
            }
            JoinKind::RightExcluding => {
                "SELECT * FROM A\nRIGHT JOIN B\nON A.id = B.id\nWHERE A.id IS NULL"
            }
        }
    }

    fn fills_left(self) -> bool {
        matches!(self, JoinKind::Left | JoinKind::FullOuter | JoinKind::LeftExcluding)
    }

    fn fills_right(self) -> bool {
        matches!(self, JoinKind::Right | JoinKind::FullOuter | JoinKind::RightExcluding)
    }

    fn excludes_overlap(self) -> bool {
        matches!(self, JoinKind::LeftExcluding | JoinKind::RightExcluding)
    }
}

fn heading(size: f32, palette: &Palette) -> TextStyle {
    TextStyle::new(pt(size), palette.primary.as_str()).bold()
}

fn body(size: f32, palette: &Palette) -> TextStyle {
    TextStyle::new(pt(size), palette.text.as_str())
}

fn note_box(palette: &Palette, padding: f32) -> TextBox {
    TextBox::new(palette.light.as_str(), pt(padding))
        .stroke(palette.border.as_str(), 1.0)
        .rounded(pt(4.0))
        .opacity(0.8)
}

fn text_at(axes: &Axes, x: f32, y: f32, content: &str, style: TextStyle) -> Text {
    let point = axes.point(x, y);
    Text::new(point.x, point.y, content, style)
}

pub(super) fn join_venn(theme: &Theme) -> Scene {
    let palette = &theme.palette;
    let mut scene = Scene::new(1500.0, 1000.0, palette.background.clone());

    scene.push(Text::new(
        750.0,
        20.0,
        "SQL JOIN Types - Visual Guide",
        heading(18.0, palette).anchor(TextAnchor::Middle).align(VerticalAlign::Top),
    ));

    for (idx, kind) in JoinKind::ALL.into_iter().enumerate() {
        let left = 30.0 + (idx % 3) as f32 * 500.0;
        let top = 70.0 + (idx / 3) as f32 * 465.0;
        let axes = Axes::new([left, top, 440.0, 440.0], (0.0, 10.0), (0.0, 10.0));
        venn_panel(&mut scene, &axes, kind, palette);
    }

    scene
}

fn venn_panel(scene: &mut Scene, axes: &Axes, kind: JoinKind, palette: &Palette) {
    let radius = axes.dx(2.5);
    let left = axes.point(3.5, 5.0);
    let right = axes.point(6.5, 5.0);
    let overlap = Circle::new(axes.point(5.0, 5.0), axes.dx(1.3));

    if kind == JoinKind::Inner {
        scene.push(overlap.clone().fill(palette.highlight.as_str()).opacity(0.7));
    }
    if kind.fills_left() {
        scene.push(Circle::new(left, radius).fill(palette.accent.as_str()).opacity(0.5));
    }
    if kind.fills_right() {
        scene.push(Circle::new(right, radius).fill(palette.secondary.as_str()).opacity(0.5));
    }
    if kind.excludes_overlap() {
        scene.push(overlap.fill(palette.white.as_str()));
    }
    scene.push(Circle::new(left, radius).stroke(palette.primary.as_str(), pt(3.0)));
    scene.push(Circle::new(right, radius).stroke(palette.secondary.as_str(), pt(3.0)));

    scene.push(text_at(axes, 2.5, 8.5, kind.title(), heading(12.0, palette)));
    let table_label = |x: f32, name: &str| {
        text_at(axes, x, 5.0, name, body(10.0, palette).bold().centered())
    };
    scene.push(table_label(2.0, "Table A"));
    scene.push(table_label(8.0, "Table B"));

    scene.push(
        text_at(
            axes,
            5.0,
            1.2,
            kind.sql(),
            body(7.0, palette)
                .mono()
                .anchor(TextAnchor::Middle)
                .align(VerticalAlign::Top),
        )
        .boxed(note_box(palette, 3.5)),
    );
}

pub(super) fn join_results(theme: &Theme) -> Scene {
    let palette = &theme.palette;
    let mut scene = Scene::new(1400.0, 1000.0, palette.background.clone());
    let axes = Axes::new([0.0, 0.0, 1400.0, 1000.0], (0.0, 14.0), (0.0, 10.0));

    scene.push(text_at(
        &axes,
        7.0,
        9.5,
        "JOIN Results Example",
        heading(16.0, palette).anchor(TextAnchor::Middle),
    ));

    let grid = |x: f32, y: f32, cell_width: f32, columns: usize, header: &str| {
        CellGrid::uniform(axes.point(x, y), columns, axes.dx(cell_width), axes.dy(0.35))
            .gaps(axes.dx(0.1), axes.dy(0.05))
            .header(header, palette.text.as_str())
            .body(palette.light.as_str(), palette.text.as_str())
            .border(palette.border.as_str(), pt(1.5))
            .font_size(pt(9.0))
    };

    let employees: [&[&str]; 5] = [
        &["ID", "Name", "Dept_ID"],
        &["1", "Alice", "10"],
        &["2", "Bob", "20"],
        &["3", "Charlie", "NULL"],
        &["4", "Diana", "30"],
    ];
    let departments: [&[&str]; 4] = [
        &["ID", "Dept_Name"],
        &["10", "Sales"],
        &["20", "Engineering"],
        &["40", "Marketing"],
    ];
    scene.push(text_at(&axes, 2.0, 8.0, "Employees Table", heading(11.0, palette)));
    grid(0.5, 6.5, 1.2, 3, &palette.accent).draw(&mut scene, &employees);
    scene.push(text_at(&axes, 6.2, 8.0, "Departments Table", heading(11.0, palette)));
    grid(5.5, 6.5, 1.4, 2, &palette.secondary).draw(&mut scene, &departments);

    let inner: [&[&str]; 3] = [
        &["Name", "Dept_ID", "Dept_Name"],
        &["Alice", "10", "Sales"],
        &["Bob", "20", "Engineering"],
    ];
    let left: [&[&str]; 5] = [
        &["Name", "Dept_ID", "Dept_Name"],
        &["Alice", "10", "Sales"],
        &["Bob", "20", "Engineering"],
        &["Charlie", "NULL", "NULL"],
        &["Diana", "30", "NULL"],
    ];
    let result_y = 3.5;
    for (x, title, join) in [(2.0, "INNER JOIN Result", "INNER"), (8.0, "LEFT JOIN Result", "LEFT")] {
        scene.push(text_at(&axes, x, result_y + 1.8, title, heading(11.0, palette)));
        let query = [
            "SELECT e.Name, e.Dept_ID, d.Dept_Name".to_string(),
            format!("FROM Employees e {join} JOIN Departments d"),
            "ON e.Dept_ID = d.ID".to_string(),
        ];
        for (line, y) in query.iter().zip([1.4, 1.1, 0.8]) {
            scene.push(text_at(&axes, x, result_y + y, line, body(8.0, palette).mono()));
        }
    }
    grid(0.5, result_y, 1.4, 3, &palette.highlight).draw(&mut scene, &inner);
    grid(6.5, result_y, 1.4, 3, &palette.accent)
        .highlight_nulls(theme.null_fill.as_str(), theme.null_text.as_str())
        .draw(&mut scene, &left);

    scene.push(
        text_at(
            &axes,
            7.0,
            0.4,
            "Note: LEFT JOIN includes all rows from Employees (left table),\neven if there's no match in Departments. Unmatched rows show NULL.",
            body(9.0, palette)
                .italic()
                .anchor(TextAnchor::Middle)
                .align(VerticalAlign::Bottom),
        )
        .boxed(note_box(palette, 8.0)),
    );

    scene
}

const ALGORITHMS: [&str; 3] = ["Nested Loop", "Hash Join", "Merge Join"];

/// Relative cost per algorithm for small, large and pre-sorted inputs.
const ALGORITHM_COSTS: [(&str, [f32; 3]); 3] = [
    ("Small Tables (<1K rows)", [10.0, 5.0, 7.0]),
    ("Large Tables (>100K rows)", [95.0, 20.0, 25.0]),
    ("Pre-sorted Data", [80.0, 18.0, 8.0]),
];

const CHARACTERISTICS: [(&str, [&str; 6]); 3] = [
    (
        "Nested Loop Join",
        [
            "• Simple implementation",
            "• O(n × m) complexity",
            "• Good for small tables",
            "• Works with any join condition",
            "• No memory overhead",
            "• Can use indexes effectively",
        ],
    ),
    (
        "Hash Join",
        [
            "• O(n + m) average case",
            "• Builds hash table in memory",
            "• Excellent for equality joins",
            "• Memory intensive",
            "• Fast for large datasets",
            "• Requires sufficient RAM",
        ],
    ),
    (
        "Merge Join",
        [
            "• O(n + m) if data sorted",
            "• Requires sorted inputs",
            "• Memory efficient",
            "• Good for pre-sorted data",
            "• Stream-based processing",
            "• Optimal for range joins",
        ],
    ),
];

pub(super) fn join_algorithms(theme: &Theme) -> Scene {
    let palette = &theme.palette;
    let mut scene = Scene::new(1400.0, 600.0, palette.background.clone());
    let series_colors = [&palette.highlight, &palette.accent, &palette.secondary];

    scene.push(Text::new(
        700.0,
        12.0,
        "JOIN Algorithm Performance Comparison",
        heading(16.0, palette).anchor(TextAnchor::Middle).align(VerticalAlign::Top),
    ));

    let chart = Axes::new([110.0, 90.0, 520.0, 400.0], (-0.5, 2.5), (0.0, 100.0));
    let frame = chart.frame();
    let frame_right = frame.origin.x + frame.width;
    let frame_bottom = frame.origin.y + frame.height;
    scene.push(frame.clone().fill(palette.white.as_str()));

    for tick in (0..=100).step_by(20) {
        let y = chart.y(tick as f32);
        scene.push(Line::new(
            Point::new(frame.origin.x, y),
            Point::new(frame_right, y),
            Stroke::new(palette.light.as_str(), 1.0),
        ));
        scene.push(Text::new(
            frame.origin.x - 6.0,
            y,
            tick.to_string(),
            body(9.0, palette).anchor(TextAnchor::End).align(VerticalAlign::Center),
        ));
    }

    let bar_width = 0.25;
    for (series, (_, costs)) in ALGORITHM_COSTS.iter().enumerate() {
        let offset = (series as f32 - 1.0) * bar_width;
        for (idx, cost) in costs.iter().enumerate() {
            let center = idx as f32 + offset;
            scene.push(
                chart
                    .rect(center - bar_width / 2.0, 0.0, bar_width, *cost)
                    .fill(series_colors[series].as_str())
                    .stroke(palette.border.as_str(), pt(1.5)),
            );
            let top = chart.point(center, *cost);
            scene.push(Text::new(
                top.x,
                top.y - 2.0,
                format!("{cost}"),
                body(8.0, palette).anchor(TextAnchor::Middle).align(VerticalAlign::Bottom),
            ));
        }
    }
    scene.push(frame.clone().stroke(palette.border.as_str(), 1.0));

    for (idx, name) in ALGORITHMS.iter().enumerate() {
        scene.push(Text::new(
            chart.x(idx as f32),
            frame_bottom + 6.0,
            *name,
            body(10.0, palette).anchor(TextAnchor::Middle).align(VerticalAlign::Top),
        ));
    }
    let center = frame.center();
    scene.push(Text::new(
        center.x,
        frame_bottom + 30.0,
        "Join Algorithm",
        body(10.0, palette).bold().anchor(TextAnchor::Middle).align(VerticalAlign::Top),
    ));
    scene.push(Text::new(
        50.0,
        center.y,
        "Relative Time (arbitrary units)",
        body(10.0, palette).bold().centered().rotate(90.0),
    ));
    scene.push(Text::new(
        center.x,
        frame.origin.y - 8.0,
        "Execution Time by Data Characteristics",
        heading(14.0, palette).anchor(TextAnchor::Middle).align(VerticalAlign::Bottom),
    ));

    let legend = Rect::new(frame_right - 240.0, frame.origin.y + 10.0, 230.0, 78.0)
        .fill(palette.light.as_str())
        .stroke(palette.border.as_str(), 1.0)
        .rounded(4.0);
    let (legend_x, legend_y) = (legend.origin.x, legend.origin.y);
    scene.push(legend);
    for (series, (label, _)) in ALGORITHM_COSTS.iter().enumerate() {
        let y = legend_y + 14.0 + series as f32 * 22.0;
        scene.push(
            Rect::new(legend_x + 10.0, y - 6.0, 24.0, 12.0)
                .fill(series_colors[series].as_str())
                .stroke(palette.border.as_str(), 1.0),
        );
        scene.push(Text::new(
            legend_x + 42.0,
            y,
            *label,
            body(9.0, palette).align(VerticalAlign::Center),
        ));
    }

    let panel = Axes::new([720.0, 60.0, 640.0, 520.0], (0.0, 10.0), (0.0, 10.0));
    for (block, (name, points)) in CHARACTERISTICS.iter().enumerate() {
        let y_start = 9.0 - block as f32 * 3.3;
        scene.push(
            panel
                .rect(0.5, y_start - 0.5, 9.0, 0.6)
                .fill(series_colors[block].as_str())
                .stroke(palette.border.as_str(), pt(2.0))
                .opacity(0.8)
                .rounded(6.0),
        );
        scene.push(text_at(
            &panel,
            5.0,
            y_start - 0.2,
            name,
            TextStyle::new(pt(11.0), palette.white.as_str()).bold().centered(),
        ));
        for (idx, point) in points.iter().enumerate() {
            scene.push(text_at(
                &panel,
                1.0,
                y_start - 0.8 - idx as f32 * 0.3,
                point,
                body(8.0, palette).align(VerticalAlign::Top),
            ));
        }
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Instruction;

    fn circles(scene: &Scene) -> Vec<&Circle> {
        scene
            .instructions()
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Circle(circle) => Some(circle),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn six_panels_with_two_outlined_tables_each() {
        let scene = join_venn(&Theme::default());
        let outlines = circles(&scene)
            .into_iter()
            .filter(|circle| circle.paint.fill.is_none())
            .count();
        assert_eq!(outlines, 12);
        for kind in JoinKind::ALL {
            assert!(scene.texts().any(|text| text.content == kind.sql()));
        }
    }

    #[test]
    fn excluding_joins_cover_the_overlap_after_filling() {
        let theme = Theme::default();
        let mut scene = Scene::new(500.0, 500.0, "#FFFFFF");
        let axes = Axes::new([0.0, 0.0, 440.0, 440.0], (0.0, 10.0), (0.0, 10.0));
        venn_panel(&mut scene, &axes, JoinKind::LeftExcluding, &theme.palette);

        let fills: Vec<Option<&str>> = circles(&scene)
            .iter()
            .map(|circle| circle.paint.fill.as_deref())
            .collect();
        assert_eq!(
            fills,
            [
                Some(theme.palette.accent.as_str()),
                Some(theme.palette.white.as_str()),
                None,
                None,
            ]
        );
    }

    #[test]
    fn left_join_result_highlights_missing_departments() {
        let theme = Theme::default();
        let scene = join_results(&theme);
        let nulls = scene
            .rects()
            .filter(|rect| rect.paint.fill.as_deref() == Some(theme.null_fill.as_str()))
            .count();
        assert_eq!(nulls, 3);
    }

    #[test]
    fn one_bar_per_algorithm_and_input() {
        let theme = Theme::default();
        let scene = join_algorithms(&theme);
        let bars = scene
            .rects()
            .filter(|rect| rect.paint.fill.as_deref() == Some(theme.palette.accent.as_str()))
            .filter(|rect| rect.corner_radius == 0.0 && rect.width > 24.0)
            .count();
        assert_eq!(bars, 3);
        assert!(scene.texts().any(|text| text.content == "95"));
    }
}
