use super::axes::{Axes, pt};
use super::table::CellGrid;
use crate::scene::{Arrow, Circle, Point, Scene, Stroke, Text, TextAnchor, TextStyle, VerticalAlign};
use crate::theme::{Palette, Theme};
use std::collections::HashSet;

/// Reference rows of the aggregate table: the header, then one row per function.
pub const AGGREGATE_FUNCTIONS: [[&str; 3]; 7] = [
    ["Function", "Description", "NULL Behavior"],
    ["COUNT(*)", "Counts all rows in group", "Counts rows with NULL values"],
    ["COUNT(column)", "Counts non-NULL values", "Ignores NULL values"],
    ["SUM(column)", "Sums numeric values", "Ignores NULLs; returns NULL if all NULL"],
    ["AVG(column)", "Computes arithmetic mean", "Ignores NULLs in calculation"],
    ["MIN(column)", "Finds minimum value", "Ignores NULLs"],
    ["MAX(column)", "Finds maximum value", "Ignores NULLs"],
];

const USERS: [&[&str]; 6] = [
    &["ID", "Name", "Email", "Phone"],
    &["1", "Alice", "alice@ex.com", "555-0001"],
    &["2", "Bob", "bob@ex.com", "NULL"],
    &["3", "Charlie", "NULL", "555-0003"],
    &["4", "Diana", "diana@ex.com", "NULL"],
    &["5", "Eve", "eve@ex.com", "555-0005"],
];

const EMPLOYEES: [&[&str]; 6] = [
    &["Employee", "Department", "Salary", "Bonus"],
    &["Alice", "Sales", "50000", "5000"],
    &["Bob", "Sales", "NULL", "3000"],
    &["Charlie", "IT", "60000", "NULL"],
    &["Diana", "IT", "55000", "4000"],
    &["Eve", "Sales", "52000", "NULL"],
];

/// An aggregate over one column of a literal table whose first row is the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregate {
    CountRows,
    Count(usize),
    CountDistinct(usize),
    Sum(usize),
    Avg(usize),
    Min(usize),
    Max(usize),
}

impl Aggregate {
    /// Counts never yield NULL; the other aggregates yield `None` when every
    /// input cell is NULL.
    fn evaluate(self, rows: &[&[&str]]) -> Option<f64> {
        match self {
            Aggregate::CountRows => Some(rows.len().saturating_sub(1) as f64),
            Aggregate::Count(column) => Some(non_null(rows, column).count() as f64),
            Aggregate::CountDistinct(column) => {
                Some(non_null(rows, column).collect::<HashSet<_>>().len() as f64)
            }
            Aggregate::Sum(column) => numbers(rows, column).reduce(|a, b| a + b),
            Aggregate::Avg(column) => {
                let (sum, count) = numbers(rows, column)
                    .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
                (count > 0).then(|| sum / count as f64)
            }
            Aggregate::Min(column) => numbers(rows, column).reduce(f64::min),
            Aggregate::Max(column) => numbers(rows, column).reduce(f64::max),
        }
    }

    fn display(self, rows: &[&[&str]]) -> String {
        self.evaluate(rows)
            .map(group_thousands)
            .unwrap_or_else(|| "NULL".to_string())
    }
}

fn non_null<'a>(rows: &'a [&'a [&'a str]], column: usize) -> impl Iterator<Item = &'a str> + 'a {
    rows.iter()
        .skip(1)
        .filter_map(move |row| row.get(column).copied())
        .filter(|cell| *cell != "NULL")
}

fn numbers<'a>(rows: &'a [&'a [&'a str]], column: usize) -> impl Iterator<Item = f64> + 'a {
    non_null(rows, column).filter_map(|cell| cell.parse().ok())
}

fn group_thousands(value: f64) -> String {
    let digits = (value.round() as i64).to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

fn heading(size: f32, palette: &Palette) -> TextStyle {
    TextStyle::new(pt(size), palette.primary.as_str()).bold()
}

fn body(size: f32, palette: &Palette) -> TextStyle {
    TextStyle::new(pt(size), palette.text.as_str())
}

fn text_at(axes: &Axes, x: f32, y: f32, content: &str, style: TextStyle) -> Text {
    let point = axes.point(x, y);
    Text::new(point.x, point.y, content, style)
}

fn sample_grid(axes: &Axes, origin: Point, cell_width: f32, theme: &Theme) -> CellGrid {
    let palette = &theme.palette;
    CellGrid::uniform(axes.point(origin.x, origin.y), 4, axes.dx(cell_width), axes.dy(0.4))
        .gaps(axes.dx(0.1), axes.dy(0.05))
        .header(palette.accent.as_str(), palette.text.as_str())
        .body(palette.light.as_str(), palette.text.as_str())
        .border(palette.border.as_str(), pt(1.5))
        .font_size(pt(9.0))
        .highlight_nulls(theme.null_fill.as_str(), theme.null_text.as_str())
}

pub(super) fn count_comparison(theme: &Theme) -> Scene {
    let palette = &theme.palette;
    let mut scene = Scene::new(1200.0, 800.0, palette.background.clone());
    let axes = Axes::new([0.0, 0.0, 1200.0, 800.0], (0.0, 12.0), (0.0, 10.0));

    scene.push(text_at(
        &axes,
        6.0,
        9.5,
        "COUNT(*) vs COUNT(column) Comparison",
        heading(16.0, palette).anchor(TextAnchor::Middle),
    ));
    scene.push(text_at(&axes, 3.0, 8.3, "Sample Users Table", heading(11.0, palette)));
    sample_grid(&axes, Point::new(0.5, 7.5), 1.4, theme).draw(&mut scene, &USERS);

    let examples = [
        ("COUNT(*)", Aggregate::CountRows, "Counts all rows, including NULLs", &palette.highlight),
        ("COUNT(Email)", Aggregate::Count(2), "Counts non-NULL Email values only", &palette.accent),
        ("COUNT(Phone)", Aggregate::Count(3), "Counts non-NULL Phone values only", &palette.secondary),
        (
            "COUNT(DISTINCT Email)",
            Aggregate::CountDistinct(2),
            "Counts unique non-NULL Emails",
            &palette.primary,
        ),
    ];
    for (idx, (query, aggregate, description, color)) in examples.into_iter().enumerate() {
        let y = 4.5 - idx as f32 * 0.9;
        scene.push(
            axes.rect(0.5, y - 0.25, 3.0, 0.5)
                .fill(color.as_str())
                .stroke(palette.border.as_str(), pt(2.0))
                .opacity(0.7)
                .rounded(6.0)
                .label(
                    query,
                    TextStyle::new(pt(10.0), palette.white.as_str()).mono().bold().centered(),
                ),
        );
        scene.push(Arrow::new(
            axes.point(3.6, y),
            axes.point(4.3, y),
            Stroke::new(palette.border.as_str(), pt(2.5)),
        ));
        scene.push(
            Circle::new(axes.point(5.0, y), axes.dy(0.35))
                .fill(palette.highlight.as_str())
                .stroke(palette.border.as_str(), pt(2.0))
                .label(
                    aggregate.display(&USERS),
                    TextStyle::new(pt(14.0), palette.white.as_str()).bold().centered(),
                ),
        );
        scene.push(text_at(
            &axes,
            6.0,
            y,
            description,
            body(9.0, palette).align(VerticalAlign::Center),
        ));
    }

    scene.push(
        axes.rect(0.5, 0.1, 11.0, 1.3)
            .fill(palette.light.as_str())
            .stroke(palette.border.as_str(), pt(2.0))
            .opacity(0.9)
            .rounded(8.0),
    );
    let differences = [
        "Key Differences:",
        "• COUNT(*) counts rows (never returns NULL)",
        "• COUNT(column) counts non-NULL values in that column",
        "• COUNT(DISTINCT column) counts unique non-NULL values",
        "• COUNT(1) is equivalent to COUNT(*) - counts all rows",
    ];
    for (idx, line) in differences.into_iter().enumerate() {
        let mut style = body(9.0, palette).align(VerticalAlign::Top);
        if idx == 0 {
            style = style.bold();
        }
        scene.push(text_at(&axes, 1.0, 1.3 - idx as f32 * 0.22, line, style));
    }

    scene
}

pub(super) fn null_aggregation(theme: &Theme) -> Scene {
    let palette = &theme.palette;
    let mut scene = Scene::new(1400.0, 1000.0, palette.background.clone());
    let axes = Axes::new([0.0, 0.0, 1400.0, 1000.0], (0.0, 14.0), (0.0, 12.0));

    scene.push(text_at(
        &axes,
        7.0,
        11.5,
        "NULL Behavior in Aggregate Functions",
        heading(16.0, palette).anchor(TextAnchor::Middle),
    ));
    scene.push(text_at(&axes, 3.5, 10.6, "Employee Data", heading(11.0, palette)));
    sample_grid(&axes, Point::new(0.3, 10.0), 1.6, theme).draw(&mut scene, &EMPLOYEES);

    let results_y = 6.5;
    scene.push(text_at(
        &axes,
        7.0,
        results_y + 0.8,
        "Aggregate Function Results",
        heading(12.0, palette).anchor(TextAnchor::Middle),
    ));
    let results = [
        ("COUNT(*)", Aggregate::CountRows, "Counts all rows"),
        ("COUNT(Salary)", Aggregate::Count(2), "Ignores NULL (Bob has no salary)"),
        ("COUNT(Bonus)", Aggregate::Count(3), "Ignores NULLs (Charlie & Eve)"),
        ("AVG(Salary)", Aggregate::Avg(2), "Average of non-NULL: (50k+60k+55k+52k)/4"),
        ("SUM(Salary)", Aggregate::Sum(2), "Sum of non-NULL values only"),
        ("SUM(Bonus)", Aggregate::Sum(3), "Sum: 5000+3000+4000 (ignores NULLs)"),
        ("MAX(Salary)", Aggregate::Max(2), "Maximum non-NULL value"),
        ("MIN(Bonus)", Aggregate::Min(3), "Minimum non-NULL value"),
    ];
    let white = || TextStyle::new(pt(9.0), palette.white.as_str()).bold().centered();
    for (idx, (function, aggregate, explanation)) in results.into_iter().enumerate() {
        let y = results_y - idx as f32 * 0.55;
        scene.push(
            axes.rect(0.3, y - 0.22, 2.5, 0.44)
                .fill(palette.accent.as_str())
                .stroke(palette.border.as_str(), pt(1.5))
                .opacity(0.7)
                .rounded(5.0)
                .label(function, white().mono()),
        );
        scene.push(
            axes.rect(3.0, y - 0.22, 1.8, 0.44)
                .fill(palette.highlight.as_str())
                .stroke(palette.border.as_str(), pt(1.5))
                .rounded(5.0)
                .label(aggregate.display(&EMPLOYEES), white()),
        );
        scene.push(text_at(
            &axes,
            5.2,
            y,
            explanation,
            body(8.0, palette).align(VerticalAlign::Center),
        ));
    }

    let notes_y = 1.9;
    scene.push(
        axes.rect(0.3, 0.2, 13.4, 1.8)
            .fill(palette.light.as_str())
            .stroke(palette.border.as_str(), pt(2.0))
            .opacity(0.9)
            .rounded(8.0),
    );
    scene.push(text_at(
        &axes,
        7.0,
        notes_y,
        "Important NULL Behavior Rules:",
        heading(10.0, palette)
            .anchor(TextAnchor::Middle)
            .align(VerticalAlign::Top),
    ));
    let rules = [
        "1. Most aggregate functions (SUM, AVG, MIN, MAX) ignore NULL values",
        "2. COUNT(column) counts only non-NULL values in that column",
        "3. COUNT(*) counts all rows, including those with NULLs",
        "4. If ALL values are NULL, most aggregates return NULL (not 0)",
        "5. AVG ignores NULLs: AVG(10, NULL, 20) = 15, not 10",
        "6. GROUP BY treats NULL as a distinct group value",
    ];
    for (idx, rule) in rules.into_iter().enumerate() {
        scene.push(text_at(
            &axes,
            0.8,
            notes_y - 0.35 - idx as f32 * 0.22,
            rule,
            body(8.0, palette).align(VerticalAlign::Top),
        ));
    }

    scene
}

pub(super) fn aggregate_functions(theme: &Theme) -> Scene {
    let mut scene = Scene::new(800.0, 340.0, theme.paper.clone());
    scene.push(Text::new(
        400.0,
        18.0,
        "Aggregate Functions: SUM, COUNT, AVG, MIN, MAX",
        TextStyle::new(pt(14.0), theme.ink.as_str())
            .bold()
            .anchor(TextAnchor::Middle)
            .align(VerticalAlign::Top),
    ));

    let rows: Vec<&[&str]> = AGGREGATE_FUNCTIONS.iter().map(|row| row.as_slice()).collect();
    CellGrid::new(Point::new(35.0, 60.0), vec![150.0, 260.0, 320.0], 36.0)
        .header(theme.table_header.as_str(), theme.table_header_text.as_str())
        .body(theme.table_body.as_str(), theme.ink.as_str())
        .border(theme.ink.as_str(), 1.0)
        .font_size(pt(10.0))
        .align_start(8.0)
        .draw(&mut scene, &rows);

    scene
}
