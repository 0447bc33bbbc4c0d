use super::axes::{Axes, pt};
use super::table::CellGrid;
use crate::scene::{Arrow, Scene, Stroke, Text, TextAnchor, TextBox, TextStyle, VerticalAlign};
use crate::theme::Theme;

pub(super) fn relational_model(theme: &Theme) -> Scene {
    let mut scene = Scene::new(800.0, 600.0, theme.paper.clone());
    let axes = Axes::new([40.0, 40.0, 720.0, 520.0], (0.0, 1.0), (0.0, 1.0));
    let colors = &theme.relation;

    let rows: [&[&str]; 3] = [
        &["", "ID\n(Integer domain: 1-999)", "Name\n(String domain: A-Z)", "Age\n(Integer domain: 0-150)"],
        &["Tuple 1", "1", "Aobakwe", "21"],
        &["Tuple 2", "2", "Celimpilo", "24"],
    ];
    let origin = axes.point(0.12, 0.7);
    let data_width = (axes.dx(0.84) - 70.0) / 3.0;
    CellGrid::new(origin, vec![70.0, data_width, data_width, data_width], axes.dy(0.4) / 3.0)
        .header(colors.header.as_str(), theme.ink.as_str())
        .body(colors.cell.as_str(), theme.ink.as_str())
        .font_size(pt(9.0))
        .draw(&mut scene, &rows);

    let middle = |size: f32, color: &str| TextStyle::new(pt(size), color).anchor(TextAnchor::Middle);
    let at = |x: f32, y: f32, content: &str, style: TextStyle| {
        let point = axes.point(x, y);
        Text::new(point.x, point.y, content, style)
    };

    scene.push(at(0.5, 0.85, "Relation (Table): Employee", middle(14.0, &colors.title)));
    scene.push(at(
        0.05,
        0.5,
        "Tuples (Rows)",
        TextStyle::new(pt(12.0), colors.label.as_str()).centered().rotate(90.0),
    ));
    scene.push(at(0.5, 0.75, "Attributes (Columns)", middle(12.0, &colors.label)));
    scene.push(at(
        0.5,
        0.2,
        "Domains: Defined permissible values for each attribute",
        middle(12.0, &colors.note),
    ));
    scene.push(
        at(
            0.5,
            0.1,
            "Logical Independence: Schema changes without affecting physical storage or apps",
            middle(10.0, &colors.emphasis),
        )
        .boxed(TextBox::new(colors.note_fill.as_str(), pt(5.0)).rounded(pt(4.0))),
    );

    scene
}

pub(super) fn keys_constraints(theme: &Theme) -> Scene {
    let mut scene = Scene::new(1000.0, 700.0, theme.paper.clone());
    let axes = Axes::new([40.0, 40.0, 920.0, 620.0], (0.0, 1.0), (0.0, 1.0));
    let colors = &theme.relation;
    let ink = theme.ink.as_str();

    let header_height = axes.dy(0.12);
    let row_height = axes.dy(0.065);
    let employees: [&[&str]; 3] = [
        &[
            "EmpID\n(Primary Key,\nSurrogate:\nAuto-gen int)",
            "Name\n(NOT NULL,\nUNIQUE)",
            "DeptID\n(Foreign Key)",
        ],
        &["1", "Aobakwe", "D1"],
        &["2", "Celimpilo", "D2"],
    ];
    let employee_width = axes.dx(0.38);
    CellGrid::new(
        axes.point(0.02, 0.75),
        vec![employee_width * 0.37, employee_width * 0.34, employee_width * 0.29],
        row_height,
    )
    .header_height(header_height)
    .header(colors.header.as_str(), ink)
    .body(colors.cell.as_str(), ink)
    .font_size(pt(9.0))
    .draw(&mut scene, &employees);

    let departments: [&[&str]; 3] = [
        &["DeptID\n(Primary Key,\nCandidate Key)", "DeptName\n(CHECK:\nLength > 3)"],
        &["D1", "HR"],
        &["D2", "IT"],
    ];
    CellGrid::uniform(axes.point(0.6, 0.75), 2, axes.dx(0.38) / 2.0, row_height)
        .header_height(header_height)
        .header(colors.alt_header.as_str(), ink)
        .body(colors.cell.as_str(), ink)
        .font_size(pt(9.0))
        .draw(&mut scene, &departments);

    let middle = |size: f32, color: &str| TextStyle::new(pt(size), color).anchor(TextAnchor::Middle);
    let at = |x: f32, y: f32, content: &str, style: TextStyle| {
        let point = axes.point(x, y);
        Text::new(point.x, point.y, content, style)
    };

    scene.push(at(0.21, 0.8, "Employee Table", middle(12.0, &colors.title)));
    scene.push(at(0.79, 0.8, "Department Table", middle(12.0, &colors.title)));

    scene.push(
        Arrow::new(
            axes.point(0.4, 0.6),
            axes.point(0.6, 0.6),
            Stroke::new(colors.title.as_str(), pt(1.5)),
        )
        .head(pt(8.0), pt(6.0)),
    );
    scene.push(at(
        0.5,
        0.62,
        "Referential\nConstraint\n(Foreign Key)",
        middle(10.0, &colors.emphasis).align(VerticalAlign::Bottom),
    ));

    let notes = [
        (0.3, "Candidate Key: Minimal unique identifier", &colors.label),
        (0.25, "Surrogate Key: System-generated", &colors.label),
        (
            0.2,
            "Constraints Prevent Anomalies: UNIQUE avoids duplicates, NOT NULL avoids missing data,",
            &colors.note,
        ),
        (
            0.15,
            "CHECK validates rules, Referential avoids invalid references/orphans.",
            &colors.note,
        ),
    ];
    for (y, note, color) in notes {
        scene.push(at(0.5, y, note, middle(10.0, color)));
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_relation_lists_both_tuples() {
        let scene = relational_model(&Theme::default());
        let texts: Vec<&str> = scene.texts().map(|text| text.content.as_str()).collect();
        for expected in ["Tuple 1", "Tuple 2", "Aobakwe", "Celimpilo", "Tuples (Rows)"] {
            assert!(texts.contains(&expected), "missing {expected}");
        }
        let tuples = scene
            .texts()
            .find(|text| text.content == "Tuples (Rows)")
            .unwrap();
        assert_eq!(tuples.style.rotation, 90.0);
    }

    #[test]
    fn foreign_key_arrow_points_at_department_table() {
        let theme = Theme::default();
        let scene = keys_constraints(&theme);
        let department_left = scene
            .rects()
            .filter(|rect| rect.paint.fill.as_deref() == Some(theme.relation.alt_header.as_str()))
            .map(|rect| rect.origin.x)
            .fold(f32::MAX, f32::min);
        let arrow = scene
            .instructions()
            .iter()
            .find_map(|instruction| match instruction {
                crate::scene::Instruction::Arrow(arrow) => Some(arrow),
                _ => None,
            })
            .unwrap();
        assert!((arrow.to.x - department_left).abs() < 0.01);
        assert!(arrow.from.x < arrow.to.x);
    }
}
