use super::axes::{Axes, pt};
use super::table::CellGrid;
use crate::scene::{Arrow, Scene, Stroke, Text, TextAnchor, TextBox, TextStyle, VerticalAlign};
use crate::theme::Theme;

const SALES: [&[&str]; 8] = [
    &["Product", "Region", "Amount"],
    &["Laptop", "East", "1000"],
    &["Phone", "West", "500"],
    &["Laptop", "West", "1200"],
    &["Tablet", "East", "800"],
    &["Phone", "East", "450"],
    &["Laptop", "East", "1100"],
    &["Tablet", "West", "750"],
];

const QUERY: &str = "SELECT Product,\n  COUNT(*) as Sales_Count,\n  SUM(Amount) as Total\nFROM Sales\nGROUP BY Product";

/// Collapses the sales rows into `(product, count, total)` in first-seen order.
fn grouped_sales() -> Vec<(&'static str, usize, u32)> {
    let mut groups: Vec<(&'static str, usize, u32)> = Vec::new();
    for row in &SALES[1..] {
        let amount: u32 = row[2].parse().unwrap_or_default();
        match groups.iter_mut().find(|(product, _, _)| *product == row[0]) {
            Some((_, count, total)) => {
                *count += 1;
                *total += amount;
            }
            None => groups.push((row[0], 1, amount)),
        }
    }
    groups
}

pub(super) fn group_by(theme: &Theme) -> Scene {
    let palette = &theme.palette;
    let mut scene = Scene::new(1400.0, 800.0, palette.background.clone());
    let text = palette.text.as_str();
    let heading = |size: f32| TextStyle::new(pt(size), palette.primary.as_str()).bold();
    let note_box = |padding: f32| {
        TextBox::new(palette.light.as_str(), pt(padding))
            .stroke(palette.border.as_str(), pt(1.0))
            .rounded(pt(4.0))
    };

    scene.push(Text::new(
        700.0,
        16.0,
        "GROUP BY Process Visualization",
        heading(16.0).anchor(TextAnchor::Middle).align(VerticalAlign::Top),
    ));

    let before = Axes::new([40.0, 90.0, 620.0, 680.0], (0.0, 6.0), (0.0, 10.0));
    let after = Axes::new([720.0, 90.0, 640.0, 680.0], (0.0, 8.0), (0.0, 10.0));
    for (axes, title) in [(&before, "Before GROUP BY"), (&after, "After GROUP BY")] {
        let frame = axes.frame();
        scene.push(Text::new(
            frame.center().x,
            frame.origin.y - 6.0,
            title,
            heading(12.0).anchor(TextAnchor::Middle).align(VerticalAlign::Bottom),
        ));
    }

    CellGrid::uniform(before.point(0.5, 8.0), 3, before.dx(1.7), before.dy(0.4))
        .gaps(before.dx(0.1), before.dy(0.1))
        .header(palette.accent.as_str(), text)
        .body(palette.light.as_str(), text)
        .border(palette.border.as_str(), pt(1.5))
        .font_size(pt(9.0))
        .draw(&mut scene, &SALES);

    let query_at = before.point(3.0, 2.2);
    scene.push(
        Text::new(
            query_at.x,
            query_at.y,
            QUERY,
            TextStyle::new(pt(9.0), text).mono().centered(),
        )
        .boxed(note_box(8.0).opacity(0.9)),
    );

    let groups = grouped_sales();
    let counts: Vec<[String; 3]> = groups
        .iter()
        .map(|(product, count, total)| [product.to_string(), count.to_string(), total.to_string()])
        .collect();
    let mut rows: Vec<Vec<&str>> = vec![vec!["Product", "Sales_Count", "Total"]];
    rows.extend(counts.iter().map(|row| row.iter().map(String::as_str).collect()));
    let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
    CellGrid::uniform(after.point(1.0, 7.0), 3, after.dx(1.9), after.dy(0.5))
        .gaps(after.dx(0.1), after.dy(0.1))
        .header(palette.highlight.as_str(), text)
        .body(palette.light.as_str(), text)
        .border(palette.border.as_str(), pt(2.0))
        .font_size(pt(10.0))
        .draw(&mut scene, &rows);

    let process = after.point(4.0, 4.5);
    scene.push(Text::new(
        process.x,
        process.y,
        "Grouping Process:",
        heading(10.0).anchor(TextAnchor::Middle),
    ));

    let fills = [&palette.accent, &palette.secondary, &palette.highlight];
    for (idx, ((product, count, total), fill)) in groups.iter().zip(fills).enumerate() {
        let y = 3.85 - idx as f32 * 0.7;
        scene.push(
            after
                .rect(1.0, y - 0.25, 2.5, 0.5)
                .fill(fill.as_str())
                .stroke(palette.border.as_str(), pt(1.5))
                .opacity(0.6)
                .rounded(4.0)
                .label(
                    format!("{product} group ({count} rows)"),
                    TextStyle::new(pt(8.0), palette.white.as_str()).bold().centered(),
                ),
        );
        scene.push(Arrow::new(
            after.point(3.6, y),
            after.point(4.5, y),
            Stroke::new(palette.border.as_str(), pt(2.0)),
        ));
        let result = after.point(6.5, y);
        scene.push(
            Text::new(
                result.x,
                result.y,
                format!("→ COUNT: {count}, SUM: {total}"),
                TextStyle::new(pt(8.0), text).centered(),
            )
            .boxed(note_box(3.0).opacity(0.8)),
        );
    }

    let note = after.point(4.0, 0.6);
    scene.push(
        Text::new(
            note.x,
            note.y,
            "GROUP BY collects rows with same Product value\nand applies aggregate functions to each group",
            TextStyle::new(pt(9.0), text).italic().centered(),
        )
        .boxed(note_box(6.0).opacity(0.8)),
    );

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_follow_first_appearance() {
        assert_eq!(
            grouped_sales(),
            [("Laptop", 3, 3300), ("Phone", 2, 950), ("Tablet", 2, 1550)]
        );
    }

    #[test]
    fn grouped_table_shows_totals() {
        let scene = group_by(&Theme::default());
        for total in ["3300", "950", "1550"] {
            assert!(scene.texts().any(|text| text.content == total), "missing {total}");
        }
        assert!(
            scene
                .texts()
                .any(|text| text.content == "→ COUNT: 3, SUM: 3300")
        );
        let labels: Vec<&str> = scene
            .rects()
            .filter_map(|rect| rect.label.as_ref().map(|label| label.text.as_str()))
            .collect();
        assert_eq!(
            labels,
            ["Laptop group (3 rows)", "Phone group (2 rows)", "Tablet group (2 rows)"]
        );
    }
}
