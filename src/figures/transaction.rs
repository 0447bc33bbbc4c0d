use crate::scene::{Arrow, Line, Point, Polygon, Rect, Scene, Stroke, Text, TextAnchor, TextStyle, VerticalAlign};
use crate::theme::Theme;

const WIDTH: f32 = 1200.0;
const HEIGHT: f32 = 1100.0;
const BOX_WIDTH: f32 = 250.0;
const BOX_HEIGHT: f32 = 60.0;

pub(super) fn transaction_flow(theme: &Theme) -> Scene {
    let mut scene = Scene::new(WIDTH, HEIGHT, theme.paper.clone());
    let ink = theme.ink.as_str();
    let paper = theme.paper.as_str();
    let flow = &theme.flow;

    scene.push(Text::new(
        WIDTH / 2.0,
        40.0,
        "Transaction Flow with Constraint Checking",
        TextStyle::new(36.0, ink)
            .anchor(TextAnchor::Middle)
            .align(VerticalAlign::Top),
    ));

    step(&mut scene, Point::new(475.0, 120.0), "Start Transaction", &flow.start, paper, ink);
    arrow(&mut scene, (600.0, 180.0), (600.0, 220.0), ink);

    let check = Point::new(600.0, 320.0);
    let reach = 100.0;
    scene.push(
        Polygon::new(vec![
            Point::new(check.x, check.y - reach),
            Point::new(check.x + reach, check.y),
            Point::new(check.x, check.y + reach),
            Point::new(check.x - reach, check.y),
        ])
        .fill(paper)
        .stroke(ink, 3.0),
    );
    let check_style = TextStyle::new(20.0, ink).centered();
    scene.push(Text::new(check.x, check.y - 12.0, "Check", check_style.clone()));
    scene.push(Text::new(check.x, check.y + 12.0, "Constraints", check_style));

    // Violation branch turns left and ends in a rollback.
    let branch_style = |color: &str| TextStyle::new(16.0, color).align(VerticalAlign::Top);
    line(&mut scene, (check.x - reach, check.y), (250.0, check.y), ink);
    arrow(&mut scene, (250.0, check.y), (250.0, 480.0), ink);
    scene.push(Text::new(270.0, 280.0, "Violation", branch_style(flow.error.as_str())));
    step(&mut scene, Point::new(125.0, 480.0), "Rollback / Error", &flow.error, paper, ink);

    line(&mut scene, (check.x + reach, check.y), (750.0, check.y), ink);
    arrow(&mut scene, (750.0, check.y), (750.0, 480.0), ink);
    scene.push(Text::new(820.0, 280.0, "Success", branch_style(flow.commit.as_str())));
    step(&mut scene, Point::new(625.0, 480.0), "Execute Logic", &flow.success, ink, ink);

    arrow(&mut scene, (750.0, 540.0), (750.0, 620.0), ink);
    step(&mut scene, Point::new(625.0, 620.0), "Commit to Disk", &flow.commit, paper, ink);

    arrow(&mut scene, (750.0, 680.0), (750.0, 760.0), ink);
    step(&mut scene, Point::new(625.0, 760.0), "Data is Durable", &flow.done, paper, ink);

    scene
}

fn step(scene: &mut Scene, origin: Point, label: &str, fill: &str, text: &str, outline: &str) {
    scene.push(
        Rect::new(origin.x, origin.y, BOX_WIDTH, BOX_HEIGHT)
            .fill(fill)
            .stroke(outline, 3.0)
            .rounded(8.0)
            .label(label, TextStyle::new(22.0, text).centered()),
    );
}

fn line(scene: &mut Scene, from: (f32, f32), to: (f32, f32), color: &str) {
    scene.push(Line::new(
        Point::new(from.0, from.1),
        Point::new(to.0, to.1),
        Stroke::new(color, 3.0),
    ));
}

fn arrow(scene: &mut Scene, from: (f32, f32), to: (f32, f32), color: &str) {
    let from = Point::new(from.0, from.1);
    let to = Point::new(to.0, to.1);
    scene.push(Arrow::new(from, to, Stroke::new(color, 3.0)).head(14.0, 12.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Instruction;

    #[test]
    fn outcomes_follow_the_constraint_check() {
        let scene = transaction_flow(&Theme::default());
        let labels: Vec<&str> = scene
            .instructions()
            .iter()
            .filter_map(Instruction::label_text)
            .collect();
        let position = |needle: &str| labels.iter().position(|label| *label == needle);
        let check = position("Check").unwrap();
        assert!(position("Rollback / Error").unwrap() > check);
        let execute = position("Execute Logic").unwrap();
        let commit = position("Commit to Disk").unwrap();
        let durable = position("Data is Durable").unwrap();
        assert!(check < execute && execute < commit && commit < durable);
    }

    #[test]
    fn decision_diamond_is_square() {
        let scene = transaction_flow(&Theme::default());
        let diamond = scene
            .instructions()
            .iter()
            .find_map(|instruction| match instruction {
                Instruction::Polygon(polygon) => Some(polygon),
                _ => None,
            })
            .unwrap();
        let bounds = Instruction::Polygon(diamond.clone()).bounds();
        assert_eq!(bounds, (500.0, 220.0, 200.0, 200.0));
    }

    #[test]
    fn step_boxes_use_flow_palette() {
        let theme = Theme::default();
        let scene = transaction_flow(&theme);
        let fills: Vec<&str> = scene
            .rects()
            .filter_map(|rect| rect.paint.fill.as_deref())
            .collect();
        assert_eq!(
            fills,
            [
                theme.flow.start.as_str(),
                theme.flow.error.as_str(),
                theme.flow.success.as_str(),
                theme.flow.commit.as_str(),
                theme.flow.done.as_str(),
            ]
        );
    }
}
