use crate::scene::{Arrow, Point, Rect, Scene, Stroke, Text, TextAnchor, TextStyle, VerticalAlign};
use crate::theme::Theme;

const WIDTH: f32 = 1200.0;
const HEIGHT: f32 = 900.0;

const NODE_WIDTH: f32 = 200.0;
const NODE_HEIGHT: f32 = 80.0;
const LEAF_WIDTH: f32 = 180.0;
const LEAF_Y: f32 = 480.0;

/// Key ranges held by the four leaves, left to right.
pub const LEAF_KEYS: [&str; 4] = ["10, 20", "30, 40", "60, 70", "80, 90"];
const LEAF_X: [f32; 4] = [60.0, 260.0, 460.0, 660.0];

pub(super) fn btree(theme: &Theme) -> Scene {
    let mut scene = Scene::new(WIDTH, HEIGHT, theme.paper.clone());
    let ink = theme.ink.as_str();
    let paper = theme.paper.as_str();
    let top = |size: f32, color: &str| {
        TextStyle::new(size, color)
            .anchor(TextAnchor::Middle)
            .align(VerticalAlign::Top)
    };

    scene.push(Text::new(WIDTH / 2.0, 40.0, "B-Tree Index Structure", top(36.0, ink)));

    let root = Point::new(WIDTH / 2.0 - NODE_WIDTH / 2.0, 120.0);
    node(&mut scene, root, NODE_WIDTH, &theme.tree.root, ink, 3.0);
    scene.push(Text::new(root.x + NODE_WIDTH / 2.0, root.y + 15.0, "Root Node", top(24.0, paper)));
    scene.push(Text::new(root.x + NODE_WIDTH / 2.0, root.y + 50.0, "[50]", top(20.0, paper)));

    let branches = [(Point::new(200.0, 280.0), "[25]"), (Point::new(600.0, 280.0), "[75]")];
    let root_bottom = root.y + NODE_HEIGHT;
    edge(&mut scene, Point::new(root.x + 50.0, root_bottom), branch_top(branches[0].0), ink, 3.0);
    edge(&mut scene, Point::new(root.x + 150.0, root_bottom), branch_top(branches[1].0), ink, 3.0);

    for (origin, key) in branches {
        node(&mut scene, origin, NODE_WIDTH, &theme.tree.branch, ink, 3.0);
        scene.push(Text::new(origin.x + NODE_WIDTH / 2.0, origin.y + 15.0, "Branch", top(24.0, paper)));
        scene.push(Text::new(origin.x + NODE_WIDTH / 2.0, origin.y + 50.0, key, top(20.0, paper)));
    }

    // Each branch fans out to the two leaves below it.
    for (idx, leaf_x) in LEAF_X.iter().enumerate() {
        let (branch, _) = branches[idx / 2];
        let from_x = if idx % 2 == 0 { branch.x + 50.0 } else { branch.x + 150.0 };
        let to = Point::new(leaf_x + LEAF_WIDTH / 2.0, LEAF_Y);
        edge(&mut scene, Point::new(from_x, branch.y + NODE_HEIGHT), to, ink, 2.0);
    }

    for (leaf_x, keys) in LEAF_X.iter().zip(LEAF_KEYS) {
        let origin = Point::new(*leaf_x, LEAF_Y);
        node(&mut scene, origin, LEAF_WIDTH, &theme.tree.leaf, ink, 2.0);
        scene.push(Text::new(origin.x + LEAF_WIDTH / 2.0, LEAF_Y + 15.0, "Leaf", top(20.0, ink)));
        scene.push(Text::new(origin.x + LEAF_WIDTH / 2.0, LEAF_Y + 50.0, keys, top(20.0, ink)));
    }

    let legend_y = 620.0;
    let legend = [
        (100.0, &theme.tree.root, "Root Node"),
        (300.0, &theme.tree.branch, "Branch Nodes"),
        (540.0, &theme.tree.leaf, "Leaf Nodes (Data)"),
    ];
    for (x, color, label) in legend {
        scene.push(Rect::new(x, legend_y, 30.0, 30.0).fill(color.as_str()).stroke(ink, 2.0));
        let style = TextStyle::new(16.0, ink).align(VerticalAlign::Top);
        scene.push(Text::new(x + 40.0, legend_y + 5.0, label, style));
    }

    scene
}

fn branch_top(origin: Point) -> Point {
    Point::new(origin.x + NODE_WIDTH / 2.0, origin.y)
}

fn node(scene: &mut Scene, origin: Point, width: f32, fill: &str, outline: &str, outline_width: f32) {
    scene.push(
        Rect::new(origin.x, origin.y, width, NODE_HEIGHT)
            .fill(fill)
            .stroke(outline, outline_width),
    );
}

fn edge(scene: &mut Scene, from: Point, to: Point, color: &str, width: f32) {
    let head = if width >= 3.0 { 10.0 } else { 7.0 };
    scene.push(Arrow::new(from, to, Stroke::new(color, width)).head(head, head));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Instruction;

    fn nodes_filled<'a>(scene: &'a Scene, fill: &'a str, width: f32) -> Vec<&'a Rect> {
        scene
            .rects()
            .filter(|rect| rect.paint.fill.as_deref() == Some(fill))
            .filter(|rect| rect.width == width && rect.height == NODE_HEIGHT)
            .collect()
    }

    #[test]
    fn canvas_is_fixed_size() {
        let scene = btree(&Theme::default());
        assert_eq!((scene.width, scene.height), (1200.0, 900.0));
    }

    #[test]
    fn one_root_two_branches_four_leaves() {
        let theme = Theme::default();
        let scene = btree(&theme);
        assert_eq!(nodes_filled(&scene, &theme.tree.root, NODE_WIDTH).len(), 1);
        assert_eq!(nodes_filled(&scene, &theme.tree.branch, NODE_WIDTH).len(), 2);
        let leaves = nodes_filled(&scene, &theme.tree.leaf, LEAF_WIDTH);
        assert_eq!(leaves.len(), 4);

        for (leaf, keys) in leaves.iter().zip(LEAF_KEYS) {
            let center_x = leaf.origin.x + LEAF_WIDTH / 2.0;
            assert!(
                scene
                    .texts()
                    .any(|text| text.content == keys && text.position.x == center_x),
                "missing leaf label {keys}"
            );
        }
    }

    #[test]
    fn every_leaf_is_reached_by_an_arrow() {
        let scene = btree(&Theme::default());
        let tips: Vec<Point> = scene
            .instructions()
            .iter()
            .filter_map(|instruction| match instruction {
                Instruction::Arrow(arrow) => Some(arrow.to),
                _ => None,
            })
            .collect();
        assert_eq!(tips.len(), 6);
        for leaf_x in LEAF_X {
            assert!(tips.contains(&Point::new(leaf_x + LEAF_WIDTH / 2.0, LEAF_Y)));
        }
    }
}
