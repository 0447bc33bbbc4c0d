use crate::error::RenderError;
use crate::figures::Figure;
use crate::scene::{Instruction, Scene};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SceneDump {
    pub figure: String,
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub instructions: Vec<InstructionDump>,
}

#[derive(Debug, Serialize)]
pub struct InstructionDump {
    pub index: usize,
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<String>,
    pub label: Option<String>,
}

impl SceneDump {
    pub fn from_scene(figure: Figure, scene: &Scene) -> Self {
        let instructions = scene
            .instructions()
            .iter()
            .enumerate()
            .map(|(index, instruction)| {
                let (x, y, width, height) = instruction.bounds();
                InstructionDump {
                    index,
                    kind: instruction.kind().to_string(),
                    x,
                    y,
                    width,
                    height,
                    fill: fill_of(instruction).map(str::to_string),
                    label: instruction.label_text().map(str::to_string),
                }
            })
            .collect();

        SceneDump {
            figure: figure.id().to_string(),
            width: scene.width,
            height: scene.height,
            background: scene.background.clone(),
            instructions,
        }
    }
}

fn fill_of(instruction: &Instruction) -> Option<&str> {
    match instruction {
        Instruction::Rect(rect) => rect.paint.fill.as_deref(),
        Instruction::Circle(circle) => circle.paint.fill.as_deref(),
        Instruction::Polygon(polygon) => polygon.paint.fill.as_deref(),
        Instruction::Text(text) => Some(text.style.color.as_str()),
        Instruction::Line(_) | Instruction::Arrow(_) => None,
    }
}

/// Writes the scene as pretty JSON, creating the parent directory if needed.
pub fn write_scene_dump(path: &Path, figure: Figure, scene: &Scene) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| RenderError::io(parent, err))?;
    }
    let file = File::create(path).map_err(|err| RenderError::io(path, err))?;
    let writer = BufWriter::new(file);
    let dump = SceneDump::from_scene(figure, scene);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn dump_keeps_paint_order_and_labels() {
        let scene = Figure::BTree.build(&Theme::default());
        let dump = SceneDump::from_scene(Figure::BTree, &scene);
        assert_eq!(dump.instructions.len(), scene.len());
        assert_eq!((dump.width, dump.height), (1200.0, 900.0));
        assert!(dump.instructions.iter().enumerate().all(|(idx, item)| item.index == idx));
        assert!(
            dump.instructions
                .iter()
                .any(|item| item.kind == "text" && item.label.as_deref() == Some("60, 70"))
        );
    }

    #[test]
    fn writes_json_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dumps/btree.scene.json");
        let scene = Figure::BTree.build(&Theme::default());
        write_scene_dump(&path, Figure::BTree, &scene).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["figure"], "btree");
        assert_eq!(value["instructions"][0]["kind"], "text");
    }
}
