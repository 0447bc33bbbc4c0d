use serde::{Deserialize, Serialize};

/// Colors of the plotted SQL figures (JOIN, GROUP BY, COUNT, NULL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub highlight: String,
    pub light: String,
    pub background: String,
    pub text: String,
    pub white: String,
    pub border: String,
}

/// Colors of the relational-model figures (relations, keys, constraints).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationPalette {
    pub header: String,
    pub alt_header: String,
    pub cell: String,
    pub title: String,
    pub label: String,
    pub note: String,
    pub emphasis: String,
    pub note_fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePalette {
    pub root: String,
    pub branch: String,
    pub leaf: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowPalette {
    pub start: String,
    pub error: String,
    pub success: String,
    pub commit: String,
    pub done: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub mono_font_family: String,
    pub line_height: f32,
    pub ink: String,
    pub paper: String,
    pub null_fill: String,
    pub null_text: String,
    pub table_header: String,
    pub table_header_text: String,
    pub table_body: String,
    pub palette: Palette,
    pub relation: RelationPalette,
    pub tree: TreePalette,
    pub flow: FlowPalette,
}

impl Theme {
    pub fn green() -> Self {
        Self {
            font_family: "Arial, \"Liberation Sans\", \"DejaVu Sans\", sans-serif".to_string(),
            mono_font_family: "\"DejaVu Sans Mono\", \"Liberation Mono\", monospace".to_string(),
            line_height: 1.25,
            ink: "#000000".to_string(),
            paper: "#FFFFFF".to_string(),
            null_fill: "#FFE082".to_string(),
            null_text: "#E65100".to_string(),
            table_header: "#2C5282".to_string(),
            table_header_text: "#F5F5F5".to_string(),
            table_body: "#F5F5DC".to_string(),
            palette: Palette {
                primary: "#2D5016".to_string(),
                secondary: "#4A7C2C".to_string(),
                accent: "#6B9F3E".to_string(),
                highlight: "#8BC34A".to_string(),
                light: "#C5E1A5".to_string(),
                background: "#F1F8E9".to_string(),
                text: "#1B5E20".to_string(),
                white: "#FFFFFF".to_string(),
                border: "#558B2F".to_string(),
            },
            relation: RelationPalette {
                header: "#C8E6C9".to_string(),
                alt_header: "#C8EC69".to_string(),
                cell: "#F0FFF0".to_string(),
                title: "#2E7D32".to_string(),
                label: "#388E3C".to_string(),
                note: "#4CAF50".to_string(),
                emphasis: "#1B5E20".to_string(),
                note_fill: "#E8F5E9".to_string(),
            },
            tree: TreePalette {
                root: "#3498DB".to_string(),
                branch: "#9B59B6".to_string(),
                leaf: "#1ABC9C".to_string(),
            },
            flow: FlowPalette {
                start: "#3498DB".to_string(),
                error: "#E74C3C".to_string(),
                success: "#95E1D3".to_string(),
                commit: "#2ECC71".to_string(),
                done: "#F39C12".to_string(),
            },
        }
    }

    /// Blue variant matching the report's heading colors.
    pub fn classic() -> Self {
        Self {
            palette: Palette {
                primary: "#1A365D".to_string(),
                secondary: "#2C5282".to_string(),
                accent: "#4A77B4".to_string(),
                highlight: "#63B3ED".to_string(),
                light: "#EBF4FF".to_string(),
                background: "#F7FAFC".to_string(),
                text: "#1A202C".to_string(),
                white: "#FFFFFF".to_string(),
                border: "#2B6CB0".to_string(),
            },
            relation: RelationPalette {
                header: "#BEE3F8".to_string(),
                alt_header: "#C3DAFE".to_string(),
                cell: "#F0F8FF".to_string(),
                title: "#1A5490".to_string(),
                label: "#2C5282".to_string(),
                note: "#3182CE".to_string(),
                emphasis: "#1A365D".to_string(),
                note_fill: "#EBF8FF".to_string(),
            },
            ..Self::green()
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "green" | "default" => Some(Self::green()),
            "classic" | "blue" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::green()
    }
}
