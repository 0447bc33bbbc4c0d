use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Multiplier applied when rasterizing to PNG.
    pub scale: f32,
    /// Extra directories searched for fonts before system fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Fail instead of substituting a default when a theme font is missing.
    pub strict_fonts: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_dirs: Vec::new(),
            strict_fonts: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    mono_font_family: Option<String>,
    line_height: Option<f32>,
    text_color: Option<String>,
    background: Option<String>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    accent_color: Option<String>,
    highlight_color: Option<String>,
    light_color: Option<String>,
    border_color: Option<String>,
    null_fill: Option<String>,
    null_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
    font_dirs: Option<Vec<PathBuf>>,
    strict_fonts: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config = parse_config(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;

    // Relative font directories are resolved against the config file.
    if let Some(base) = path.parent() {
        for dir in &mut config.render.font_dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme `{theme_name}`"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.mono_font_family {
            theme.mono_font_family = v;
        }
        if let Some(v) = vars.line_height {
            theme.line_height = v;
        }
        if let Some(v) = vars.text_color {
            theme.ink = v.clone();
            theme.palette.text = v;
        }
        if let Some(v) = vars.background {
            theme.paper = v.clone();
            theme.palette.background = v;
        }
        if let Some(v) = vars.primary_color {
            theme.palette.primary = v;
        }
        if let Some(v) = vars.secondary_color {
            theme.palette.secondary = v;
        }
        if let Some(v) = vars.accent_color {
            theme.palette.accent = v;
        }
        if let Some(v) = vars.highlight_color {
            theme.palette.highlight = v;
        }
        if let Some(v) = vars.light_color {
            theme.palette.light = v;
        }
        if let Some(v) = vars.border_color {
            theme.palette.border = v;
        }
        if let Some(v) = vars.null_fill {
            theme.null_fill = v;
        }
        if let Some(v) = vars.null_text {
            theme.null_text = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.scale {
            anyhow::ensure!(v > 0.0 && v.is_finite(), "render.scale must be positive, got {v}");
            config.render.scale = v;
        }
        if let Some(v) = render.font_dirs {
            config.render.font_dirs = v;
        }
        if let Some(v) = render.strict_fonts {
            config.render.strict_fonts = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.render.scale, 1.0);
        assert!(!config.render.strict_fonts);
        assert_eq!(config.theme.palette.primary, "#2D5016");
    }

    #[test]
    fn json5_overrides_merge_onto_defaults() {
        let config = parse_config(
            r##"{
                // comments are fine
                theme: "classic",
                themeVariables: { fontFamily: "Inter", nullFill: "#FFFF00" },
                render: { scale: 2, strictFonts: true },
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.font_family, "Inter");
        assert_eq!(config.theme.null_fill, "#FFFF00");
        assert_eq!(config.theme.palette.secondary, "#2C5282");
        assert_eq!(config.render.scale, 2.0);
        assert!(config.render.strict_fonts);
    }

    #[test]
    fn background_and_text_color_reach_every_figure() {
        let config = parse_config(
            r##"{ themeVariables: { background: "#123456", textColor: "#ABCDEF" } }"##,
        )
        .unwrap();
        for figure in crate::figures::Figure::ALL {
            let scene = figure.build(&config.theme);
            assert_eq!(scene.background, "#123456", "{figure}: background ignored");
            let svg = crate::render::render_svg(&scene, &config.theme);
            assert!(svg.contains("#ABCDEF"), "{figure}: textColor ignored");
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = parse_config(r#"{ "theme": "neon" }"#).unwrap_err();
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        assert!(parse_config("{ render: { scale: 0 } }").is_err());
    }

    #[test]
    fn relative_font_dirs_resolve_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dbfig.json5");
        std::fs::write(&path, "{ render: { fontDirs: [\"fonts\"] } }").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.render.font_dirs, vec![dir.path().join("fonts")]);
    }
}
