use crate::config::{Config, load_config};
use crate::figures::Figure;
use crate::render::{OutputFormat, write_scene};
use crate::scene_dump::write_scene_dump;
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dbfig", version, about = "Renders the database course figures to PNG or SVG")]
pub struct Args {
    /// Figures to render (see --list). Renders every figure when omitted.
    #[arg(value_name = "FIGURE")]
    pub figures: Vec<Figure>,

    /// Output directory
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "png")]
    pub output_format: OutputFormat,

    /// Config file (JSON5: theme, themeVariables, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// PNG scale factor, overriding render.scale from the config (default 1.0)
    #[arg(short = 's', long = "scale")]
    pub scale: Option<f32>,

    /// Also write each scene as JSON into this directory
    #[arg(long = "dumpScene", value_name = "DIR")]
    pub dump_scene: Option<PathBuf>,

    /// List figure ids and output paths, then exit
    #[arg(long = "list")]
    pub list: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    if args.list {
        for figure in Figure::ALL {
            println!("{}\t{}", figure.id(), figure.output_stem());
        }
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        anyhow::ensure!(scale > 0.0 && scale.is_finite(), "--scale must be positive, got {scale}");
        config.render.scale = scale;
    }

    let figures = if args.figures.is_empty() {
        Figure::ALL.to_vec()
    } else {
        args.figures.clone()
    };

    let mut failed = Vec::new();
    for figure in &figures {
        println!("Creating {}...", figure.title());
        match render_figure(
            *figure,
            &args.output,
            args.output_format,
            args.dump_scene.as_deref(),
            &config,
        ) {
            Ok(path) => println!("  saved {}", path.display()),
            Err(err) => {
                log::warn!("{figure} failed: {err:#}");
                eprintln!("  failed {}: {err:#}", figure.title());
                failed.push(figure.id());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!(
            "{} of {} figures failed: {}",
            failed.len(),
            figures.len(),
            failed.join(", ")
        );
    }
    Ok(())
}

/// Builds one figure and writes it under `output_dir`, returning the written path.
pub fn render_figure(
    figure: Figure,
    output_dir: &Path,
    format: OutputFormat,
    dump_dir: Option<&Path>,
    config: &Config,
) -> Result<PathBuf> {
    let scene = figure.build(&config.theme);
    let path = figure.output_path(output_dir, format);
    write_scene(&scene, &path, format, config)?;
    if let Some(dir) = dump_dir {
        let dump_path = dir.join(format!("{}.scene.json", figure.output_stem()));
        write_scene_dump(&dump_path, figure, &scene)?;
    }
    Ok(path)
}
