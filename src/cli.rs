//! Command-line interface
//!
//! Supports:
//! - Validating a layout definition
//! - Printing the absolute geometry of a layout for a given viewport
//! - Normalizing a definition (explicit sizes, canonical key order)
//! - Replaying a recorded message script against a layout
//! - Showing where config, layouts and logs live

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::config_paths;
use crate::engine::LayoutEngine;
use crate::layout_def::LayoutDef;
use crate::messages::{script_from_yaml, Msg, ViewportMsg};
use crate::model::AppModel;
use crate::update::update;

/// Docking layout engine for split panes and floating panels
#[derive(Parser, Debug)]
#[command(
    name = "dockspace",
    version,
    about = "Docking layout engine for split panes and floating panels"
)]
pub struct CliArgs {
    /// Log debug output to the console
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and validate a layout definition
    Validate {
        /// Layout definition (.yaml, .yml or .json)
        layout: PathBuf,
    },
    /// Print the absolute geometry of every pane, splitter and float
    Geometry {
        /// Layout definition; defaults to `default_layout` from config.yaml
        layout: Option<PathBuf>,
        #[command(flatten)]
        viewport: ViewportArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Re-serialize a layout with every size spelled out
    Normalize {
        layout: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Feed a list of messages through the update loop and print the result
    Replay {
        layout: PathBuf,
        /// Message script (.yaml, .yml or .json list of messages)
        script: PathBuf,
        #[command(flatten)]
        viewport: ViewportArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
    /// Show the config file, layouts directory and current log file
    Paths,
}

/// Size of the area the layout fills
#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct ViewportArgs {
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to encode YAML"),
            OutputFormat::Json => {
                serde_json::to_string_pretty(value).context("Failed to encode JSON")
            }
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read a layout definition, choosing the parser by file extension
pub fn read_layout(path: &Path) -> Result<LayoutDef> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    let def = if is_json(path) {
        LayoutDef::from_json(&text)
    } else {
        LayoutDef::from_yaml(&text)
    };
    def.with_context(|| format!("Failed to parse layout {}", path.display()))
}

/// Read and validate a layout into an engine
pub fn load_engine(path: &Path) -> Result<LayoutEngine> {
    let def = read_layout(path)?;
    let engine = LayoutEngine::from_def(&def)
        .with_context(|| format!("Invalid layout {}", path.display()))?;
    tracing::info!("Loaded layout from {}", path.display());
    Ok(engine)
}

/// Read a message script
pub fn read_script(path: &Path) -> Result<Vec<Msg>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    if is_json(path) {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    } else {
        script_from_yaml(&text)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// Apply `msgs` in order. Returns how many produced a command.
pub fn replay(model: &mut AppModel, msgs: Vec<Msg>) -> usize {
    msgs.into_iter()
        .filter_map(|msg| update(model, msg))
        .count()
}

/// Run a parsed command, returning what should be printed
pub fn run(command: Command, config: EngineConfig) -> Result<String> {
    match command {
        Command::Validate { layout } => {
            let engine = load_engine(&layout)?;
            let splitters = engine.compute_layout(config.splitter_width).splitters.len();
            Ok(format!(
                "{}: ok ({} panes, {} splitters, {} floats)",
                layout.display(),
                engine.root().leaf_count(),
                splitters,
                engine.floats().len()
            ))
        }
        Command::Geometry {
            layout,
            viewport,
            format,
        } => {
            let path = match layout.or_else(|| config.default_layout_path()) {
                Some(path) => path,
                None => bail!("No layout given and no default_layout configured"),
            };
            let model = model_for(&path, viewport, config)?;
            format.render(&model.ui.frame)
        }
        Command::Normalize { layout, format } => {
            let engine = load_engine(&layout)?;
            format.render(&engine.to_def())
        }
        Command::Replay {
            layout,
            script,
            viewport,
            format,
        } => {
            let msgs = read_script(&script)?;
            let mut model = model_for(&layout, viewport, config)?;
            let total = msgs.len();
            let handled = replay(&mut model, msgs);
            tracing::info!("Replayed {} messages ({} produced commands)", total, handled);
            format.render(&model.engine.to_def())
        }
        Command::Paths => {
            let show = |path: Option<PathBuf>| {
                path.map_or_else(|| "(unavailable)".to_string(), |p| p.display().to_string())
            };
            Ok(format!(
                "config:  {}\nlayouts: {}\nlog:     {}",
                show(config_paths::config_file()),
                show(config_paths::layouts_dir()),
                show(config_paths::log_file())
            ))
        }
    }
}

fn model_for(path: &Path, viewport: ViewportArgs, config: EngineConfig) -> Result<AppModel> {
    let engine = load_engine(path)?;
    let mut model = AppModel::new(engine, config);
    let resize = Msg::Viewport(ViewportMsg::Resize {
        width: viewport.width,
        height: viewport.height,
    });
    if update(&mut model, resize).is_none() {
        bail!(
            "Viewport {}x{} is not a valid size",
            viewport.width,
            viewport.height
        );
    }
    Ok(model)
}
