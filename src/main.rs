mod app;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mycelial_net::config::{DEFAULT_SHEETS_RANGE, LayoutParams, Settings, SourceSettings, ViewMode};
use mycelial_net::graph::fetch_graph;
use mycelial_net::sheet::{FileSource, RowSource, SheetsSource};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// TOML file with palette, layout, column and source settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, global = true)]
    view_mode: Option<ViewMode>,
    /// Read rows from a local JSON file instead of the sheet.
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    #[arg(long, global = true)]
    sheet_id: Option<String>,
    #[arg(long, global = true)]
    range: Option<String>,
    #[arg(long, env = "MYCELIAL_SHEETS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, global = true)]
    ring_spacing: Option<f64>,
    #[arg(long, global = true)]
    layer_angular_factor: Option<f64>,
    /// Use the volumetric seed layout (tighter rings with a z band).
    #[arg(long, global = true)]
    volumetric: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive viewer (default).
    View,
    /// Build once and write the graph as JSON.
    Export {
        /// Output file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mycelial_net=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    let source = row_source(&settings.source)?;
    tracing::info!(source = %source.describe(), view_mode = %settings.view_mode, "starting");

    match args.command.unwrap_or(Command::View) {
        Command::View => run_viewer(source, settings),
        Command::Export { output } => export(source.as_ref(), &settings, output),
    }
}

/// Defaults, then the config file, then command-line flags.
fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(view_mode) = args.view_mode {
        settings.view_mode = view_mode;
    }
    if args.volumetric {
        settings.graph.layout = LayoutParams::volumetric();
    }
    if let Some(ring_spacing) = args.ring_spacing {
        settings.graph.layout.ring_spacing = ring_spacing;
    }
    if let Some(factor) = args.layer_angular_factor {
        settings.graph.layout.layer_angular_factor = factor;
    }

    let source = &mut settings.source;
    if let Some(input) = &args.input {
        source.input = Some(input.clone());
    }
    if let Some(sheet_id) = &args.sheet_id {
        source.sheet_id = Some(sheet_id.clone());
    }
    if let Some(range) = &args.range {
        source.range = Some(range.clone());
    }
    if let Some(api_key) = &args.api_key {
        source.api_key = Some(api_key.clone());
    }

    settings.graph.validate().context("invalid settings")?;
    Ok(settings)
}

fn row_source(settings: &SourceSettings) -> anyhow::Result<Arc<dyn RowSource>> {
    if let Some(input) = &settings.input {
        return Ok(Arc::new(FileSource::new(input)));
    }
    let Some(sheet_id) = &settings.sheet_id else {
        bail!("no row source configured; pass --input or --sheet-id");
    };
    let range = settings.range.as_deref().unwrap_or(DEFAULT_SHEETS_RANGE);
    let source = SheetsSource::new(sheet_id, range, settings.api_key.clone())
        .context("failed to create the sheets client")?;
    Ok(Arc::new(source))
}

fn export(
    source: &dyn RowSource,
    settings: &Settings,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let graph = fetch_graph(source, settings.view_mode, &settings.graph)
        .with_context(|| format!("failed to load rows from {}", source.describe()))?;
    let json = serde_json::to_string_pretty(&graph).context("failed to encode graph")?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), nodes = graph.nodes.len(), "wrote graph");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write graph to stdout")?;
        }
    }
    Ok(())
}

fn run_viewer(source: Arc<dyn RowSource>, settings: Settings) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };
    let Settings { view_mode, graph, .. } = settings;

    eframe::run_native(
        "MycelialNet",
        options,
        Box::new(move |cc| Ok(Box::new(app::MycelialApp::new(cc, source, graph, view_mode)))),
    )
    .map_err(|error| anyhow!("viewer failed: {error}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mycelial-net").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "view_mode = \"country\"\n[layout]\nring_spacing = 50.0\nlayer_angular_factor = 7.0"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let args = parse(&["--config", path, "--ring-spacing", "80"]);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.view_mode, ViewMode::Country);
        assert_eq!(settings.graph.layout.ring_spacing, 80.0);
        assert_eq!(settings.graph.layout.layer_angular_factor, 7.0);
    }

    #[test]
    fn volumetric_flag_switches_layout() {
        let args = parse(&["--volumetric", "--view-mode", "country"]);
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.graph.layout, LayoutParams::volumetric());
        assert_eq!(settings.view_mode, ViewMode::Country);
    }

    #[test]
    fn rejects_invalid_flag_values() {
        assert!(resolve_settings(&parse(&["--ring-spacing=-1"])).is_err());
    }

    #[test]
    fn export_subcommand_parses() {
        let args = parse(&["export", "-o", "graph.json", "--input", "rows.json"]);
        assert!(matches!(
            args.command,
            Some(Command::Export { output: Some(ref path) }) if path == &PathBuf::from("graph.json")
        ));
        assert_eq!(args.input, Some(PathBuf::from("rows.json")));
    }

    #[test]
    fn source_requires_input_or_sheet() {
        assert!(row_source(&SourceSettings::default()).is_err());

        let file = row_source(&SourceSettings {
            input: Some(PathBuf::from("rows.json")),
            sheet_id: Some("ignored".to_owned()),
            ..SourceSettings::default()
        })
        .unwrap();
        assert!(file.describe().contains("rows.json"));
    }
}
