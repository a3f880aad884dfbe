use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use seqtrack::command::ViewerCommand;
use seqtrack::options::ViewerOptions;
use seqtrack::protein_data::ProteinData;
use seqtrack::structure::StructureViewer;
use seqtrack::TrackError;

#[derive(Parser)]
#[command(
    name = "seqtrack",
    about = "Render a protein's feature tracks to SVG",
    version
)]
struct Cli {
    /// Protein payload (JSON)
    protein: Option<PathBuf>,

    /// Options preset (TOML)
    #[arg(short, long, conflicts_with = "preset")]
    options: Option<PathBuf>,

    /// Load the named preset from the presets directory
    #[arg(long, value_name = "NAME", requires = "preset_dir")]
    preset: Option<String>,

    /// Directory holding named presets
    #[arg(long, value_name = "DIR")]
    preset_dir: Option<PathBuf>,

    /// Open the zoom viewer on a residue range (format: START:WIDTH)
    #[arg(short, long, value_parser = parse_zoom)]
    zoom: Option<(f64, f64)>,

    /// Hide a track by name (repeatable)
    #[arg(long = "hide", value_name = "TRACK")]
    hidden: Vec<String>,

    /// Exclude a modification type from PTM bars (repeatable)
    #[arg(long = "disable-ptm", value_name = "TYPE")]
    disabled_ptms: Vec<String>,

    /// Exclude an experiment from PTM bars (repeatable)
    #[arg(long = "disable-exp", value_name = "ID")]
    disabled_experiments: Vec<String>,

    /// Write the SVG here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the effective options as a TOML preset
    #[arg(long, value_name = "PATH")]
    save_options: Option<PathBuf>,

    /// Print the options JSON schema and exit
    #[arg(long)]
    print_schema: bool,

    /// List the presets in the presets directory and exit
    #[arg(long, requires = "preset_dir")]
    list_presets: bool,
}

fn parse_zoom(arg: &str) -> Result<(f64, f64), String> {
    let (start, width) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected START:WIDTH, got {arg:?}"))?;
    let start = start.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let width = width.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    Ok((start, width))
}

fn commands(cli: &Cli) -> Vec<ViewerCommand> {
    let mut out: Vec<ViewerCommand> = cli
        .hidden
        .iter()
        .map(|name| ViewerCommand::ToggleTrack {
            name: name.clone(),
            visible: false,
        })
        .collect();
    out.extend(cli.disabled_ptms.iter().map(|t| ViewerCommand::TogglePtm {
        mod_type: t.clone(),
        enabled: false,
    }));
    out.extend(cli.disabled_experiments.iter().map(|e| {
        ViewerCommand::ToggleExperiment {
            experiment: e.clone(),
            enabled: false,
        }
    }));
    if let Some((start, width)) = cli.zoom {
        out.push(ViewerCommand::ZoomTo { start, width });
    }
    out
}

fn run(cli: &Cli) -> Result<(), TrackError> {
    let mut stdout = std::io::stdout().lock();
    if cli.print_schema {
        let schema = serde_json::to_string_pretty(&ViewerOptions::json_schema())
            .map_err(|e| TrackError::Render(e.to_string()))?;
        writeln!(stdout, "{schema}")?;
        return Ok(());
    }
    if cli.list_presets {
        if let Some(dir) = &cli.preset_dir {
            for name in ViewerOptions::list_presets(dir) {
                writeln!(stdout, "{name}")?;
            }
        }
        return Ok(());
    }

    let preset = cli
        .preset_dir
        .as_deref()
        .zip(cli.preset.as_deref())
        .map(|(dir, name)| ViewerOptions::preset_path(dir, name));
    let options = match cli.options.as_ref().or(preset.as_ref()) {
        Some(path) => ViewerOptions::load(path)?,
        None => ViewerOptions::default(),
    };
    if let Some(path) = &cli.save_options {
        options.save(path)?;
        log::info!("saved options to {}", path.display());
    }
    let Some(protein) = &cli.protein else {
        if cli.save_options.is_some() {
            return Ok(());
        }
        return Err(TrackError::DataParse("no protein payload given".to_owned()));
    };

    let data = ProteinData::load(protein)?;
    let mut viewer = StructureViewer::builder(data).with_options(options).build();
    for command in commands(cli) {
        let _ = viewer.execute(command)?;
    }
    viewer.finish();

    match &cli.output {
        Some(path) => viewer.save_svg(path),
        None => {
            writeln!(stdout, "{}", viewer.export_svg())?;
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
