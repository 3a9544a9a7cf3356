use crate::config::{RenderConfig, load_config};
use crate::layout::plan_request;
use crate::logging::{LoggingConfig, init_logging};
use crate::params::{Params, parse_request};
use crate::plan_dump::write_plan_dump;
use crate::render::{render_svg, write_output_svg};
use crate::request::ProgressKind;
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "prsvg", version, about = "Progress bar and donut renderer")]
pub struct Args {
    /// Shape to render
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Query parameter as name=value (repeatable, later values win)
    #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (defaults, limits, themeVariables)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write the computed render plan as JSON
    #[arg(long = "dumpPlan")]
    pub dump_plan: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Bar,
    Donut,
}

impl From<KindArg> for ProgressKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bar => ProgressKind::Bar,
            KindArg::Donut => ProgressKind::Donut,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        env_filter: verbosity_filter(args.verbose),
        ..Default::default()
    });

    let config = load_config(args.config.as_deref())?;
    let params = collect_params(&args.params);
    let request = parse_request(args.kind.into(), &params, &config)?;
    let plan = plan_request(&request, &config);

    if let Some(path) = args.dump_plan.as_deref() {
        write_plan_dump(path, &plan, &request)?;
    }

    let svg = render_svg(&plan, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config.render)?;
        }
    }
    Ok(())
}

fn verbosity_filter(verbose: u8) -> Option<String> {
    match verbose {
        0 => None,
        1 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    }
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn collect_params(pairs: &[(String, String)]) -> Params {
    pairs.iter().cloned().collect()
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    crate::render::write_output_png(svg, output, render_cfg)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
