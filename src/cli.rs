use crate::config::load_config;
use crate::dataset::parse_dataset;
use crate::layout_dump::write_layout_dump;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::viz::Visualization;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "fundmap",
    version,
    about = "Treemap renderer for hierarchical funding datasets"
)]
pub struct Args {
    /// Input JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Fetch the dataset from a URL instead (single GET, no auth, no retry)
    #[arg(short = 'u', long = "url", conflicts_with = "input")]
    pub url: Option<String>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (themeVariables, treemap/legend geometry)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Treemap canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Treemap canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed tile/legend geometry as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.treemap.width = width;
    }
    if let Some(height) = args.height {
        config.layout.treemap.height = height;
    }

    let input = read_input(args.input.as_deref(), args.url.as_deref())?;
    let raw = parse_dataset(&input)?;
    let viz = Visualization::create(&raw, &config.theme, &config.layout)?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, viz.layout())?;
    }

    let svg = render_svg(viz.layout(), &config.theme, &config.layout);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let output = args
                    .output
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
                write_output_png(&svg, &output, &config.render, &config.theme)?;
            }
            #[cfg(not(feature = "png"))]
            return Err(anyhow::anyhow!(
                "png output requires building with the `png` feature"
            ));
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>, url: Option<&str>) -> Result<String> {
    if let Some(url) = url {
        let response = reqwest::blocking::get(url)?.error_for_status()?;
        return Ok(response.text()?);
    }
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn url_and_input_conflict() {
        let parsed = Args::try_parse_from(["fundmap", "-i", "data.json", "-u", "http://x"]);
        assert!(parsed.is_err());
    }
}
