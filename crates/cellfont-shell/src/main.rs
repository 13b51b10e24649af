use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use cellfont::{Canvas, FontChain};
use clap::Parser;
use log::info;

use crate::demo::{DemoScene, Layout};
use crate::shell::{FrameDriver, WindowConfig};
mod demo;
mod shell;

#[derive(Parser)]
#[command(name = "cellfont", about = "Bitmap-font console demo", version)]
struct Cli {
    /// BMFont descriptor; repeat for fallbacks, highest priority first
    #[arg(
        short,
        long = "font",
        value_name = "PATH",
        default_values = ["assets/font/unscii.fnt", "assets/font/misaki_gothic_2nd.fnt"]
    )]
    fonts: Vec<PathBuf>,
    /// Console width in cells
    #[arg(long, default_value = "40", value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,
    /// Console height in cells
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..))]
    cell_width: u32,
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u32).range(1..))]
    cell_height: u32,
    /// Initial window scale
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,
    #[arg(long, default_value = "cellfont")]
    title: String,
    /// Extra line printed on the bottom row
    #[arg(short, long)]
    text: Option<String>,
}

fn run(cli: Cli) -> Result<()> {
    let layout = Layout {
        cell_w: cli.cell_width as i32,
        cell_h: cli.cell_height as i32,
        cols: cli.cols as i32,
        rows: cli.rows as i32,
    };
    let (width, height) = (layout.width() as u32, layout.height() as u32);
    let mut canvas = Canvas::new(width, height);

    let mut fonts = FontChain::new();
    for path in &cli.fonts {
        fonts.load(&mut canvas, path);
    }
    info!("loaded {} font(s)", fonts.len());

    let config = WindowConfig {
        title: cli.title,
        width: width * cli.scale,
        height: height * cli.scale,
        min_width: width,
        min_height: height,
    };
    let scene = DemoScene::new(fonts, layout, cli.text);
    FrameDriver::new(config, canvas, scene).run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
