use anyhow::{Context, Result};
use clap::Parser;
use goalpost::{
    utl::{IntoArray, IntoImage},
    ProjectionOptions, Projector, RgbImg,
};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

const ABOUT: &str = "Goalpost projects a logo into the goal frame of every image of a sequence.
The four goal corners of each frame are read from an annotation file, the logo is warped
onto them with a homography and the composited frames are written as PNG files.";

/// CLI tool that paints a logo into annotated goal frames
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = ABOUT)]
pub struct Args {
    /// Logo image to project
    pub logo: PathBuf,

    /// Directory holding the frames as PNG files
    pub frames: PathBuf,

    /// JSON file with four [x, y] goal corners per frame
    pub corners: PathBuf,

    /// Directory the composited frames are written to
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,

    /// Indices of the frames to save
    #[arg(short, long, value_delimiter = ',', default_values_t = [0, 25, 50, 75, 100, 125])]
    pub save: Vec<usize>,

    /// Save every frame instead of the selected ones
    #[arg(short, long)]
    pub all: bool,

    /// Condition the corner coordinates before estimating the homography
    #[arg(long)]
    pub normalize: bool,

    /// Skip frames whose goal corners are collinear or whose projection degenerates
    #[arg(long)]
    pub strict: bool,

    /// Log every stage of the pipeline
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let logo = image::open(&args.logo)
        .with_context(|| format!("failed to open logo {}", args.logo.display()))?
        .to_rgb8()
        .into_array()?;

    let annotations = fs::read_to_string(&args.corners)
        .with_context(|| format!("failed to read corners {}", args.corners.display()))?;
    let mut goals = goalpost::parse_goal_corners(&annotations)?;

    let mut paths = frame_paths(&args.frames)?;
    let count = paths.len().min(goals.len());
    if paths.len() != goals.len() {
        warn!(
            "{} frames but {} annotations, processing the first {count}",
            paths.len(),
            goals.len()
        );
    }
    paths.truncate(count);
    goals.truncate(count);

    let frames = paths
        .iter()
        .map(|path| {
            let img = image::open(path)
                .with_context(|| format!("failed to open frame {}", path.display()))?;
            Ok(img.to_rgb8().into_array()?)
        })
        .collect::<Result<Vec<_>>>()?;
    info!("loaded {} frames from {}", frames.len(), args.frames.display());

    let options = ProjectionOptions {
        normalize: args.normalize,
        reject_degenerate: args.strict,
        strict_projection: args.strict,
    };
    let projector = Projector::new(logo).with_options(options);
    let results = projector.project_all(&frames, &goals)?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut saved = 0;
    for (idx, result) in results.into_iter().enumerate() {
        let frame = match result {
            Ok(frame) => frame,
            Err(err) => {
                warn!("skipping frame {idx}: {err}");
                continue;
            }
        };

        if args.all || args.save.contains(&idx) {
            let path = args.output.join(format!("frame_{idx}.png"));
            let img: RgbImg<u8> = frame.into_image()?;
            img.save(&path)
                .with_context(|| format!("failed to save {}", path.display()))?;
            saved += 1;
        }
    }

    info!("saved {saved} frames to {}", args.output.display());
    Ok(())
}

/// Lists the PNG files of a directory in lexicographic order
fn frame_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")))
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}
