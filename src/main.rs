//! Batch mirror-line detection over image files.
//!
//! Each input is processed independently: one image failing to load or to
//! produce a line never aborts the rest of the batch.

use clap::Parser;
use mirror_detector::image::{
    draw_match_markers, draw_mirror_line, load_rgb_image, save_rgb_image, write_json_file,
};
use mirror_detector::{DetectorOptions, MirrorDetector};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mirror-detector")]
#[command(about = "Detect the bilateral symmetry axis of still images")]
#[command(version)]
struct Cli {
    /// Input images (shell-expanded glob).
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Directory receiving annotated images and JSON reports.
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Overlay the strongest correspondences on the annotated image.
    #[arg(long)]
    show_detail: bool,

    /// Trust the top accumulator bin unconditionally (vertical mirror axis).
    #[arg(long)]
    vertical: bool,

    /// Accumulator resolution per axis.
    #[arg(long, default_value_t = 200)]
    bins: usize,

    /// Correspondences kept in the diagnostic trace.
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let detector = MirrorDetector::new(DetectorOptions {
        vertical_only: cli.vertical,
        top_matches: cli.top,
        histogram_bins: cli.bins,
    });

    for path in &cli.images {
        // Per-image outcomes are independent; report and move on.
        if let Err(err) = process_image(&detector, path, &cli) {
            eprintln!("{}: {err}", path.display());
        }
    }
    Ok(())
}

fn process_image(detector: &MirrorDetector, path: &Path, cli: &Cli) -> Result<(), String> {
    let image = load_rgb_image(path)?;
    let report = detector.detect_with_diagnostics(&image);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Unusable file name: {}", path.display()))?;
    write_json_file(&cli.out_dir.join(format!("{stem}_report.json")), &report)?;

    match (report.line, report.failure) {
        (Some(line), _) => {
            let mut annotated = image;
            if cli.show_detail {
                if let Some(matching) = &report.trace.matching {
                    let pairs: Vec<([f32; 2], [f32; 2])> = matching
                        .top_matches
                        .iter()
                        .map(|m| (m.point, m.mirrored))
                        .collect();
                    draw_match_markers(&mut annotated, &pairs);
                }
            }
            draw_mirror_line(&mut annotated, &line);
            let annotated_path = cli.out_dir.join(format!("{stem}_mirror.png"));
            save_rgb_image(&annotated, &annotated_path)?;
            println!(
                "{}: r={:.2} theta={:.4} -> {}",
                path.display(),
                line.r,
                line.theta,
                annotated_path.display()
            );
        }
        (None, Some(failure)) => {
            println!("{}: no mirror line ({failure})", path.display());
        }
        (None, None) => {}
    }
    Ok(())
}
