use crate::cli::ScanArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use trajscan::core::io::xdatcar::XdatcarFile;
use trajscan::progress::ProgressReporter;
use trajscan::workflows::scan::{self, OutputLayout};

pub fn run(args: ScanArgs) -> Result<()> {
    let app_config = config::build_config(&args)?;

    info!("Loading trajectory from {:?}", &app_config.trajectory);
    let trajectory =
        XdatcarFile::read_from_path(&app_config.trajectory).map_err(|e| CliError::FileParsing {
            path: app_config.trajectory.clone(),
            source: e.into(),
        })?;
    println!(
        "Loaded {} frame(s) of {} atoms from {}",
        trajectory.num_frames(),
        trajectory.num_sites(),
        app_config.trajectory.display()
    );

    let layout = OutputLayout::new(&app_config.output);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core scan workflow...");
    let summary = scan::run(&trajectory, &app_config.scan, &layout, &reporter)?;

    if summary.contacts.is_empty() {
        warn!("Scan completed but no pair satisfied the condition.");
        println!(
            "No {} pair satisfied '{} {}' in any frame.",
            app_config.scan.pair, app_config.scan.condition, app_config.scan.cutoff
        );
    } else {
        println!(
            "Found {} contact(s) in {} of {} frame(s).",
            summary.contacts.len(),
            summary.frames_matched,
            summary.frames_total
        );
        if summary.heatmaps_written > 0 {
            println!(
                "Wrote {} heatmap(s) to {}",
                summary.heatmaps_written,
                layout.heatmap_dir(&app_config.scan.pair).display()
            );
        }
    }
    println!("Report written to: {}", summary.text_report.display());

    Ok(())
}
