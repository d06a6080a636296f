use crate::core::analysis::matrix::DistanceMatrix;
use crate::core::analysis::pairs::{self, PairContact, PairSelector, ThresholdCondition};
use crate::core::io::poscar::{PoscarError, PoscarFile};
use crate::core::io::report;
use crate::core::io::traits::StructureFile;
use crate::core::io::xdatcar::Trajectory;
use crate::core::plot::heatmap::{self, PlotError};
use crate::progress::{Progress, ProgressReporter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Cutoff distance must be a positive number, got {value}")]
    InvalidCutoff { value: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to write POSCAR: {0}")]
    Poscar(#[from] PoscarError),
    #[error("Failed to render heatmap: {0}")]
    Plot(#[from] PlotError),
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration for one pair-distance scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// The element pair to search for.
    pub pair: PairSelector,
    /// The threshold distance in Angstroms; must be finite and positive.
    pub cutoff: f64,
    /// Which side of the cutoff counts as a match.
    pub condition: ThresholdCondition,
    /// Write every frame into the `All_POSCARS` directory.
    pub dump_all_frames: bool,
    /// Render a distance heatmap for every matching frame.
    pub render_heatmaps: bool,
}

impl ScanConfig {
    pub fn new(pair: PairSelector, cutoff: f64, condition: ThresholdCondition) -> Self {
        Self {
            pair,
            cutoff,
            condition,
            dump_all_frames: true,
            render_heatmaps: true,
        }
    }
}

/// The on-disk layout of scan outputs under one root directory.
///
/// Mirrors the directory names of the classic tool: heatmaps and matched
/// POSCARs go into pair-specific directories, frame dumps into
/// `All_POSCARS`, and the reports into the root itself.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn heatmap_dir(&self, pair: &PairSelector) -> PathBuf {
        self.root.join(format!("Heatmaps_{}_Distances", pair))
    }

    pub fn specific_dir(&self, pair: &PairSelector) -> PathBuf {
        self.root.join(format!("Specific_{}_Distances", pair))
    }

    pub fn all_frames_dir(&self) -> PathBuf {
        self.root.join("All_POSCARS")
    }

    pub fn text_report_path(&self) -> PathBuf {
        self.root.join(report::TEXT_REPORT_FILENAME)
    }

    pub fn csv_report_path(&self) -> PathBuf {
        self.root.join(report::CSV_REPORT_FILENAME)
    }
}

/// Summary of one completed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    /// Total number of frames in the trajectory.
    pub frames_total: usize,
    /// Number of frames with at least one matching pair.
    pub frames_matched: usize,
    /// Number of heatmap figures written.
    pub heatmaps_written: usize,
    /// All matched contacts, in frame order.
    pub contacts: Vec<PairContact>,
    /// Path of the plain-text report.
    pub text_report: PathBuf,
    /// Path of the CSV report.
    pub csv_report: PathBuf,
}

/// Runs a pair-distance scan over a trajectory.
///
/// For each frame the pair filter runs over the upper triangle of the site
/// pairs; matching frames get their POSCAR copied into the pair-specific
/// directory and (optionally) a distance heatmap. The consolidated text and
/// CSV reports are written last, covering all frames.
///
/// # Errors
///
/// Returns an error if the cutoff is invalid or any output file cannot be
/// written. The trajectory itself is taken already parsed, so no read errors
/// can occur here.
pub fn run(
    trajectory: &Trajectory,
    config: &ScanConfig,
    layout: &OutputLayout,
    reporter: &ProgressReporter,
) -> Result<ScanSummary, ScanError> {
    if !config.cutoff.is_finite() || config.cutoff <= 0.0 {
        return Err(ScanError::InvalidCutoff {
            value: config.cutoff,
        });
    }

    let (first, second) = config.pair.elements();
    for element in [first, second] {
        if !trajectory.contains_element(element) {
            reporter.message(format!(
                "Element {} does not occur in the trajectory; the scan will match nothing",
                element
            ));
        }
    }

    let heatmap_dir = layout.heatmap_dir(&config.pair);
    let specific_dir = layout.specific_dir(&config.pair);
    let all_frames_dir = layout.all_frames_dir();

    fs::create_dir_all(layout.root())?;
    fs::create_dir_all(&specific_dir)?;
    if config.render_heatmaps {
        fs::create_dir_all(&heatmap_dir)?;
    }
    if config.dump_all_frames {
        fs::create_dir_all(&all_frames_dir)?;
    }

    reporter.report(Progress::PhaseStart {
        name: "Scanning trajectory",
    });
    reporter.report(Progress::TaskStart {
        total_steps: trajectory.num_frames() as u64,
    });

    let mut contacts = Vec::new();
    let mut frames_matched = 0;
    let mut heatmaps_written = 0;

    for (index, frame) in trajectory.frames.iter().enumerate() {
        let frame_number = index + 1;
        let poscar_name = format!("POSCAR_{}", frame_number);

        if config.dump_all_frames {
            PoscarFile::write_to_path(frame, all_frames_dir.join(&poscar_name))?;
        }

        let frame_contacts = pairs::scan_structure(
            frame,
            frame_number,
            &config.pair,
            config.cutoff,
            config.condition,
        );

        if !frame_contacts.is_empty() {
            frames_matched += 1;
            PoscarFile::write_to_path(frame, specific_dir.join(&poscar_name))?;

            if config.render_heatmaps {
                let matrix = DistanceMatrix::from_structure(frame);
                let title = format!(
                    "Heatmap - {} Distances ({})",
                    config.pair, poscar_name
                );
                let figure_path = heatmap_dir.join(format!("Heatmap_{}.svg", poscar_name));
                heatmap::render_distance_heatmap(&figure_path, &matrix, &title)?;
                heatmaps_written += 1;
            }

            contacts.extend(frame_contacts);
        }

        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let text_report = layout.text_report_path();
    let mut text_file = io::BufWriter::new(fs::File::create(&text_report)?);
    report::write_text_report(
        &mut text_file,
        &config.pair,
        config.cutoff,
        config.condition,
        &contacts,
    )?;
    io::Write::flush(&mut text_file)?;

    let csv_report = layout.csv_report_path();
    report::write_csv_report(fs::File::create(&csv_report)?, &contacts)?;

    Ok(ScanSummary {
        frames_total: trajectory.num_frames(),
        frames_matched,
        heatmaps_written,
        contacts,
        text_report,
        csv_report,
    })
}
