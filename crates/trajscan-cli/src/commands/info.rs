use crate::cli::InfoArgs;
use crate::error::{CliError, Result};
use std::fmt;
use std::path::Path;
use tracing::info;
use trajscan::core::io::xdatcar::{Trajectory, XdatcarFile};

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Loading trajectory from {:?}", &args.trajectory);
    let trajectory =
        XdatcarFile::read_from_path(&args.trajectory).map_err(|e| CliError::FileParsing {
            path: args.trajectory.clone(),
            source: e.into(),
        })?;

    print!(
        "{}",
        TrajectorySummary {
            path: &args.trajectory,
            trajectory: &trajectory,
        }
    );

    Ok(())
}

/// The human-readable `info` output for one trajectory.
struct TrajectorySummary<'a> {
    path: &'a Path,
    trajectory: &'a Trajectory,
}

impl fmt::Display for TrajectorySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let composition = self
            .trajectory
            .species
            .iter()
            .map(|(symbol, count)| format!("{}{}", symbol, count))
            .collect::<Vec<_>>()
            .join(" ");
        let [a, b, c] = self.trajectory.lattice.lengths();

        writeln!(f, "Trajectory:  {}", self.path.display())?;
        writeln!(f, "Title:       {}", self.trajectory.comment)?;
        writeln!(f, "Frames:      {}", self.trajectory.num_frames())?;
        writeln!(f, "Atoms/frame: {}", self.trajectory.num_sites())?;
        writeln!(f, "Composition: {}", composition)?;
        writeln!(f, "Cell:        a = {:.4} A, b = {:.4} A, c = {:.4} A", a, b, c)?;
        writeln!(f, "Volume:      {:.4} A^3", self.trajectory.lattice.volume())?;

        Ok(())
    }
}
