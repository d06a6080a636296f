use crate::core::io::poscar::{self, LineReader, PoscarError};
use crate::core::models::lattice::Lattice;
use crate::core::models::site::Site;
use crate::core::models::structure::Structure;
use nalgebra::Vector3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XdatcarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    // The trajectory header shares the POSCAR grammar.
    #[error(transparent)]
    Header(#[from] PoscarError),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: XdatcarParseErrorKind,
    },
    #[error("Trajectory contains no frames")]
    NoFrames,
}

#[derive(Debug, Error)]
pub enum XdatcarParseErrorKind {
    #[error("Expected a 'Direct configuration=' line (found: '{value}')")]
    ExpectedFrameHeader { value: String },
    #[error("Only direct-coordinate trajectories are supported (found: '{value}')")]
    UnsupportedCoordinateMode { value: String },
    #[error("Unexpected end of file inside frame {frame}")]
    TruncatedFrame { frame: usize },
    #[error("Invalid float format (value: '{value}')")]
    InvalidFloat { value: String },
    #[error("Coordinate line must contain at least three numbers")]
    TooFewCoordinates,
}

/// A parsed XDATCAR trajectory: one shared header plus per-frame snapshots.
///
/// All frames share the cell and composition from the header; constant-volume
/// runs are the only supported layout (trajectories that repeat the header
/// every frame fail with a frame-header parse error).
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// The comment (title) line from the trajectory header.
    pub comment: String,
    /// The periodic cell shared by all frames.
    pub lattice: Lattice,
    /// Element symbols and counts from the header, in file order.
    pub species: Vec<(String, usize)>,
    /// The per-frame structures, in trajectory order.
    pub frames: Vec<Structure>,
}

impl Trajectory {
    /// Returns the number of frames in the trajectory.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Returns the number of atoms in each frame.
    pub fn num_sites(&self) -> usize {
        self.species.iter().map(|(_, n)| n).sum()
    }

    /// Checks whether any frame contains the given element symbol.
    pub fn contains_element(&self, symbol: &str) -> bool {
        self.species.iter().any(|(s, _)| s == symbol)
    }
}

/// Reader for VASP XDATCAR trajectory files.
///
/// The format is a single POSCAR-style header followed by one
/// `Direct configuration= N` block per snapshot, each holding one fractional
/// coordinate line per atom.
pub struct XdatcarFile;

impl XdatcarFile {
    /// Reads a trajectory from a buffered reader.
    ///
    /// Frames are numbered from 1 in the order they appear. Blank lines
    /// between frames are tolerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed, a frame is truncated or
    /// contains non-numeric coordinates, or the file holds no frames at all.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Trajectory, XdatcarError> {
        let mut lines = LineReader::new(reader);
        let header = poscar::parse_header(&mut lines)?;
        let site_elements = header.site_elements();

        let mut frames = Vec::new();
        loop {
            let Some((line_num, line)) = lines.try_next()? else {
                break;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match trimmed.chars().next() {
                Some('d') | Some('D') => {}
                Some('c') | Some('C') | Some('k') | Some('K') => {
                    return Err(XdatcarError::Parse {
                        line: line_num,
                        kind: XdatcarParseErrorKind::UnsupportedCoordinateMode {
                            value: trimmed.to_string(),
                        },
                    });
                }
                _ => {
                    return Err(XdatcarError::Parse {
                        line: line_num,
                        kind: XdatcarParseErrorKind::ExpectedFrameHeader {
                            value: trimmed.to_string(),
                        },
                    });
                }
            }

            let frame_number = frames.len() + 1;
            let mut sites = Vec::with_capacity(site_elements.len());
            for element in &site_elements {
                let Some((coord_line, content)) = lines.try_next()? else {
                    return Err(XdatcarError::Parse {
                        line: line_num,
                        kind: XdatcarParseErrorKind::TruncatedFrame {
                            frame: frame_number,
                        },
                    });
                };
                let frac = parse_frac(coord_line, &content)?;
                sites.push(Site::new(element, frac));
            }
            frames.push(Structure::new(&header.comment, header.lattice.clone(), sites));
        }

        if frames.is_empty() {
            return Err(XdatcarError::NoFrames);
        }

        Ok(Trajectory {
            comment: header.comment,
            lattice: header.lattice,
            species: header.species,
            frames,
        })
    }

    /// Reads a trajectory from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Trajectory, XdatcarError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

fn parse_frac(line: usize, content: &str) -> Result<Vector3<f64>, XdatcarError> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(XdatcarError::Parse {
            line,
            kind: XdatcarParseErrorKind::TooFewCoordinates,
        });
    }
    let mut values = [0.0f64; 3];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token.parse().map_err(|_| XdatcarError::Parse {
            line,
            kind: XdatcarParseErrorKind::InvalidFloat {
                value: token.to_string(),
            },
        })?;
    }
    Ok(Vector3::new(values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FRAME_XDATCAR: &str = "\
CBr in a box
1.0
 10.0 0.0 0.0
 0.0 10.0 0.0
 0.0 0.0 10.0
 C Br
 1 1
Direct configuration=     1
 0.00 0.00 0.00
 0.20 0.00 0.00
Direct configuration=     2
 0.00 0.00 0.00
 0.45 0.00 0.00
";

    fn read(input: &str) -> Result<Trajectory, XdatcarError> {
        XdatcarFile::read_from(&mut BufReader::new(input.as_bytes()))
    }

    #[test]
    fn reads_all_frames_with_shared_header() {
        let trajectory = read(TWO_FRAME_XDATCAR).unwrap();
        assert_eq!(trajectory.comment, "CBr in a box");
        assert_eq!(trajectory.num_frames(), 2);
        assert_eq!(trajectory.num_sites(), 2);
        assert_eq!(
            trajectory.species,
            vec![("C".to_string(), 1), ("Br".to_string(), 1)]
        );

        let first = &trajectory.frames[0];
        assert_eq!(first.site(1).unwrap().element, "Br");
        assert!((first.distance(0, 1).unwrap() - 2.0).abs() < 1e-12);

        let second = &trajectory.frames[1];
        assert!((second.distance(0, 1).unwrap() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn tolerates_blank_lines_between_frames() {
        let spaced = TWO_FRAME_XDATCAR.replace(
            "Direct configuration=     2",
            "\nDirect configuration=     2",
        );
        assert_eq!(read(&spaced).unwrap().num_frames(), 2);
    }

    #[test]
    fn contains_element_uses_header_species() {
        let trajectory = read(TWO_FRAME_XDATCAR).unwrap();
        assert!(trajectory.contains_element("Br"));
        assert!(!trajectory.contains_element("Fe"));
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let mut truncated = TWO_FRAME_XDATCAR.to_string();
        truncated.truncate(truncated.len() - " 0.45 0.00 0.00\n".len());
        let err = read(&truncated).unwrap_err();
        assert!(matches!(
            err,
            XdatcarError::Parse {
                kind: XdatcarParseErrorKind::TruncatedFrame { frame: 2 },
                ..
            }
        ));
    }

    #[test]
    fn garbage_between_frames_is_an_error() {
        let broken = TWO_FRAME_XDATCAR.replace(
            "Direct configuration=     2",
            "unexpected junk",
        );
        assert!(matches!(
            read(&broken).unwrap_err(),
            XdatcarError::Parse {
                kind: XdatcarParseErrorKind::ExpectedFrameHeader { .. },
                ..
            }
        ));
    }

    #[test]
    fn header_without_frames_is_an_error() {
        let header_only: String = TWO_FRAME_XDATCAR.lines().take(7).fold(
            String::new(),
            |mut acc, line| {
                acc.push_str(line);
                acc.push('\n');
                acc
            },
        );
        assert!(matches!(read(&header_only).unwrap_err(), XdatcarError::NoFrames));
    }

    #[test]
    fn bad_coordinate_reports_its_line() {
        let broken = TWO_FRAME_XDATCAR.replace(" 0.20 0.00 0.00", " 0.20 NaN? 0.00");
        let err = read(&broken).unwrap_err();
        match err {
            XdatcarError::Parse { line, kind } => {
                assert_eq!(line, 10);
                assert!(matches!(
                    kind,
                    XdatcarParseErrorKind::InvalidFloat { value } if value == "NaN?"
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
