use crate::core::io::traits::StructureFile;
use crate::core::models::lattice::{Lattice, LatticeError};
use crate::core::models::site::Site;
use crate::core::models::structure::Structure;
use nalgebra::Vector3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoscarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PoscarParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error)]
pub enum PoscarParseErrorKind {
    #[error("Unexpected end of file while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("Invalid float format (value: '{value}')")]
    InvalidFloat { value: String },
    #[error("Invalid integer format (value: '{value}')")]
    InvalidInt { value: String },
    #[error("Scale factor must be a positive number (value: '{value}')")]
    InvalidScale { value: String },
    #[error("Line must contain at least three numbers")]
    TooFewCoordinates,
    #[error("Element symbol line is missing (files without symbol lines are not supported)")]
    MissingElementSymbols,
    #[error("Unknown coordinate mode: '{value}'")]
    UnknownCoordinateMode { value: String },
    #[error("Invalid lattice: {0}")]
    Lattice(#[from] LatticeError),
}

/// A line-counting reader shared by the POSCAR and XDATCAR parsers.
pub(crate) struct LineReader<R: BufRead> {
    lines: io::Lines<R>,
    current: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            current: 0,
        }
    }

    /// Returns the next line with its one-based line number, or `None` at EOF.
    pub(crate) fn try_next(&mut self) -> Result<Option<(usize, String)>, io::Error> {
        match self.lines.next() {
            Some(line) => {
                self.current += 1;
                Ok(Some((self.current, line?)))
            }
            None => Ok(None),
        }
    }

    /// Returns the next line, treating EOF as a parse error.
    pub(crate) fn expect_next(
        &mut self,
        expected: &'static str,
    ) -> Result<(usize, String), PoscarError> {
        self.try_next()?.ok_or(PoscarError::Parse {
            line: self.current + 1,
            kind: PoscarParseErrorKind::UnexpectedEof { expected },
        })
    }
}

/// The header block shared by POSCAR files and XDATCAR trajectories:
/// comment, scale factor, lattice vectors, element symbols, and counts.
#[derive(Debug, Clone)]
pub(crate) struct VaspHeader {
    pub comment: String,
    pub scale: f64,
    pub lattice: Lattice,
    pub species: Vec<(String, usize)>,
}

impl VaspHeader {
    pub fn total_sites(&self) -> usize {
        self.species.iter().map(|(_, n)| n).sum()
    }

    /// Expands the species runs into one element symbol per site, in file order.
    pub fn site_elements(&self) -> Vec<String> {
        let mut elements = Vec::with_capacity(self.total_sites());
        for (symbol, count) in &self.species {
            for _ in 0..*count {
                elements.push(symbol.clone());
            }
        }
        elements
    }
}

fn parse_f64(line: usize, token: &str) -> Result<f64, PoscarError> {
    token.parse().map_err(|_| PoscarError::Parse {
        line,
        kind: PoscarParseErrorKind::InvalidFloat {
            value: token.to_string(),
        },
    })
}

fn parse_vec3(line: usize, content: &str) -> Result<Vector3<f64>, PoscarError> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(PoscarError::Parse {
            line,
            kind: PoscarParseErrorKind::TooFewCoordinates,
        });
    }
    Ok(Vector3::new(
        parse_f64(line, tokens[0])?,
        parse_f64(line, tokens[1])?,
        parse_f64(line, tokens[2])?,
    ))
}

/// Parses the five-part VASP header starting at the reader's current position.
pub(crate) fn parse_header<R: BufRead>(
    reader: &mut LineReader<R>,
) -> Result<VaspHeader, PoscarError> {
    let (_, comment) = reader.expect_next("comment line")?;

    let (scale_line, scale_str) = reader.expect_next("scale factor")?;
    let scale: f64 = scale_str.trim().parse().map_err(|_| PoscarError::Parse {
        line: scale_line,
        kind: PoscarParseErrorKind::InvalidScale {
            value: scale_str.trim().to_string(),
        },
    })?;
    // Negative scale factors (volume targets) are a VASP extension this
    // reader does not support.
    if !scale.is_finite() || scale <= 0.0 {
        return Err(PoscarError::Parse {
            line: scale_line,
            kind: PoscarParseErrorKind::InvalidScale {
                value: scale_str.trim().to_string(),
            },
        });
    }

    let mut rows = [[0.0f64; 3]; 3];
    let mut first_lattice_line = 0;
    for row in rows.iter_mut() {
        let (line, content) = reader.expect_next("lattice vector")?;
        if first_lattice_line == 0 {
            first_lattice_line = line;
        }
        let v = parse_vec3(line, &content)?;
        *row = [v.x * scale, v.y * scale, v.z * scale];
    }
    let lattice = Lattice::from_rows(rows[0], rows[1], rows[2]).map_err(|e| PoscarError::Parse {
        line: first_lattice_line,
        kind: PoscarParseErrorKind::Lattice(e),
    })?;

    let (symbols_line, symbols_str) = reader.expect_next("element symbols")?;
    let symbols: Vec<&str> = symbols_str.split_whitespace().collect();
    let starts_alphabetic = symbols
        .first()
        .and_then(|s| s.chars().next())
        .is_some_and(|c| c.is_alphabetic());
    if !starts_alphabetic {
        return Err(PoscarError::Parse {
            line: symbols_line,
            kind: PoscarParseErrorKind::MissingElementSymbols,
        });
    }

    let (counts_line, counts_str) = reader.expect_next("element counts")?;
    let mut counts = Vec::new();
    for token in counts_str.split_whitespace() {
        let count: usize = token.parse().map_err(|_| PoscarError::Parse {
            line: counts_line,
            kind: PoscarParseErrorKind::InvalidInt {
                value: token.to_string(),
            },
        })?;
        counts.push(count);
    }

    if symbols.len() != counts.len() {
        return Err(PoscarError::Inconsistency(format!(
            "{} element symbols but {} counts",
            symbols.len(),
            counts.len()
        )));
    }

    let species = symbols
        .into_iter()
        .map(str::to_string)
        .zip(counts)
        .collect();

    Ok(VaspHeader {
        comment,
        scale,
        lattice,
        species,
    })
}

/// Reader and writer for VASP POSCAR files.
///
/// Reading supports direct and cartesian coordinates and tolerates a
/// selective-dynamics block; writing always emits direct coordinates.
pub struct PoscarFile;

impl StructureFile for PoscarFile {
    type Error = PoscarError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut lines = LineReader::new(reader);
        let header = parse_header(&mut lines)?;

        let (mode_line, mode_str) = lines.expect_next("coordinate mode")?;
        let mut mode = mode_str;
        if mode.trim().starts_with(['s', 'S']) {
            // Selective dynamics: the real mode line follows.
            let (_, next) = lines.expect_next("coordinate mode")?;
            mode = next;
        }
        let cartesian = match mode.trim().chars().next() {
            Some('d') | Some('D') => false,
            Some('c') | Some('C') | Some('k') | Some('K') => true,
            _ => {
                return Err(PoscarError::Parse {
                    line: mode_line,
                    kind: PoscarParseErrorKind::UnknownCoordinateMode {
                        value: mode.trim().to_string(),
                    },
                });
            }
        };

        let mut sites = Vec::with_capacity(header.total_sites());
        for element in header.site_elements() {
            let (line, content) = lines.expect_next("site coordinates")?;
            let raw = parse_vec3(line, &content)?;
            let frac = if cartesian {
                header.lattice.fractional(&(raw * header.scale))
            } else {
                raw
            };
            sites.push(Site::new(&element, frac));
        }

        if sites.is_empty() {
            return Err(PoscarError::Inconsistency(
                "structure contains no sites".to_string(),
            ));
        }

        Ok(Structure::new(&header.comment, header.lattice, sites))
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.comment)?;
        writeln!(writer, "1.0")?;

        let matrix = structure.lattice.matrix();
        for row in 0..3 {
            writeln!(
                writer,
                " {:>21.16} {:>21.16} {:>21.16}",
                matrix[(row, 0)],
                matrix[(row, 1)],
                matrix[(row, 2)]
            )?;
        }

        let composition = structure.composition();
        for (symbol, _) in &composition {
            write!(writer, " {:>4}", symbol)?;
        }
        writeln!(writer)?;
        for (_, count) in &composition {
            write!(writer, " {:>4}", count)?;
        }
        writeln!(writer)?;

        writeln!(writer, "Direct")?;
        for site in structure.sites() {
            writeln!(
                writer,
                " {:>19.16} {:>19.16} {:>19.16}",
                site.frac.x, site.frac.y, site.frac.z
            )?;
        }

        Ok(())
    }
}
