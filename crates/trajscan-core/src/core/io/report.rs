use crate::core::analysis::pairs::{PairContact, PairSelector, ThresholdCondition};
use std::io::{self, Write};

/// File name of the consolidated plain-text report.
pub const TEXT_REPORT_FILENAME: &str = "specific_distance_results.txt";
/// File name of the machine-readable CSV report.
pub const CSV_REPORT_FILENAME: &str = "specific_distance_results.csv";

// Integral cutoffs keep a trailing decimal in the header (3 prints as "3.0").
fn format_cutoff(cutoff: f64) -> String {
    if cutoff.fract() == 0.0 {
        format!("{:.1}", cutoff)
    } else {
        format!("{}", cutoff)
    }
}

/// Writes the consolidated plain-text contact report.
///
/// One line per matched pair, in the order given (the workflow passes
/// contacts sorted by frame). Distances are printed with four decimal
/// places and one-based site indices.
pub fn write_text_report(
    writer: &mut impl Write,
    pair: &PairSelector,
    cutoff: f64,
    condition: ThresholdCondition,
    contacts: &[PairContact],
) -> io::Result<()> {
    writeln!(
        writer,
        "Specific Distance Results for {} (Neighbor Distance {} {} \u{212B})",
        pair,
        condition,
        format_cutoff(cutoff)
    )?;
    writeln!(writer, "{}", "=".repeat(50))?;
    writeln!(writer)?;

    for contact in contacts {
        writeln!(
            writer,
            "POSCAR: POSCAR_{}, Atoms: {}-{} and {}-{}, Distance: {:.4} \u{212B}",
            contact.frame,
            contact.element_i,
            contact.site_i,
            contact.element_j,
            contact.site_j,
            contact.distance
        )?;
    }

    Ok(())
}

/// Writes the CSV contact report with a header row.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_csv_report(writer: impl Write, contacts: &[PairContact]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for contact in contacts {
        csv_writer.serialize(contact)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contacts() -> Vec<PairContact> {
        vec![
            PairContact {
                frame: 1,
                element_i: "C".to_string(),
                site_i: 3,
                element_j: "Br".to_string(),
                site_j: 7,
                distance: 2.456789,
            },
            PairContact {
                frame: 4,
                element_i: "Br".to_string(),
                site_i: 7,
                element_j: "C".to_string(),
                site_j: 12,
                distance: 2.5,
            },
        ]
    }

    #[test]
    fn text_report_matches_expected_layout() {
        let pair: PairSelector = "C-Br".parse().unwrap();
        let mut buffer = Vec::new();
        write_text_report(
            &mut buffer,
            &pair,
            2.5,
            ThresholdCondition::Below,
            &sample_contacts(),
        )
        .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Specific Distance Results for C-Br (Neighbor Distance less 2.5 \u{212B})"
        );
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            "POSCAR: POSCAR_1, Atoms: C-3 and Br-7, Distance: 2.4568 \u{212B}"
        );
        assert_eq!(
            lines[4],
            "POSCAR: POSCAR_4, Atoms: Br-7 and C-12, Distance: 2.5000 \u{212B}"
        );
    }

    #[test]
    fn empty_contact_list_still_writes_header() {
        let pair: PairSelector = "O-H".parse().unwrap();
        let mut buffer = Vec::new();
        write_text_report(&mut buffer, &pair, 1.2, ThresholdCondition::Above, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with(
            "Specific Distance Results for O-H (Neighbor Distance greater 1.2 \u{212B})"
        ));
        // Header, separator, and the blank spacer line; no contact lines.
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn integral_cutoff_keeps_a_trailing_decimal() {
        let pair: PairSelector = "C-Br".parse().unwrap();
        let mut buffer = Vec::new();
        write_text_report(&mut buffer, &pair, 3.0, ThresholdCondition::Below, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with(
            "Specific Distance Results for C-Br (Neighbor Distance less 3.0 \u{212B})"
        ));
        assert_eq!(format_cutoff(2.5), "2.5");
        assert_eq!(format_cutoff(10.0), "10.0");
    }

    #[test]
    fn csv_report_contains_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv_report(&mut buffer, &sample_contacts()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "frame,element_i,site_i,element_j,site_j,distance"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,C,3,Br,7,"));
        assert!(lines[2].starts_with("4,Br,7,C,12,"));
    }
}
