use medcheck_core::classify::QualityReport;
use medcheck_core::error::MedcheckError;
use medcheck_core::model::{MedicineRow, RejectedRecord};
use std::io::{self, Write};

pub fn print_report(report: &QualityReport) -> Result<(), MedcheckError> {
    write_report(&mut io::stdout().lock(), report)?;
    Ok(())
}

pub fn print_medicines(rows: &[MedicineRow]) -> Result<(), MedcheckError> {
    write_medicines(&mut io::stdout().lock(), rows)?;
    Ok(())
}

pub fn print_rejected(records: &[RejectedRecord]) -> Result<(), MedcheckError> {
    write_rejected(&mut io::stdout().lock(), records)?;
    Ok(())
}

pub fn write_report<W: Write>(out: &mut W, report: &QualityReport) -> io::Result<()> {
    writeln!(out, "=== Quality Check Results ({}) ===\n", report.checked_on)?;

    for o in &report.outcomes {
        writeln!(
            out,
            "  {} - Grade: {} - Status: {}",
            o.name, o.grade, o.status
        )?;
    }

    if !report.failures.is_empty() {
        writeln!(out, "\n  Skipped rows:")?;
        for f in &report.failures {
            let name = if f.name.is_empty() { "unnamed" } else { f.name.as_str() };
            writeln!(out, "    row {} ({}): {}", f.row, name, f.error)?;
        }
    }

    writeln!(out, "\n  {}", report.summary())
}

pub fn write_medicines<W: Write>(out: &mut W, rows: &[MedicineRow]) -> io::Result<()> {
    writeln!(out, "=== Medicine Found ===")?;

    for row in rows {
        writeln!(out)?;
        let mut fields: Vec<(&str, &str)> = vec![
            ("Name", row.medicine_name.as_str()),
            ("Expiry", row.expiry_date.as_str()),
            ("Sealed", row.is_sealed.as_str()),
            ("Chemical", row.chemical_composition.as_str()),
            ("Standard", row.std_composition.as_str()),
            ("Barcode", row.barcode.as_str()),
            ("Amount", row.amount.as_str()),
            ("Batch", row.batch.as_str()),
        ];
        // Derived columns only exist after a quality check
        if let Some(ratio) = row.composition_ratio.as_deref() {
            fields.push(("Ratio", ratio));
        }
        if let Some(grade) = row.grade.as_deref() {
            fields.push(("Grade", grade));
        }
        if let Some(status) = row.quality_status.as_deref() {
            fields.push(("Status", status));
        }

        for (label, value) in fields {
            writeln!(out, "  {:<10} {}", label, value)?;
        }
    }
    Ok(())
}

pub fn write_rejected<W: Write>(out: &mut W, records: &[RejectedRecord]) -> io::Result<()> {
    writeln!(out, "=== Rejected Medicines ===\n")?;
    for r in records {
        writeln!(
            out,
            "  {} | Barcode: {} | Reason: {} | Expiry: {}",
            r.medicine_name, r.barcode, r.reason, r.expiry_date
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medcheck_core::model::RejectReason;

    fn medicines(rows: &[MedicineRow]) -> String {
        let mut buf = Vec::new();
        write_medicines(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_rejected_line_format() {
        let mut buf = Vec::new();
        write_rejected(
            &mut buf,
            &[RejectedRecord {
                medicine_name: "Antacid".into(),
                barcode: "444".into(),
                reason: RejectReason::LowGrade,
                expiry_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            }],
        )
        .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Antacid | Barcode: 444 | Reason: LowGrade | Expiry: 2030-01-01"));
    }

    #[test]
    fn test_medicine_shows_derived_only_when_present() {
        let mut row = MedicineRow {
            medicine_name: "Aspirin".into(),
            barcode: "111".into(),
            ..Default::default()
        };
        assert!(!medicines(&[row.clone()]).contains("Grade"));

        row.grade = Some("A".into());
        assert!(medicines(&[row]).contains("Grade      A"));
    }

    #[test]
    fn test_write_error_is_returned() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_medicines(&mut Closed, &[MedicineRow::default()]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
