use crate::classify::outcome::{Evaluation, QualityReport, RecordFailure, RecordOutcome};
use crate::error::{Field, FieldError, MedcheckError};
use crate::model::{Grade, MedicineRecord, MedicineRow, QualityStatus, RejectReason, RejectedRecord};
use crate::parsing::parse_record;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Map a composition ratio (percent) to a grade. Boundaries belong to the higher grade.
pub fn assign_grade(ratio: Decimal) -> Grade {
    if ratio >= Decimal::from(95) {
        Grade::A
    } else if ratio >= Decimal::from(90) {
        Grade::B
    } else if ratio >= Decimal::from(80) {
        Grade::C
    } else {
        Grade::D
    }
}

/// chemical / standard composition as a percentage.
///
/// Multiplies before dividing so exact inputs such as 95/100 land exactly on
/// the grade boundary.
pub fn composition_ratio(chemical: Decimal, standard: Decimal) -> Result<Decimal, FieldError> {
    if standard.is_zero() {
        return Err(FieldError::Zero {
            field: Field::StdComposition,
        });
    }
    if standard < Decimal::ZERO {
        return Err(FieldError::Negative {
            field: Field::StdComposition,
        });
    }
    if chemical < Decimal::ZERO {
        return Err(FieldError::Negative {
            field: Field::ChemicalComposition,
        });
    }
    chemical
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(standard))
        .ok_or(FieldError::Overflow {
            field: Field::ChemicalComposition,
        })
}

/// Grade a record and decide its status.
///
/// Causes are checked in a fixed order and the first match wins:
/// expired, then unsealed, then low grade. Only a sealed, unexpired
/// record of grade A or B passes.
pub fn evaluate(record: &MedicineRecord, today: NaiveDate) -> Result<Evaluation, FieldError> {
    let ratio = composition_ratio(record.chemical_composition, record.std_composition)?;
    let grade = assign_grade(ratio);

    // Order matters: an expired record is reported as Expired even when it
    // is also unsealed or low grade.
    let status = if record.expiry_date < today {
        QualityStatus::Rejected(RejectReason::Expired)
    } else if !record.is_sealed() {
        QualityStatus::Rejected(RejectReason::Unsealed)
    } else if grade.is_acceptable() {
        // A or B
        QualityStatus::Pass
    } else {
        QualityStatus::Rejected(RejectReason::LowGrade)
    };

    Ok(Evaluation {
        composition_ratio: ratio,
        grade,
        status,
    })
}

/// Classify every stored row against `today`.
///
/// A row that fails validation is reported in `failures` and does not stop
/// the run. An empty store is an error so callers never write empty derived
/// columns.
pub fn classify(rows: &[MedicineRow], today: NaiveDate) -> Result<QualityReport, MedcheckError> {
    if rows.is_empty() {
        return Err(MedcheckError::EmptyDataset(
            "no medicine data available".into(),
        ));
    }

    let mut outcomes = Vec::new();
    let mut failures = Vec::new();
    let mut rejected = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        // 1-based, matching the data row as an operator would count it
        let row_number = i + 1;
        let result = parse_record(row)
            .and_then(|record| evaluate(&record, today).map(|evaluation| (record, evaluation)));

        match result {
            Ok((record, evaluation)) => {
                debug!(
                    row = row_number,
                    name = %record.name,
                    ratio = %evaluation.composition_ratio,
                    grade = %evaluation.grade,
                    status = %evaluation.status,
                    "classified record"
                );

                // Only graded records reach the rejection log
                if let Some(reason) = evaluation.status.reject_reason() {
                    rejected.push(RejectedRecord {
                        medicine_name: record.name.clone(),
                        barcode: record.barcode.clone(),
                        reason,
                        expiry_date: record.expiry_date,
                    });
                }

                outcomes.push(RecordOutcome {
                    row: row_number,
                    name: record.name,
                    barcode: record.barcode,
                    composition_ratio: evaluation.composition_ratio,
                    grade: evaluation.grade,
                    status: evaluation.status,
                });
            }
            Err(error) => {
                // No outcome is recorded, so annotate_rows clears this row
                warn!(row = row_number, %error, "skipping record that cannot be classified");
                failures.push(RecordFailure {
                    row: row_number,
                    name: row.medicine_name.trim().to_string(),
                    error,
                });
            }
        }
    }

    Ok(QualityReport {
        checked_on: today,
        outcomes,
        failures,
        rejected,
    })
}

/// Write a report's derived columns back onto the rows it was computed from.
///
/// Rows without an outcome (the failures) have their derived columns cleared
/// so no stale grade survives next to data that no longer validates.
pub fn annotate_rows(rows: &mut [MedicineRow], report: &QualityReport) {
    // Outcomes are sorted by row and skip failed rows; advance only on a match
    let mut outcomes = report.outcomes.iter().peekable();
    for (i, row) in rows.iter_mut().enumerate() {
        match outcomes.next_if(|o| o.row == i + 1) {
            Some(outcome) => {
                row.composition_ratio = Some(
                    outcome
                        .composition_ratio
                        .round_dp(2)
                        .normalize()
                        .to_string(),
                );
                row.grade = Some(outcome.grade.to_string());
                row.quality_status = Some(outcome.status.to_string());
            }
            // Failed row: keep its raw text, drop stale derived columns
            None => row.clear_derived(),
        }
    }
}
