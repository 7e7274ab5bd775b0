use crate::error::SnapshotError;
use billsplit_domain::{Money, PaymentRecord};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

/// Stored payment row, `(billId, fromParticipantId, toParticipantId)` unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecordDto {
    pub bill_id: String,
    pub from_participant_id: String,
    pub to_participant_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<PaymentRecordDto> for PaymentRecord {
    fn from(dto: PaymentRecordDto) -> Self {
        Self {
            bill_id: dto.bill_id.into(),
            from: dto.from_participant_id.into(),
            to: dto.to_participant_id.into(),
            amount: Money::from_decimal(dto.amount),
            is_paid: dto.is_paid,
            paid_at: dto.paid_at,
        }
    }
}

impl From<&PaymentRecord> for PaymentRecordDto {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            bill_id: record.bill_id.to_string(),
            from_participant_id: record.from.to_string(),
            to_participant_id: record.to.to_string(),
            amount: record.amount.as_decimal(),
            is_paid: record.is_paid,
            paid_at: record.paid_at,
        }
    }
}

/// Reads a JSON array of payment rows. A missing file holds no payments.
pub fn load_payments(path: &Path) -> Result<Vec<PaymentRecord>, SnapshotError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no payments file yet");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(SnapshotError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let rows: Vec<PaymentRecordDto> = serde_json::from_str(&json)?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub fn save_payments(path: &Path, records: &[PaymentRecord]) -> Result<(), SnapshotError> {
    let rows: Vec<PaymentRecordDto> = records.iter().map(Into::into).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    fs::write(path, json).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}
