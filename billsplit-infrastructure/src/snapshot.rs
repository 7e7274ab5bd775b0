//! JSON codec for bill snapshots and computed transfers.
//!
//! Field names follow the camelCase shape the storage layer hands out:
//! `payerId`, `unitPrice`, `isShared`, `participantId` and so on. Money
//! fields accept either JSON numbers or decimal strings.
use crate::error::SnapshotError;
use billsplit_domain::{
    Bill, Claim, Color, LineItem, Money, Participant, SettlementLine, Transfer,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payer_id: Option<String>,
    pub total: Decimal,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
    #[serde(default)]
    pub items: Vec<ItemDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub person_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Derived from `quantity * unitPrice` when absent.
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub claims: Vec<ClaimDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDto {
    pub participant_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub is_shared: bool,
}

impl BillDto {
    /// `fallback` names the bill when the snapshot carries no id or name.
    pub fn into_bill(self, fallback: &str) -> Result<Bill, SnapshotError> {
        let id = self.id.unwrap_or_else(|| fallback.to_owned());
        let name = self.name.unwrap_or_else(|| fallback.to_owned());
        let mut bill = Bill::new(id, name, Money::from_decimal(self.total));
        bill.date = self.date;
        bill.payer_id = self.payer_id.map(Into::into);
        bill.participants = self.participants.into_iter().map(Into::into).collect();
        bill.items = self
            .items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<_, _>>()?;
        Ok(bill)
    }
}

impl From<ParticipantDto> for Participant {
    fn from(dto: ParticipantDto) -> Self {
        let participant = Participant::new(dto.id, dto.name, Color::unchecked(dto.color));
        match dto.person_id {
            Some(person_id) => participant.with_person(person_id),
            None => participant,
        }
    }
}

impl TryFrom<ItemDto> for LineItem {
    type Error = SnapshotError;

    fn try_from(dto: ItemDto) -> Result<Self, Self::Error> {
        let unit_price = Money::from_decimal(dto.unit_price);
        let mut item = match dto.total_price {
            Some(total_price) => LineItem::with_total(
                dto.id,
                dto.description,
                dto.quantity,
                unit_price,
                Money::from_decimal(total_price),
                dto.is_shared,
            ),
            None => LineItem::try_new(
                dto.id.clone(),
                dto.description,
                dto.quantity,
                unit_price,
                dto.is_shared,
            )
            .map_err(|_| SnapshotError::AmountOverflow { item: dto.id })?,
        };
        item.claims = dto.claims.into_iter().map(Into::into).collect();
        Ok(item)
    }
}

impl From<ClaimDto> for Claim {
    fn from(dto: ClaimDto) -> Self {
        Claim {
            participant_id: dto.participant_id.into(),
            quantity: dto.quantity,
            is_shared: dto.is_shared,
        }
    }
}

pub fn decode_bill(json: &str, fallback: &str) -> Result<Bill, SnapshotError> {
    let dto: BillDto = serde_json::from_str(json)?;
    dto.into_bill(fallback)
}

/// Reads a snapshot file; the file stem stands in for a missing id or name.
pub fn load_bill(path: &Path) -> Result<Bill, SnapshotError> {
    let json = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bill".to_owned());
    let bill = decode_bill(&json, &fallback)?;
    tracing::debug!(
        path = %path.display(),
        bill = %bill.id,
        participants = bill.participants.len(),
        items = bill.items.len(),
        "loaded bill snapshot"
    );
    Ok(bill)
}

/// One output row: `{ from, to, amount }`, plus `isPaid` for single-bill
/// settlements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDto {
    pub from: String,
    pub to: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

impl<K: fmt::Display> From<&Transfer<K>> for TransferDto {
    fn from(transfer: &Transfer<K>) -> Self {
        Self {
            from: transfer.from.to_string(),
            to: transfer.to.to_string(),
            amount: transfer.amount.round_to_cents().as_decimal(),
            is_paid: None,
        }
    }
}

impl From<&SettlementLine> for TransferDto {
    fn from(line: &SettlementLine) -> Self {
        Self {
            is_paid: Some(line.is_paid),
            ..Self::from(&line.transfer)
        }
    }
}

pub fn encode_transfers(transfers: &[TransferDto]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(transfers)?)
}
