use crate::model::{Bill, ItemId, LineItem};

/// How much of a line item has been assigned to participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimStatus {
    Unclaimed,
    Partial { remaining: u32 },
    Full,
    OverClaimed { excess: u32 },
}

/// Reason a bill is not ready for settlement. Advisory only; settlement
/// still runs on un-ready bills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadinessIssue {
    MissingPayer,
    NoItems,
    UnclaimedItem { item: ItemId },
}

impl LineItem {
    pub fn claimed_quantity(&self) -> u32 {
        self.claims
            .iter()
            .fold(0u32, |acc, claim| acc.saturating_add(claim.quantity))
    }

    pub fn remaining_quantity(&self) -> u32 {
        self.quantity.saturating_sub(self.claimed_quantity())
    }

    pub fn claim_status(&self) -> ClaimStatus {
        if self.is_shared {
            return if self.shared_pool().next().is_some() {
                ClaimStatus::Full
            } else {
                ClaimStatus::Unclaimed
            };
        }

        let claimed = self.claimed_quantity();
        if claimed == 0 {
            return ClaimStatus::Unclaimed;
        }
        match claimed.cmp(&self.quantity) {
            std::cmp::Ordering::Less => ClaimStatus::Partial {
                remaining: self.quantity - claimed,
            },
            std::cmp::Ordering::Equal => ClaimStatus::Full,
            std::cmp::Ordering::Greater => ClaimStatus::OverClaimed {
                excess: claimed - self.quantity,
            },
        }
    }

    pub fn is_fully_claimed(&self) -> bool {
        matches!(
            self.claim_status(),
            ClaimStatus::Full | ClaimStatus::OverClaimed { .. }
        )
    }
}

impl Bill {
    pub fn readiness(&self) -> Vec<ReadinessIssue> {
        let mut issues = Vec::new();
        if self.payer().is_none() {
            issues.push(ReadinessIssue::MissingPayer);
        }
        if self.items.is_empty() {
            issues.push(ReadinessIssue::NoItems);
        }
        issues.extend(
            self.items
                .iter()
                .filter(|item| !item.is_fully_claimed())
                .map(|item| ReadinessIssue::UnclaimedItem {
                    item: item.id.clone(),
                }),
        );
        issues
    }

    pub fn can_calculate(&self) -> bool {
        self.readiness().is_empty()
    }
}
