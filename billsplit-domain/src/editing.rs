//! Progressive construction of a bill snapshot: participants, items and
//! claims are added one user action at a time.

use crate::{
    error::{BillEditError, ValidationError},
    model::{Bill, Claim, Color, ItemId, LineItem, Participant, ParticipantId},
    money::{MAX_AMOUNT, Money},
};

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn require_amount(field: &'static str, value: Money) -> Result<(), ValidationError> {
    if value.is_negative() {
        return Err(ValidationError::Negative { field });
    }
    if value > MAX_AMOUNT {
        return Err(ValidationError::TooLarge { field });
    }
    Ok(())
}

impl Bill {
    pub fn add_participant(
        &mut self,
        id: impl Into<ParticipantId>,
        name: &str,
        color: &str,
    ) -> Result<&Participant, BillEditError> {
        let id = id.into();
        require_non_empty("name", name)?;
        let color =
            Color::parse(color).ok_or_else(|| ValidationError::InvalidColor(color.to_owned()))?;
        if self.participant(&id).is_some() {
            return Err(BillEditError::DuplicateParticipant(id));
        }

        self.participants.push(Participant::new(id, name, color));
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Removes the participant together with every claim they hold, and
    /// unsets the payer if it was them.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, BillEditError> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| BillEditError::UnknownParticipant(id.clone()))?;
        let removed = self.participants.remove(index);

        for item in &mut self.items {
            item.claims.retain(|claim| &claim.participant_id != id);
        }
        if self.payer_id.as_ref() == Some(id) {
            self.payer_id = None;
        }

        Ok(removed)
    }

    pub fn set_payer(&mut self, payer: Option<ParticipantId>) -> Result<(), BillEditError> {
        if let Some(id) = &payer
            && self.participant(id).is_none()
        {
            return Err(BillEditError::UnknownParticipant(id.clone()));
        }
        self.payer_id = payer;
        Ok(())
    }

    pub fn set_total(&mut self, total: Money) -> Result<(), BillEditError> {
        require_amount("total", total)?;
        self.total = total;
        Ok(())
    }

    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        description: &str,
        quantity: u32,
        unit_price: Money,
        is_shared: bool,
    ) -> Result<&LineItem, BillEditError> {
        let id = id.into();
        require_non_empty("description", description)?;
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity.into());
        }
        require_amount("unit price", unit_price)?;
        if self.item(&id).is_some() {
            return Err(BillEditError::DuplicateItem(id));
        }

        let item = LineItem::try_new(id, description, quantity, unit_price, is_shared)?;
        require_amount("total price", item.total_price)?;
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flips the item between individual and shared. Existing claims are
    /// left untouched.
    pub fn set_item_shared(&mut self, item: &ItemId, is_shared: bool) -> Result<(), BillEditError> {
        self.item_mut(item)?.is_shared = is_shared;
        Ok(())
    }

    /// Creates or replaces the single claim a participant holds on an item.
    pub fn upsert_claim(
        &mut self,
        item: &ItemId,
        participant_id: &ParticipantId,
        quantity: u32,
        is_shared: bool,
    ) -> Result<(), BillEditError> {
        if self.participant(participant_id).is_none() {
            return Err(BillEditError::UnknownParticipant(participant_id.clone()));
        }
        let item = self.item_mut(item)?;

        match item
            .claims
            .iter_mut()
            .find(|claim| &claim.participant_id == participant_id)
        {
            Some(claim) => {
                claim.quantity = quantity;
                claim.is_shared = is_shared;
            }
            None => item.claims.push(Claim {
                participant_id: participant_id.clone(),
                quantity,
                is_shared,
            }),
        }
        Ok(())
    }

    /// Removing a claim that does not exist is a no-op.
    pub fn remove_claim(
        &mut self,
        item: &ItemId,
        participant_id: &ParticipantId,
    ) -> Result<(), BillEditError> {
        self.item_mut(item)?
            .claims
            .retain(|claim| &claim.participant_id != participant_id);
        Ok(())
    }

    fn item_mut(&mut self, id: &ItemId) -> Result<&mut LineItem, BillEditError> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| BillEditError::UnknownItem(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn bill() -> Bill {
        let mut bill = Bill::new("b1", "Restaurante El Mar", Money::new(4700, 2));
        bill.add_participant("p1", "Ana", "#3b82f6").unwrap();
        bill.add_participant("p2", "Carlos", "#10b981").unwrap();
        bill.add_item("i1", "Paella", 2, Money::new(1550, 2), false)
            .unwrap();
        bill
    }

    #[rstest]
    #[case::empty_name("", "#3b82f6", ValidationError::Empty { field: "name" })]
    #[case::blank_name("  ", "#3b82f6", ValidationError::Empty { field: "name" })]
    #[case::short_color("Eva", "#fff", ValidationError::InvalidColor("#fff".into()))]
    #[case::no_hash("Eva", "3b82f6", ValidationError::InvalidColor("3b82f6".into()))]
    #[case::bad_digit("Eva", "#3b82fg", ValidationError::InvalidColor("#3b82fg".into()))]
    fn add_participant_rejects_invalid_input(
        mut bill: Bill,
        #[case] name: &str,
        #[case] color: &str,
        #[case] expected: ValidationError,
    ) {
        let err = bill.add_participant("p9", name, color).unwrap_err();
        assert_eq!(err, BillEditError::Invalid(expected));
        assert_eq!(bill.participants.len(), 2);
    }

    #[rstest]
    fn add_participant_rejects_duplicate_id(mut bill: Bill) {
        let err = bill.add_participant("p1", "Other", "#000000").unwrap_err();
        assert_eq!(err, BillEditError::DuplicateParticipant("p1".into()));
    }

    #[rstest]
    fn add_item_computes_total_price(bill: Bill) {
        let item = bill.item(&"i1".into()).unwrap();
        assert_eq!(item.total_price, Money::new(3100, 2));
        assert!(item.claims.is_empty());
    }

    #[rstest]
    #[case::zero_quantity(0, Money::from_i64(1), ValidationError::ZeroQuantity)]
    #[case::negative_price(1, Money::from_i64(-1), ValidationError::Negative { field: "unit price" })]
    #[case::huge_price(1, MAX_AMOUNT + Money::from_i64(1), ValidationError::TooLarge { field: "unit price" })]
    #[case::huge_total(3, MAX_AMOUNT, ValidationError::TooLarge { field: "total price" })]
    fn add_item_rejects_invalid_input(
        mut bill: Bill,
        #[case] quantity: u32,
        #[case] unit_price: Money,
        #[case] expected: ValidationError,
    ) {
        let err = bill
            .add_item("i2", "Cerveza", quantity, unit_price, false)
            .unwrap_err();
        assert_eq!(err, BillEditError::Invalid(expected));
    }

    #[rstest]
    fn upsert_claim_updates_existing_row(mut bill: Bill) {
        let item = ItemId::from("i1");
        let ana = ParticipantId::from("p1");
        bill.upsert_claim(&item, &ana, 1, false).unwrap();
        bill.upsert_claim(&item, &ana, 2, true).unwrap();

        let claims = &bill.item(&item).unwrap().claims;
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].quantity, 2);
        assert!(claims[0].is_shared);
    }

    #[rstest]
    fn upsert_claim_requires_known_participant_and_item(mut bill: Bill) {
        assert_eq!(
            bill.upsert_claim(&"i1".into(), &"ghost".into(), 1, false),
            Err(BillEditError::UnknownParticipant("ghost".into()))
        );
        assert_eq!(
            bill.upsert_claim(&"nope".into(), &"p1".into(), 1, false),
            Err(BillEditError::UnknownItem("nope".into()))
        );
    }

    #[rstest]
    fn remove_participant_cascades_claims_and_payer(mut bill: Bill) {
        let item = ItemId::from("i1");
        let ana = ParticipantId::from("p1");
        let carlos = ParticipantId::from("p2");
        bill.upsert_claim(&item, &ana, 1, false).unwrap();
        bill.upsert_claim(&item, &carlos, 1, false).unwrap();
        bill.set_payer(Some(ana.clone())).unwrap();

        let removed = bill.remove_participant(&ana).unwrap();

        assert_eq!(removed.name, "Ana");
        assert_eq!(bill.payer_id, None);
        let claims = &bill.item(&item).unwrap().claims;
        assert_eq!(claims, &vec![Claim::individual("p2", 1)]);
    }

    #[rstest]
    fn set_payer_requires_participant(mut bill: Bill) {
        assert_eq!(
            bill.set_payer(Some("ghost".into())),
            Err(BillEditError::UnknownParticipant("ghost".into()))
        );
        assert!(bill.set_payer(None).is_ok());
    }

    #[rstest]
    fn remove_claim_and_toggle_shared(mut bill: Bill) {
        let item = ItemId::from("i1");
        bill.upsert_claim(&item, &"p1".into(), 1, false).unwrap();
        bill.remove_claim(&item, &"p1".into()).unwrap();
        bill.remove_claim(&item, &"p1".into()).unwrap();
        bill.set_item_shared(&item, true).unwrap();

        let item = bill.item(&item).unwrap();
        assert!(item.claims.is_empty());
        assert!(item.is_shared);
    }

    #[rstest]
    fn set_total_rejects_negative(mut bill: Bill) {
        assert!(bill.set_total(Money::from_i64(-5)).is_err());
        bill.set_total(Money::from_i64(50)).unwrap();
        assert_eq!(bill.total, Money::from_i64(50));
    }
}
