use billsplit_domain::{Bill, BillId, Color, MAX_AMOUNT, Money, ValidationError};

/// First field of a bill snapshot that fails the input rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bill {bill}: {location}: {source}")]
pub struct BillValidationError {
    pub bill: BillId,
    pub location: String,
    #[source]
    pub source: ValidationError,
}

/// Checks a decoded snapshot before it reaches the engine.
///
/// Referential problems (claims or a payer naming someone who is not on the
/// bill) are left to the engine, which ignores them.
pub fn validate_bill(bill: &Bill) -> Result<(), BillValidationError> {
    let fail = |location: String, source: ValidationError| BillValidationError {
        bill: bill.id.clone(),
        location,
        source,
    };

    check_amount("total", bill.total).map_err(|err| fail("total".into(), err))?;

    for participant in &bill.participants {
        let location = format!("participant {}", participant.id);
        if participant.name.trim().is_empty() {
            return Err(fail(location, ValidationError::Empty { field: "name" }));
        }
        if Color::parse(participant.color.as_str()).is_none() {
            return Err(fail(
                location,
                ValidationError::InvalidColor(participant.color.to_string()),
            ));
        }
    }

    for item in &bill.items {
        let location = format!("item {}", item.id);
        if item.quantity == 0 {
            return Err(fail(location, ValidationError::ZeroQuantity));
        }
        check_amount("unit price", item.unit_price)
            .and_then(|()| check_amount("total price", item.total_price))
            .map_err(|err| fail(location, err))?;
    }

    Ok(())
}

/// Amounts must be non-negative and at most [`MAX_AMOUNT`], so that balance
/// sums cannot overflow.
fn check_amount(field: &'static str, amount: Money) -> Result<(), ValidationError> {
    if amount < Money::ZERO {
        return Err(ValidationError::Negative { field });
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::TooLarge { field });
    }
    Ok(())
}
