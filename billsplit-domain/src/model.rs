use crate::{error::ValidationError, money::Money};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::{fmt, hash::Hash};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Participant identifier, unique within one bill.
    ParticipantId
);
string_id!(BillId);
string_id!(ItemId);
string_id!(
    /// Stable identifier of a saved friend, shared across bills.
    PersonId
);

/// Display color token in `#RRGGBB` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// Accepts exactly `#` followed by six hex digits. The token is stored
    /// as given; identity keys compare colors byte-for-byte.
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(value.to_owned()))
        } else {
            None
        }
    }

    /// Wraps an already-stored token without validating it.
    pub fn unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub color: Color,
    /// Saved-friend reference, when the participant was added from one.
    pub person_id: Option<PersonId>,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            person_id: None,
        }
    }

    pub fn with_person(mut self, person_id: impl Into<PersonId>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    /// Identity used to join the same person across bills.
    pub fn key(&self) -> ParticipantKey {
        match &self.person_id {
            Some(person_id) => ParticipantKey::Person(person_id.clone()),
            None => ParticipantKey::heuristic(&self.name, &self.color),
        }
    }
}

/// Cross-bill participant identity.
///
/// `Heuristic` keys are `lowercase(name) + "-" + color`; two different people
/// with the same name (ignoring case) and color collapse into one key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParticipantKey {
    Person(PersonId),
    Heuristic(String),
}

impl ParticipantKey {
    pub fn heuristic(name: &str, color: &Color) -> Self {
        Self::Heuristic(format!("{}-{}", name.to_lowercase(), color.as_str()))
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantKey::Person(id) => write!(f, "person:{id}"),
            ParticipantKey::Heuristic(key) => f.write_str(key),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub participant_id: ParticipantId,
    pub quantity: u32,
    pub is_shared: bool,
}

impl Claim {
    pub fn individual(participant_id: impl Into<ParticipantId>, quantity: u32) -> Self {
        Self {
            participant_id: participant_id.into(),
            quantity,
            is_shared: false,
        }
    }

    pub fn shared(participant_id: impl Into<ParticipantId>) -> Self {
        Self {
            participant_id: participant_id.into(),
            quantity: 1,
            is_shared: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub id: ItemId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
    pub is_shared: bool,
    pub claims: Vec<Claim>,
}

impl LineItem {
    /// Builds an item whose total is `quantity * unit_price`.
    ///
    /// Panics if the total overflows; use [`LineItem::try_new`] for
    /// untrusted amounts.
    pub fn new(
        id: impl Into<ItemId>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        is_shared: bool,
    ) -> Self {
        Self::with_total(
            id,
            description,
            quantity,
            unit_price,
            unit_price * Decimal::from(quantity),
            is_shared,
        )
    }

    /// Like [`LineItem::new`], but reports an overflowing total instead of
    /// panicking.
    pub fn try_new(
        id: impl Into<ItemId>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        is_shared: bool,
    ) -> Result<Self, ValidationError> {
        let total_price = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or(ValidationError::TooLarge {
                field: "total price",
            })?;
        Ok(Self::with_total(
            id,
            description,
            quantity,
            unit_price,
            total_price,
            is_shared,
        ))
    }

    /// Builds an item with a stored total, which may differ from
    /// `quantity * unit_price` when the receipt says so.
    pub fn with_total(
        id: impl Into<ItemId>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        total_price: Money,
        is_shared: bool,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            quantity,
            unit_price,
            total_price,
            is_shared,
            claims: Vec::new(),
        }
    }

    pub fn with_claims(mut self, claims: impl IntoIterator<Item = Claim>) -> Self {
        self.claims.extend(claims);
        self
    }

    pub fn claim_of(&self, participant_id: &ParticipantId) -> Option<&Claim> {
        self.claims
            .iter()
            .find(|claim| &claim.participant_id == participant_id)
    }

    /// Claims that place their holder in the shared pool.
    pub fn shared_pool(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|claim| claim.is_shared)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    pub payer_id: Option<ParticipantId>,
    /// Declared total paid by the payer; not necessarily the sum of items.
    pub total: Money,
    pub participants: Vec<Participant>,
    pub items: Vec<LineItem>,
}

impl Bill {
    pub fn new(id: impl Into<BillId>, name: impl Into<String>, total: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: None,
            payer_id: None,
            total,
            participants: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn item(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn payer(&self) -> Option<&Participant> {
        self.payer_id.as_ref().and_then(|id| self.participant(id))
    }

    pub fn items_total(&self) -> Money {
        self.items.iter().map(|item| item.total_price).sum()
    }
}

/// Signed net balances in encounter order. Positive owes into the pot,
/// negative is owed.
pub type Balances<K> = IndexMap<K, Money>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer<K = ParticipantId> {
    pub from: K,
    pub to: K,
    /// Rounded to cents.
    pub amount: Money,
}

#[derive(Debug)]
pub struct Settlement<K = ParticipantId> {
    pub balances: Balances<K>,
    pub transfers: Vec<Transfer<K>>,
}

impl<K: Hash + Eq> PartialEq for Settlement<K> {
    fn eq(&self, other: &Self) -> bool {
        self.balances == other.balances && self.transfers == other.transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn try_new_multiplies_quantity() {
        let item = LineItem::try_new("i1", "Caña", 3, Money::new(250, 2), false).unwrap();
        assert_eq!(item.total_price, Money::new(750, 2));
    }

    #[rstest]
    fn try_new_reports_overflowing_total() {
        let unit_price: Money = "70000000000000000000000000000".parse().unwrap();
        assert_eq!(
            LineItem::try_new("i1", "Caña", 4_000_000_000, unit_price, false),
            Err(ValidationError::TooLarge {
                field: "total price"
            })
        );
    }
}
