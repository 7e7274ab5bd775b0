#[cfg(all(feature = "es", feature = "en"))]
compile_error!("Cannot enable both 'es' and 'en' features at the same time");

#[cfg(feature = "es")]
pub mod strings {
    pub const PARTICIPANT: &str = "Participante";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "De";
    pub const TO: &str = "Para";
    pub const AMOUNT: &str = "Importe";
    pub const PAID: &str = "pagado";
    pub const PENDING: &str = "pendiente";
    pub const NO_TRANSFERS: &str = "No hace falta ninguna transferencia";
    pub const ALL_BALANCED: &str = "Todos están equilibrados en estos tickets";
    pub const MISSING_PAYER: &str = "Falta indicar quién pagó";
    pub const NO_ITEMS: &str = "El ticket no tiene productos";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const PAID: &str = "paid";
    pub const PENDING: &str = "pending";
    pub const NO_TRANSFERS: &str = "No transfers needed";
    pub const ALL_BALANCED: &str = "Everyone is balanced across these bills";
    pub const MISSING_PAYER: &str = "No payer selected";
    pub const NO_ITEMS: &str = "The bill has no items";
}

#[cfg(not(any(feature = "es", feature = "en")))]
pub mod strings {
    pub const PARTICIPANT: &str = "Participant";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const PAID: &str = "paid";
    pub const PENDING: &str = "pending";
    pub const NO_TRANSFERS: &str = "No transfers needed";
    pub const ALL_BALANCED: &str = "Everyone is balanced across these bills";
    pub const MISSING_PAYER: &str = "No payer selected";
    pub const NO_ITEMS: &str = "The bill has no items";
}

pub use strings::*;

use std::fmt::{self, Display};

/// One share-text line: who pays whom and how much.
pub struct OwesMessage<'a> {
    from: &'a str,
    to: &'a str,
    amount: &'a dyn Display,
    currency: &'a str,
}

pub fn owes<'a>(
    from: &'a str,
    amount: &'a dyn Display,
    currency: &'a str,
    to: &'a str,
) -> OwesMessage<'a> {
    OwesMessage {
        from,
        to,
        amount,
        currency,
    }
}

#[cfg(feature = "es")]
impl Display for OwesMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} debe {}{} a {}",
            self.from, self.amount, self.currency, self.to
        )
    }
}

#[cfg(not(feature = "es"))]
impl Display for OwesMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} owes {}{} to {}",
            self.from, self.amount, self.currency, self.to
        )
    }
}

#[cfg(feature = "es")]
pub fn combined_title(bill_names: &[String]) -> String {
    format!("División Combinada: {}", bill_names.join(", "))
}

#[cfg(not(feature = "es"))]
pub fn combined_title(bill_names: &[String]) -> String {
    format!("Combined split: {}", bill_names.join(", "))
}

#[cfg(feature = "es")]
pub fn unclaimed_item(item: impl Display) -> String {
    format!("El producto '{item}' no está asignado del todo")
}

#[cfg(not(feature = "es"))]
pub fn unclaimed_item(item: impl Display) -> String {
    format!("Item '{item}' is not fully claimed")
}
