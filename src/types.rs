//! Wire-level value types: currencies, transfer kinds, and payment methods.

/// Billing currency accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Currency {
    /// United States dollar.
    Usd,
    /// Ukrainian hryvnia.
    Uah,
    /// Euro.
    Eur,
    /// Russian ruble (legacy gateway code `RUR`).
    Rur,
}

impl Currency {
    /// Returns the wire representation of this currency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Uah => "UAH",
            Self::Eur => "EUR",
            Self::Rur => "RUR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination kind for a money transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Transfer to a phone-number-identified wallet.
    Phone,
    /// Transfer to a card number.
    Card,
}

impl TransferKind {
    /// Returns the wire representation of this transfer kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Card => "card",
        }
    }
}

/// A payment method channel selectable for form payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payway {
    /// Payment from a LiqPay wallet balance.
    Liqpay,
    /// Card payment.
    Card,
    /// Delayed (two-stage) payment.
    Delayed,
}

impl Payway {
    /// Bit assigned to this payway in the legacy bitmask encoding.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Liqpay => 1,
            Self::Card => 2,
            Self::Delayed => 4,
        }
    }

    /// Returns the wire name used in the comma-joined `pay_way` field.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Liqpay => "liqpay",
            Self::Card => "card",
            Self::Delayed => "delayed",
        }
    }
}

/// Wire ordering of payways in the `pay_way` field.
const PAYWAY_WIRE_ORDER: [Payway; 3] = [Payway::Card, Payway::Liqpay, Payway::Delayed];

/// Set of allowed payment methods for form generation.
///
/// Replaces the legacy integer bitmask with an explicit set type.
/// [`PaywaySet::from_bits`] accepts the legacy encoding; bits outside the
/// known payways are silently ignored.
///
/// # Examples
///
/// ```
/// use liqpay_client::{Payway, PaywaySet};
///
/// let set = PaywaySet::empty().with(Payway::Card).with(Payway::Delayed);
/// assert_eq!(set.to_wire(), "card,delayed");
///
/// // Legacy bitmask form: card (2) | liqpay (1).
/// assert_eq!(PaywaySet::from_bits(3), PaywaySet::empty().with(Payway::Card).with(Payway::Liqpay));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaywaySet {
    bits: u32,
}

impl PaywaySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a set from the legacy bitmask encoding.
    ///
    /// Unknown bits are dropped, matching the legacy behavior of ignoring
    /// flags outside the enumerated payways.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        let known = Payway::Liqpay.bit() | Payway::Card.bit() | Payway::Delayed.bit();
        Self { bits: bits & known }
    }

    /// Returns a copy of the set with `payway` added.
    #[must_use]
    pub const fn with(self, payway: Payway) -> Self {
        Self { bits: self.bits | payway.bit() }
    }

    /// Checks whether `payway` is in the set.
    #[must_use]
    pub const fn contains(self, payway: Payway) -> bool {
        self.bits & payway.bit() != 0
    }

    /// Checks whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Renders the set as the comma-joined wire list.
    ///
    /// The wire order is card, liqpay, delayed regardless of how the set
    /// was built.
    #[must_use]
    pub fn to_wire(self) -> String {
        let names: Vec<&str> = PAYWAY_WIRE_ORDER
            .iter()
            .filter(|p| self.contains(**p))
            .map(|p| p.wire_name())
            .collect();
        names.join(",")
    }
}
