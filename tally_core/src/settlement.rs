//! # Settlement Form
//!
//! The "record a settlement" form and the validation kit behind it. Shortcut
//! chips beside the balances prefill the form in one click; who lands in the
//! payer and receiver fields depends on which way the money flows relative to
//! the current user.
//!
//! Validation is manual and declarative: callers list their fields with a
//! rule each, and get back the invalid set plus the first offender to focus.
//! Inputs hold raw strings until submit, when amounts go through the usual
//! forgiving parse.

use crate::context::{SettleDirection, SettlementShortcut};
use crate::money::parse_amount;

/// Focus ids for the form inputs
pub const PAYER_INPUT: &str = "settle-payer";
pub const RECEIVER_INPUT: &str = "settle-receiver";
pub const AMOUNT_INPUT: &str = "settle-amount";

// ============================================================================
// VALIDATION KIT
// ============================================================================

/// What a field's value must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Non-blank after trimming
    RequiredText,
    /// Parses to a strictly positive number (unparseable coerces to zero)
    PositiveAmount,
}

/// One field to check
#[derive(Debug, Clone)]
pub struct FieldCheck<'a> {
    pub id: &'a str,
    pub value: &'a str,
    pub rule: FieldRule,
}

impl<'a> FieldCheck<'a> {
    pub fn new(id: &'a str, value: &'a str, rule: FieldRule) -> Self {
        FieldCheck { id, value, rule }
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    invalid: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// The field that should receive focus (declaration order)
    pub fn first_invalid(&self) -> Option<&str> {
        self.invalid.first().map(String::as_str)
    }

    pub fn is_invalid(&self, id: &str) -> bool {
        self.invalid.iter().any(|f| f == id)
    }

    pub fn invalid_fields(&self) -> &[String] {
        &self.invalid
    }
}

/// Check each field against its rule. Order in the slice decides which
/// invalid field is focused first.
pub fn validate_fields(checks: &[FieldCheck]) -> ValidationReport {
    let mut invalid = Vec::new();
    for check in checks {
        let ok = match check.rule {
            FieldRule::RequiredText => !check.value.trim().is_empty(),
            FieldRule::PositiveAmount => parse_amount(check.value) > 0.0,
        };
        if !ok {
            invalid.push(check.id.to_string());
        }
    }
    ValidationReport { invalid }
}

// ============================================================================
// FORM STATE
// ============================================================================

/// Raw input state of the settlement form. Fields stay strings until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementForm {
    pub payer: String,
    pub receiver: String,
    pub amount: String,
    /// Set on first submit attempt; error styling shows only afterwards
    pub validated: bool,
}

impl SettlementForm {
    /// Populate the form from a shortcut. The direction decides which side
    /// the current user lands on.
    pub fn prefill(shortcut: &SettlementShortcut, current_user: &str) -> Self {
        let (payer, receiver) = match shortcut.direction {
            SettleDirection::CounterpartyOwes => {
                (shortcut.counterparty.clone(), current_user.to_string())
            }
            SettleDirection::UserOwes => {
                (current_user.to_string(), shortcut.counterparty.clone())
            }
        };
        SettlementForm {
            payer,
            receiver,
            amount: format!("{:.2}", shortcut.amount),
            validated: false,
        }
    }

    /// Validate payer, receiver, and amount in declaration order
    pub fn validate(&self) -> ValidationReport {
        validate_fields(&[
            FieldCheck::new(PAYER_INPUT, &self.payer, FieldRule::RequiredText),
            FieldCheck::new(RECEIVER_INPUT, &self.receiver, FieldRule::RequiredText),
            FieldCheck::new(AMOUNT_INPUT, &self.amount, FieldRule::PositiveAmount),
        ])
    }

    pub fn reset(&mut self) {
        *self = SettlementForm::default();
    }
}
