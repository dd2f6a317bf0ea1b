use crate::error::CheckoutError;
use configuration::Checkout;
use core_types::{Client, ClientId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Minor units per major unit for the supported currencies (paise per rupee).
pub const MINOR_UNITS_PER_MAJOR: u32 = 100;

/// Converts a major-unit amount into integer minor units.
///
/// Rejects zero and negative amounts, and amounts with more precision than
/// one minor unit (e.g. `₹10.005`).
pub fn to_minor_units(amount: Decimal) -> Result<u64, CheckoutError> {
    if amount <= Decimal::ZERO {
        return Err(CheckoutError::NonPositiveAmount(amount));
    }
    let minor = amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .ok_or(CheckoutError::AmountOutOfRange(amount))?;
    if !minor.fract().is_zero() {
        return Err(CheckoutError::FractionalMinorUnits(amount));
    }
    minor.to_u64().ok_or(CheckoutError::AmountOutOfRange(amount))
}

/// Contact details the checkout sheet is prefilled with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the gateway needs to open a checkout for one client payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub key: String,
    /// Amount in the currency's minor unit.
    #[serde(rename = "amount")]
    pub amount_minor: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub customer_id: ClientId,
    pub prefill: Prefill,
    pub theme_color: String,
}

impl CheckoutRequest {
    pub fn new(settings: &Checkout, amount: Decimal, client: &Client) -> Result<Self, CheckoutError> {
        let amount_minor = to_minor_units(amount)?;
        Ok(Self {
            key: settings.key_id.clone(),
            amount_minor,
            currency: settings.currency.clone(),
            name: settings.merchant_name.clone(),
            description: format!("Payment for {}", client.business_name),
            customer_id: client.id,
            prefill: Prefill {
                name: client.client_name.clone(),
                email: client.email.clone(),
                contact: client.phone.clone(),
            },
            theme_color: settings.theme_color.clone(),
        })
    }

    /// The amount back in major units, as shown to the operator.
    pub fn amount(&self) -> Decimal {
        Decimal::from(self.amount_minor) / Decimal::from(MINOR_UNITS_PER_MAJOR)
    }

    /// The options object handed to the hosted checkout script.
    pub fn to_options_json(&self) -> Result<String, CheckoutError> {
        serde_json::to_string(self).map_err(|e| CheckoutError::Serialization(e.to_string()))
    }
}
