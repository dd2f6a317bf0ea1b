use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    #[error("Checkout amount must be greater than zero, got {0}.")]
    NonPositiveAmount(Decimal),

    #[error("Amount {0} does not convert to a whole number of minor currency units.")]
    FractionalMinorUnits(Decimal),

    #[error("Amount {0} is too large to charge in one payment.")]
    AmountOutOfRange(Decimal),

    #[error("Failed to serialize the checkout options: {0}")]
    Serialization(String),

    #[error("The payment gateway declined the payment: {0}")]
    Declined(String),
}
