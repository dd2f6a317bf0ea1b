use crate::forms::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Please correct the form: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] checkout::CheckoutError),

    #[error("Payment for {0} was cancelled before it completed.")]
    PaymentCancelled(String),
}

impl EngineError {
    /// The field errors of a rejected form, empty for any other failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            EngineError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
