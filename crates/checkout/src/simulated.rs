use crate::error::CheckoutError;
use crate::request::CheckoutRequest;
use crate::{PaymentGateway, PaymentOutcome};
use async_trait::async_trait;
use configuration::SimulatedBehaviour;
use std::time::Duration;
use uuid::Uuid;

/// A stand-in for the hosted checkout: waits, then resolves the payment.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    behaviour: SimulatedBehaviour,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay, behaviour: SimulatedBehaviour::Succeed }
    }

    pub fn with_behaviour(mut self, behaviour: SimulatedBehaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn from_settings(settings: &configuration::Checkout) -> Self {
        Self::new(Duration::from_millis(settings.processing_delay_ms))
            .with_behaviour(settings.behaviour)
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn collect(&self, request: &CheckoutRequest) -> Result<PaymentOutcome, CheckoutError> {
        tracing::debug!(
            customer_id = %request.customer_id,
            amount_minor = request.amount_minor,
            currency = %request.currency,
            "Opening simulated checkout."
        );
        tokio::time::sleep(self.delay).await;

        match self.behaviour {
            SimulatedBehaviour::Succeed => {
                let reference = Uuid::new_v4().simple().to_string();
                Ok(PaymentOutcome::Succeeded {
                    payment_id: format!("pay_{}", &reference[..14]),
                })
            }
            SimulatedBehaviour::Dismiss => Ok(PaymentOutcome::Dismissed),
            SimulatedBehaviour::Decline => {
                Err(CheckoutError::Declined("simulated card decline".to_string()))
            }
        }
    }
}
