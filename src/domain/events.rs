use crate::domain::access::RoleId;
use serde::Serialize;

/// Observable signals emitted by the contract after a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ContractEvent {
    #[serde(rename_all = "camelCase")]
    SubscriptionCreated {
        subscription_id: String,
        total_installments: u32,
    },
    #[serde(rename_all = "camelCase")]
    PaymentRecorded {
        subscription_id: String,
        payments_made: u32,
        total_installments: u32,
    },
    #[serde(rename_all = "camelCase")]
    SubscriptionCompleted { subscription_id: String },
    /// Attestation by the payee. Carries the progress observed at confirmation
    /// time; it is not tied to a particular installment.
    #[serde(rename_all = "camelCase")]
    PaymentConfirmed {
        subscription_id: String,
        confirmed_by: RoleId,
        payments_made: u32,
    },
}

impl ContractEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ContractEvent::SubscriptionCreated { .. } => "subscriptionCreated",
            ContractEvent::PaymentRecorded { .. } => "paymentRecorded",
            ContractEvent::SubscriptionCompleted { .. } => "subscriptionCompleted",
            ContractEvent::PaymentConfirmed { .. } => "paymentConfirmed",
        }
    }

    pub fn subscription_id(&self) -> &str {
        match self {
            ContractEvent::SubscriptionCreated { subscription_id, .. }
            | ContractEvent::PaymentRecorded { subscription_id, .. }
            | ContractEvent::SubscriptionCompleted { subscription_id }
            | ContractEvent::PaymentConfirmed { subscription_id, .. } => subscription_id,
        }
    }
}
