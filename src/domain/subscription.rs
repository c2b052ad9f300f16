use crate::error::{ContractError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Arguments of a create invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub subscription_id: String,
    pub payer_id: String,
    pub payee_id: String,
    pub amount: Decimal,
    pub frequency: String,
    pub total_installments: u32,
}

/// A recurring-payment agreement between a payer and a payee.
///
/// Field order and names are the persisted JSON layout and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,
    #[serde(rename = "payerID")]
    pub payer_id: String,
    #[serde(rename = "payeeID")]
    pub payee_id: String,
    /// Per-installment amount, stored as an exact JSON number with the
    /// scale it was created with.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub total_installments: u32,
    pub payments_made: u32,
    /// Scheduling label such as "monthly". Not checked against any clock.
    pub frequency: String,
    pub completed: bool,
}

/// Lifecycle position of an existing subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Active { payments_made: u32 },
    Completed,
}

impl Subscription {
    /// Builds a fresh subscription with no payments recorded.
    pub fn new(args: NewSubscription) -> Result<Self> {
        if args.total_installments == 0 {
            return Err(ContractError::InvalidArgument(
                "totalInstallments must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            subscription_id: args.subscription_id,
            payer_id: args.payer_id,
            payee_id: args.payee_id,
            amount: args.amount,
            total_installments: args.total_installments,
            payments_made: 0,
            frequency: args.frequency,
            completed: false,
        })
    }

    pub fn state(&self) -> SubscriptionState {
        if self.completed {
            SubscriptionState::Completed
        } else {
            SubscriptionState::Active {
                payments_made: self.payments_made,
            }
        }
    }

    pub fn remaining_installments(&self) -> u32 {
        self.total_installments.saturating_sub(self.payments_made)
    }

    /// Records one installment, completing the subscription on the last one.
    pub fn record_payment(&mut self) -> Result<()> {
        if self.completed {
            return Err(ContractError::AlreadyCompleted(self.subscription_id.clone()));
        }
        if self.remaining_installments() == 0 {
            return Err(ContractError::NoRemainingInstallments(
                self.subscription_id.clone(),
            ));
        }

        self.payments_made += 1;
        if self.payments_made >= self.total_installments {
            self.completed = true;
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|source| ContractError::SerializationFailed {
            key: self.subscription_id.clone(),
            source,
        })
    }

    /// Decodes the record stored under `key`, rejecting records whose
    /// embedded id does not match the key.
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self> {
        let subscription: Subscription =
            serde_json::from_slice(bytes).map_err(|source| ContractError::DeserializationFailed {
                key: key.to_string(),
                source,
            })?;

        if subscription.subscription_id != key {
            return Err(ContractError::DeserializationFailed {
                key: key.to_string(),
                source: <serde_json::Error as serde::de::Error>::custom(format!(
                    "record carries subscriptionID {}",
                    subscription.subscription_id
                )),
            });
        }
        Ok(subscription)
    }
}
