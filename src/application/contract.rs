use crate::domain::access::{AccessPolicy, Operation, RoleId};
use crate::domain::events::ContractEvent;
use crate::domain::ports::{CallerIdentity, EventSinkBox, LedgerStoreBox};
use crate::domain::subscription::{NewSubscription, Subscription};
use crate::error::{ContractError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// What `create` does when a record already exists under the requested id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreateMode {
    /// Write unconditionally, replacing any prior record.
    #[default]
    Overwrite,
    /// Fail with `AlreadyExists` if the key is taken.
    RejectExisting,
}

/// The recurring-payment subscription contract.
///
/// Holds no state between invocations: every operation resolves the caller,
/// checks the access policy, and then works directly against the ledger
/// store. Mutating operations issue at most one write, as their last step.
pub struct SubscriptionContract {
    store: LedgerStoreBox,
    policy: AccessPolicy,
    events: EventSinkBox,
    create_mode: CreateMode,
}

impl SubscriptionContract {
    /// Creates a new contract bound to a ledger store.
    ///
    /// # Arguments
    ///
    /// * `store` - The ledger key-value view.
    /// * `policy` - Which role may invoke which operation.
    /// * `events` - Receiver of contract events.
    pub fn new(store: LedgerStoreBox, policy: AccessPolicy, events: EventSinkBox) -> Self {
        Self {
            store,
            policy,
            events,
            create_mode: CreateMode::default(),
        }
    }

    pub fn with_create_mode(mut self, create_mode: CreateMode) -> Self {
        self.create_mode = create_mode;
        self
    }

    /// Registers a new subscription under its id. Payer only.
    #[instrument(skip_all, fields(subscription_id = %args.subscription_id))]
    pub async fn create(&self, caller: &dyn CallerIdentity, args: NewSubscription) -> Result<()> {
        self.authorize(Operation::Create, caller).await?;

        let subscription = Subscription::new(args)?;
        if self.create_mode == CreateMode::RejectExisting
            && self.read(&subscription.subscription_id).await?.is_some()
        {
            return Err(ContractError::AlreadyExists(subscription.subscription_id));
        }

        self.write(&subscription).await?;
        info!(
            payer = %subscription.payer_id,
            payee = %subscription.payee_id,
            amount = %subscription.amount,
            total_installments = subscription.total_installments,
            "subscription created"
        );
        self.events.emit(ContractEvent::SubscriptionCreated {
            subscription_id: subscription.subscription_id,
            total_installments: subscription.total_installments,
        });
        Ok(())
    }

    /// Records one installment. Payer only.
    #[instrument(skip_all, fields(subscription_id = %subscription_id))]
    pub async fn pay(&self, caller: &dyn CallerIdentity, subscription_id: &str) -> Result<()> {
        self.authorize(Operation::Pay, caller).await?;

        let mut subscription = self.load(subscription_id).await?;
        subscription.record_payment()?;
        self.write(&subscription).await?;

        info!(
            payments_made = subscription.payments_made,
            total_installments = subscription.total_installments,
            remaining = subscription.remaining_installments(),
            "payment recorded"
        );
        self.events.emit(ContractEvent::PaymentRecorded {
            subscription_id: subscription.subscription_id.clone(),
            payments_made: subscription.payments_made,
            total_installments: subscription.total_installments,
        });
        if subscription.completed {
            info!("subscription completed");
            self.events.emit(ContractEvent::SubscriptionCompleted {
                subscription_id: subscription.subscription_id,
            });
        }
        Ok(())
    }

    /// Attests that the payee has seen the subscription. Payee only, read-only.
    #[instrument(skip_all, fields(subscription_id = %subscription_id))]
    pub async fn confirm(&self, caller: &dyn CallerIdentity, subscription_id: &str) -> Result<()> {
        let caller = self.authorize(Operation::Confirm, caller).await?;

        let subscription = self.load(subscription_id).await?;
        info!(
            confirmed_by = %caller,
            payments_made = subscription.payments_made,
            "payment confirmed"
        );
        self.events.emit(ContractEvent::PaymentConfirmed {
            subscription_id: subscription.subscription_id,
            confirmed_by: caller,
            payments_made: subscription.payments_made,
        });
        Ok(())
    }

    /// Returns the stored subscription. Payee only, read-only.
    #[instrument(skip_all, fields(subscription_id = %subscription_id))]
    pub async fn query(
        &self,
        caller: &dyn CallerIdentity,
        subscription_id: &str,
    ) -> Result<Subscription> {
        self.authorize(Operation::Query, caller).await?;
        self.load(subscription_id).await
    }

    async fn authorize(&self, operation: Operation, caller: &dyn CallerIdentity) -> Result<RoleId> {
        let role = caller
            .resolve_caller_role()
            .await
            .map_err(ContractError::IdentityResolutionFailed)?;
        self.policy.authorize(operation, &role)?;
        debug!(%operation, caller = %role, "caller authorized");
        Ok(role)
    }

    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store
            .get(key)
            .await
            .map_err(|source| ContractError::StoreReadFailed {
                key: key.to_string(),
                source,
            })
    }

    async fn load(&self, key: &str) -> Result<Subscription> {
        let bytes = self
            .read(key)
            .await?
            .ok_or_else(|| ContractError::NotFound(key.to_string()))?;
        Subscription::decode(key, &bytes)
    }

    async fn write(&self, subscription: &Subscription) -> Result<()> {
        let bytes = subscription.encode()?;
        let key = subscription.subscription_id.as_str();
        self.store
            .put(key, bytes)
            .await
            .map_err(|source| ContractError::StoreWriteFailed {
                key: key.to_string(),
                source,
            })
    }
}
