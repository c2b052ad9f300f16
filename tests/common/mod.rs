#![allow(dead_code)]

use recurpay::application::contract::SubscriptionContract;
use recurpay::domain::access::{AccessPolicy, PAYEE_ROLE, PAYER_ROLE};
use recurpay::domain::subscription::NewSubscription;
use recurpay::infrastructure::in_memory::{InMemoryLedgerStore, RecordingEventSink, StaticIdentity};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// A contract over a fresh in-memory ledger, plus handles to inspect it.
pub struct Fixture {
    pub contract: SubscriptionContract,
    pub store: InMemoryLedgerStore,
    pub events: RecordingEventSink,
}

pub fn fixture() -> Fixture {
    fixture_with_policy(AccessPolicy::default())
}

pub fn fixture_with_policy(policy: AccessPolicy) -> Fixture {
    let store = InMemoryLedgerStore::new();
    let events = RecordingEventSink::new();
    let contract =
        SubscriptionContract::new(Box::new(store.clone()), policy, Box::new(events.clone()));
    Fixture {
        contract,
        store,
        events,
    }
}

pub fn payer() -> StaticIdentity {
    StaticIdentity::new(PAYER_ROLE)
}

pub fn payee() -> StaticIdentity {
    StaticIdentity::new(PAYEE_ROLE)
}

pub fn new_subscription(
    id: &str,
    amount: Decimal,
    frequency: &str,
    total_installments: u32,
) -> NewSubscription {
    NewSubscription {
        subscription_id: id.to_string(),
        payer_id: "Alice".to_string(),
        payee_id: "Bob".to_string(),
        amount,
        frequency: frequency.to_string(),
        total_installments,
    }
}

/// Writes an invocation script with `payments` pay rows for one subscription.
pub fn generate_script(path: &Path, installments: u32, payments: u32) -> Result<(), Error> {
    let installments = installments.to_string();
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(file);

    wtr.write_record([
        "caller",
        "function",
        "subscription",
        "payer",
        "payee",
        "amount",
        "frequency",
        "installments",
    ])?;
    wtr.write_record([
        PAYER_ROLE,
        "create",
        "GEN",
        "Alice",
        "Bob",
        "10.0",
        "monthly",
        installments.as_str(),
    ])?;
    for _ in 0..payments {
        wtr.write_record([PAYER_ROLE, "pay", "GEN"])?;
    }
    wtr.write_record([PAYEE_ROLE, "query", "GEN"])?;

    wtr.flush()?;
    Ok(())
}
