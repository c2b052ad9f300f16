use crate::application::dispatch::Response;
use crate::domain::subscription::Subscription;
use crate::error::{ContractError, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Error,
}

/// The reported result of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// 1-based position of the invocation in the input.
    pub invocation: usize,
    pub function: String,
    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn from_result(
        invocation: usize,
        function: &str,
        subscription_id: &str,
        result: &Result<Response>,
    ) -> Self {
        let (status, subscription, error) = match result {
            Ok(Response::Subscription(subscription)) => {
                (OutcomeStatus::Ok, Some(subscription.clone()), None)
            }
            Ok(Response::Empty) => (OutcomeStatus::Ok, None, None),
            Err(e) => (OutcomeStatus::Error, None, Some(describe(e))),
        };
        Self {
            invocation,
            function: function.to_string(),
            subscription_id: subscription_id.to_string(),
            status,
            subscription,
            error,
        }
    }

    /// Outcome for an input row that could not be decoded into an invocation.
    pub fn unreadable(invocation: usize, error: &ContractError) -> Self {
        Self {
            invocation,
            function: String::new(),
            subscription_id: String::new(),
            status: OutcomeStatus::Error,
            subscription: None,
            error: Some(describe(error)),
        }
    }
}

/// Stable error code followed by the message, e.g. `AlreadyCompleted: ...`.
fn describe(error: &ContractError) -> String {
    let code = match error {
        ContractError::IdentityResolutionFailed(_) => "IdentityResolutionFailed",
        ContractError::Unauthorized { .. } => "Unauthorized",
        ContractError::NotFound(_) => "NotFound",
        ContractError::AlreadyExists(_) => "AlreadyExists",
        ContractError::DeserializationFailed { .. } => "DeserializationFailed",
        ContractError::SerializationFailed { .. } => "SerializationFailed",
        ContractError::AlreadyCompleted(_) => "AlreadyCompleted",
        ContractError::NoRemainingInstallments(_) => "NoRemainingInstallments",
        ContractError::StoreReadFailed { .. } => "StoreReadFailed",
        ContractError::StoreWriteFailed { .. } => "StoreWriteFailed",
        ContractError::InvalidArgument(_) => "InvalidArgument",
        ContractError::UnknownFunction(_) => "UnknownFunction",
        ContractError::Config(_) => "Config",
        ContractError::Csv(_) => "Csv",
        ContractError::Io(_) => "Io",
    };
    format!("{}: {}", code, error)
}

/// Writes outcomes as JSON lines.
pub struct OutcomeWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        serde_json::to_writer(&mut self.writer, outcome).map_err(std::io::Error::from)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::NewSubscription;
    use crate::interfaces::csv::invocation_reader::InvocationReader;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_error_outcome() {
        let mut buffer = Vec::new();
        let outcome = Outcome::from_result(
            4,
            "pay",
            "S1",
            &Err(ContractError::AlreadyCompleted("S1".to_string())),
        );
        OutcomeWriter::new(&mut buffer).write_outcome(&outcome).unwrap();

        let line = String::from_utf8(buffer).unwrap();
        assert_eq!(
            line,
            "{\"invocation\":4,\"function\":\"pay\",\"subscriptionID\":\"S1\",\"status\":\"error\",\"error\":\"AlreadyCompleted: subscription S1 is already completed\"}\n"
        );
    }

    #[test]
    fn test_unreadable_row_outcome() {
        let data = "caller,function,subscription\nOrg1MSP\n";
        let error = InvocationReader::new(data.as_bytes())
            .invocations()
            .next()
            .unwrap()
            .unwrap_err();

        let outcome = Outcome::unreadable(2, &error);
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.error.as_deref().unwrap().starts_with("Csv: "));

        let mut buffer = Vec::new();
        OutcomeWriter::new(&mut buffer).write_outcome(&outcome).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["invocation"], 2);
        assert_eq!(value["function"], "");
        assert_eq!(value["status"], "error");
    }

    #[test]
    fn test_write_query_outcome() {
        let subscription = Subscription::new(NewSubscription {
            subscription_id: "S1".to_string(),
            payer_id: "Alice".to_string(),
            payee_id: "Bob".to_string(),
            amount: dec!(100.0),
            frequency: "monthly".to_string(),
            total_installments: 3,
        })
        .unwrap();

        let mut buffer = Vec::new();
        let outcome = Outcome::from_result(
            2,
            "query",
            "S1",
            &Ok(Response::Subscription(subscription)),
        );
        OutcomeWriter::new(&mut buffer).write_outcome(&outcome).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["subscription"]["paymentsMade"], 0);
        assert_eq!(value["subscription"]["amount"], 100.0);
        assert!(value.get("error").is_none());
    }
}
