use super::contract::SubscriptionContract;
use crate::domain::access::Operation;
use crate::domain::ports::CallerIdentity;
use crate::domain::subscription::{NewSubscription, Subscription};
use crate::error::{ContractError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// A named contract call with positional string arguments, as delivered by
/// the ledger host.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub function: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a dispatched invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Empty,
    Subscription(Subscription),
}

impl Operation {
    /// Maps a host function name onto an operation. Both the ledger-facing
    /// names and the short lowercase forms are accepted.
    pub fn from_function(name: &str) -> Option<Self> {
        match name {
            "CreateSubscription" | "create" => Some(Operation::Create),
            "MakePayment" | "pay" => Some(Operation::Pay),
            "ConfirmPayment" | "confirm" => Some(Operation::Confirm),
            "QuerySubscriptionStatus" | "query" => Some(Operation::Query),
            _ => None,
        }
    }

    fn arity(&self) -> usize {
        match self {
            Operation::Create => 6,
            Operation::Pay | Operation::Confirm | Operation::Query => 1,
        }
    }
}

impl SubscriptionContract {
    /// Routes a named invocation to the matching operation.
    pub async fn invoke(
        &self,
        caller: &dyn CallerIdentity,
        invocation: &Invocation,
    ) -> Result<Response> {
        let operation = Operation::from_function(&invocation.function)
            .ok_or_else(|| ContractError::UnknownFunction(invocation.function.clone()))?;

        let args = &invocation.args;
        if args.len() != operation.arity() {
            return Err(ContractError::InvalidArgument(format!(
                "{} expects {} arguments, got {}",
                invocation.function,
                operation.arity(),
                args.len()
            )));
        }

        match operation {
            Operation::Create => {
                let new = parse_create_args(args)?;
                self.create(caller, new).await?;
                Ok(Response::Empty)
            }
            Operation::Pay => {
                self.pay(caller, &args[0]).await?;
                Ok(Response::Empty)
            }
            Operation::Confirm => {
                self.confirm(caller, &args[0]).await?;
                Ok(Response::Empty)
            }
            Operation::Query => Ok(Response::Subscription(self.query(caller, &args[0]).await?)),
        }
    }
}

/// Argument order: subscriptionID, payerID, payeeID, amount, frequency,
/// totalInstallments.
fn parse_create_args(args: &[String]) -> Result<NewSubscription> {
    let amount = Decimal::from_str(&args[3])
        .map_err(|e| ContractError::InvalidArgument(format!("amount {:?}: {}", args[3], e)))?;
    let total_installments = args[5].parse::<u32>().map_err(|e| {
        ContractError::InvalidArgument(format!("totalInstallments {:?}: {}", args[5], e))
    })?;

    Ok(NewSubscription {
        subscription_id: args[0].clone(),
        payer_id: args[1].clone(),
        payee_id: args[2].clone(),
        amount,
        frequency: args[4].clone(),
        total_installments,
    })
}
