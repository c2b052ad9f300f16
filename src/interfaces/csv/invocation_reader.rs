use crate::application::dispatch::Invocation;
use crate::domain::access::Operation;
use crate::error::{ContractError, Result};
use crate::infrastructure::in_memory::StaticIdentity;
use serde::Deserialize;
use std::io::Read;

/// One row of an invocation script.
///
/// Columns: `caller, function, subscription, payer, payee, amount, frequency,
/// installments`. Only create uses the last five. An empty `caller` stands for
/// a credential that cannot be resolved to a role.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct InvocationRecord {
    #[serde(default)]
    pub caller: Option<String>,
    pub function: String,
    pub subscription: String,
    #[serde(default)]
    pub payer: Option<String>,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub installments: Option<String>,
}

impl InvocationRecord {
    pub fn identity(&self) -> StaticIdentity {
        match &self.caller {
            Some(caller) if !caller.is_empty() => StaticIdentity::new(caller.as_str()),
            _ => StaticIdentity::unresolved(),
        }
    }

    pub fn to_invocation(&self) -> Invocation {
        let args = match Operation::from_function(&self.function) {
            Some(Operation::Create) => vec![
                self.subscription.clone(),
                self.payer.clone().unwrap_or_default(),
                self.payee.clone().unwrap_or_default(),
                self.amount.clone().unwrap_or_default(),
                self.frequency.clone().unwrap_or_default(),
                self.installments.clone().unwrap_or_default(),
            ],
            _ => vec![self.subscription.clone()],
        };
        Invocation {
            function: self.function.clone(),
            args,
        }
    }
}

/// Reads invocation rows from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<InvocationRecord>`.
/// It handles whitespace trimming and short rows automatically.
pub struct InvocationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InvocationReader<R> {
    /// Creates a new `InvocationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows.
    pub fn invocations(self) -> impl Iterator<Item = Result<InvocationRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ContractError::from))
    }
}
