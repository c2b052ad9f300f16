use crate::domain::events::ContractEvent;
use crate::domain::ports::EventSink;
use tracing::{info, warn};

/// Publishes contract events as structured log records on the
/// `recurpay::events` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: ContractEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => info!(
                target: "recurpay::events",
                event = event.name(),
                subscription_id = event.subscription_id(),
                %payload,
                "contract event"
            ),
            Err(e) => warn!(
                target: "recurpay::events",
                event = event.name(),
                subscription_id = event.subscription_id(),
                error = %e,
                "failed to encode contract event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::RoleId;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_event_logged_with_payload() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingEventSink.emit(ContractEvent::PaymentConfirmed {
                subscription_id: "S1".to_string(),
                confirmed_by: RoleId::from("Org2MSP"),
                payments_made: 2,
            });
        });

        let output = log.contents();
        assert!(output.contains("contract event"));
        assert!(output.contains(r#""event":"paymentConfirmed""#));
        assert!(output.contains(r#""subscriptionId":"S1""#));
        assert!(output.contains(r#""paymentsMade":2"#));
        assert!(!output.contains("failed to encode"));
    }
}
