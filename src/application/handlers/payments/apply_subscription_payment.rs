//! ApplySubscriptionPaymentHandler - Command handler for the installment ledger.

use std::sync::Arc;

use crate::domain::foundation::{SubscriptionId, Timestamp};
use crate::domain::payment::PaymentEvent;
use crate::domain::subscription::{SubscriptionError, SubscriptionStatus};
use crate::ports::SubscriptionStore;

/// Command to apply a payment to the payer's open plan.
#[derive(Debug, Clone)]
pub struct ApplySubscriptionPaymentCommand {
    /// The validated payment event.
    pub event: PaymentEvent,
}

/// Result of a ledger update attempt.
#[derive(Debug, Clone)]
pub enum ApplySubscriptionPaymentResult {
    /// Payload carried no identification number, nothing to match on.
    NoIdentification,
    /// The payer has no open plan.
    NoOpenPlan,
    /// The plan was updated.
    Applied {
        subscription_id: SubscriptionId,
        status: SubscriptionStatus,
        installments_paid: i32,
        first_payment: bool,
        completed: bool,
    },
}

/// Handler for advancing a subscription's installment ledger.
///
/// Loads the open plan by the payer's identification number, applies the
/// payment through the aggregate, and writes the result back. Read and
/// write are separate statements; the last delivery wins on overlap.
pub struct ApplySubscriptionPaymentHandler {
    store: Arc<dyn SubscriptionStore>,
}

impl ApplySubscriptionPaymentHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: ApplySubscriptionPaymentCommand,
    ) -> Result<ApplySubscriptionPaymentResult, SubscriptionError> {
        let identification = match cmd
            .event
            .payer_identification()
            .filter(|i| !i.trim().is_empty())
        {
            Some(identification) => identification,
            None => return Ok(ApplySubscriptionPaymentResult::NoIdentification),
        };

        let mut plan = match self
            .store
            .find_open_by_identification(identification)
            .await
            .map_err(SubscriptionError::from)?
        {
            Some(plan) => plan,
            None => return Ok(ApplySubscriptionPaymentResult::NoOpenPlan),
        };

        let applied = plan.apply_payment(&cmd.event, Timestamp::now())?;

        self.store
            .update(&plan)
            .await
            .map_err(SubscriptionError::from)?;

        Ok(ApplySubscriptionPaymentResult::Applied {
            subscription_id: plan.id,
            status: plan.status,
            installments_paid: plan.installments_paid,
            first_payment: applied.first_payment,
            completed: applied.completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::payment::{PayerDetails, PaymentStatus, APPROVED_STATUS_ID};
    use crate::domain::subscription::Subscription;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct MockSubscriptionStore {
        plans: Mutex<Vec<Subscription>>,
        fail_find: bool,
        fail_update: bool,
    }

    impl MockSubscriptionStore {
        fn empty() -> Self {
            Self {
                plans: Mutex::new(Vec::new()),
                fail_find: false,
                fail_update: false,
            }
        }

        fn with_plan(plan: Subscription) -> Self {
            Self {
                plans: Mutex::new(vec![plan]),
                fail_find: false,
                fail_update: false,
            }
        }

        fn failing_find() -> Self {
            Self {
                plans: Mutex::new(Vec::new()),
                fail_find: true,
                fail_update: false,
            }
        }

        fn failing_update(plan: Subscription) -> Self {
            Self {
                plans: Mutex::new(vec![plan]),
                fail_find: false,
                fail_update: true,
            }
        }

        fn plans(&self) -> Vec<Subscription> {
            self.plans.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubscriptionStore for MockSubscriptionStore {
        async fn find_open_by_identification(
            &self,
            identification: &str,
        ) -> Result<Option<Subscription>, DomainError> {
            if self.fail_find {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated read failure",
                ));
            }
            let plans = self.plans.lock().unwrap();
            Ok(plans
                .iter()
                .find(|p| p.identification == identification && p.status.is_open())
                .cloned())
        }

        async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
            if self.fail_update {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated write failure",
                ));
            }
            let mut plans = self.plans.lock().unwrap();
            if let Some(p) = plans.iter_mut().find(|p| p.id == subscription.id) {
                *p = subscription.clone();
            }
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_plan(total: i32) -> Subscription {
        Subscription::create(SubscriptionId::new(), "123456789", total).unwrap()
    }

    fn event_with_status(status_id: i32, identification: Option<&str>) -> PaymentEvent {
        PaymentEvent {
            transaction_id: Some("98765".to_string()),
            order_id: "ORD-1001".to_string(),
            amount: Some(50000.0),
            status: PaymentStatus {
                id: status_id,
                name: "Estado".to_string(),
            },
            payer: PayerDetails {
                identification: identification.map(String::from),
                ..Default::default()
            },
            full_name: None,
            payment_method: Some("PSE".to_string()),
            raw: json!({"externalorder": "ORD-1001"}),
        }
    }

    fn approved_event() -> PaymentEvent {
        event_with_status(APPROVED_STATUS_ID, Some("123456789"))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn approved_payment_advances_and_persists_the_ledger() {
        let store = Arc::new(MockSubscriptionStore::with_plan(test_plan(3)));

        let handler = ApplySubscriptionPaymentHandler::new(store.clone());
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: approved_event(),
            })
            .await
            .unwrap();

        match result {
            ApplySubscriptionPaymentResult::Applied {
                status,
                installments_paid,
                first_payment,
                completed,
                ..
            } => {
                assert_eq!(status, SubscriptionStatus::Active);
                assert_eq!(installments_paid, 1);
                assert!(first_payment);
                assert!(!completed);
            }
            other => panic!("expected Applied, got {:?}", other),
        }

        let saved = &store.plans()[0];
        assert_eq!(saved.installments_paid, 1);
        assert_eq!(saved.status, SubscriptionStatus::Active);
        assert_eq!(saved.initial_transaction_id, Some("98765".to_string()));
    }

    #[tokio::test]
    async fn failed_payment_demotes_active_plan() {
        let mut plan = test_plan(3);
        plan.apply_payment(&approved_event(), Timestamp::now())
            .unwrap();
        let store = Arc::new(MockSubscriptionStore::with_plan(plan));

        let handler = ApplySubscriptionPaymentHandler::new(store.clone());
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: event_with_status(6, Some("123456789")),
            })
            .await
            .unwrap();

        match result {
            ApplySubscriptionPaymentResult::Applied {
                status,
                installments_paid,
                first_payment,
                ..
            } => {
                assert_eq!(status, SubscriptionStatus::PastDue);
                assert_eq!(installments_paid, 1);
                assert!(!first_payment);
            }
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn final_installment_reports_completion() {
        let store = Arc::new(MockSubscriptionStore::with_plan(test_plan(1)));

        let handler = ApplySubscriptionPaymentHandler::new(store.clone());
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: approved_event(),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            ApplySubscriptionPaymentResult::Applied {
                completed: true,
                first_payment: true,
                ..
            }
        ));
        assert_eq!(store.plans()[0].status, SubscriptionStatus::Completed);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Skip Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn skips_when_payload_has_no_identification() {
        let store = Arc::new(MockSubscriptionStore::with_plan(test_plan(3)));

        let handler = ApplySubscriptionPaymentHandler::new(store.clone());
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: event_with_status(APPROVED_STATUS_ID, None),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            ApplySubscriptionPaymentResult::NoIdentification
        ));
        assert_eq!(store.plans()[0].installments_paid, 0);
    }

    #[tokio::test]
    async fn blank_identification_is_treated_as_absent() {
        let store = Arc::new(MockSubscriptionStore::empty());

        let handler = ApplySubscriptionPaymentHandler::new(store);
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: event_with_status(APPROVED_STATUS_ID, Some("  ")),
            })
            .await
            .unwrap();

        assert!(matches!(
            result,
            ApplySubscriptionPaymentResult::NoIdentification
        ));
    }

    #[tokio::test]
    async fn skips_when_payer_has_no_open_plan() {
        let store = Arc::new(MockSubscriptionStore::empty());

        let handler = ApplySubscriptionPaymentHandler::new(store);
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: approved_event(),
            })
            .await
            .unwrap();

        assert!(matches!(result, ApplySubscriptionPaymentResult::NoOpenPlan));
    }

    #[tokio::test]
    async fn completed_plans_are_invisible() {
        let mut plan = test_plan(1);
        plan.apply_payment(&approved_event(), Timestamp::now())
            .unwrap();
        let store = Arc::new(MockSubscriptionStore::with_plan(plan));

        let handler = ApplySubscriptionPaymentHandler::new(store);
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: approved_event(),
            })
            .await
            .unwrap();

        assert!(matches!(result, ApplySubscriptionPaymentResult::NoOpenPlan));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn fails_when_find_fails() {
        let store = Arc::new(MockSubscriptionStore::failing_find());

        let handler = ApplySubscriptionPaymentHandler::new(store);
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: approved_event(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SubscriptionError::Infrastructure(_))
        ));
    }

    #[tokio::test]
    async fn fails_when_update_fails() {
        let store = Arc::new(MockSubscriptionStore::failing_update(test_plan(3)));

        let handler = ApplySubscriptionPaymentHandler::new(store);
        let result = handler
            .handle(ApplySubscriptionPaymentCommand {
                event: approved_event(),
            })
            .await;

        assert!(matches!(
            result,
            Err(SubscriptionError::Infrastructure(_))
        ));
    }
}
