use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, PaymentCompletedEvent};

/// The set of producers handed to APIs that emit events. Cheap to clone; an empty set (the default) means events
/// are silently discarded, which is what unit tests usually want.
#[derive(Default, Clone)]
pub struct EventProducers {
    pub payment_completed_producer: Vec<EventProducer<PaymentCompletedEvent>>,
}

/// Owns the engine's one event stream, bound to its handler at construction. Call [`EventHandlers::producers`]
/// for the producer set to hand to emitting APIs, then [`EventHandlers::start_handlers`] once, at startup.
pub struct EventHandlers {
    payment_completed: EventHandler<PaymentCompletedEvent>,
}

impl EventHandlers {
    pub fn on_payment_completed<F>(buffer_size: usize, f: F) -> Self
    where F: (Fn(PaymentCompletedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        Self { payment_completed: EventHandler::new(buffer_size, Arc::new(f)) }
    }

    pub fn producers(&self) -> EventProducers {
        EventProducers { payment_completed_producer: vec![self.payment_completed.subscribe()] }
    }

    /// Moves the handler onto its own task. It runs until every producer has been dropped.
    pub async fn start_handlers(self) {
        tokio::spawn(async move {
            self.payment_completed.start_handler().await;
        });
    }
}
