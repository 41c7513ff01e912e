//! Simple stateless pub-sub event handler
//!
//! Components of the relay can subscribe to engine events and react to them without the emitting code knowing who
//! is listening. Handlers are async and receive only the event itself; they have no access to engine internals.
//! The server uses this to run the fulfillment fan-out off the back of a completed payment without tying the
//! webhook response to notification latency.

mod channel;
mod event_types;
mod hooks;

pub use channel::{EventHandler, EventProducer, Handler};
pub use event_types::PaymentCompletedEvent;
pub use hooks::{EventHandlers, EventProducers};
