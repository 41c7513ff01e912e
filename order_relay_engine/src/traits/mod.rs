//! Behaviour the relay requires from its collaborators.
//!
//! Two of these traits are database contracts, implemented by [`crate::SqliteDatabase`]:
//!
//! * [`RelayDatabase`] — order lookup and the atomic payment-status transition (the only write this system makes).
//! * [`FulfillmentLookup`] — the read-only projections the fan-out step walks: order items, users, foods,
//!   restaurants.
//!
//! The other two are outbound collaborators, implemented by the server's integration layer:
//!
//! * [`NotificationTransport`] — delivers a push message to a single device token.
//! * [`StatusMirror`] — mirrors order status into the secondary real-time store that live-tracking UIs watch.
//!
//! Every collaborator call returns a `Result`; the fan-out step logs failures and carries on, so a flaky push
//! service can never fail a webhook acknowledgment.

mod fulfillment_lookup;
mod notification;
mod relay_database;
mod status_mirror;

pub use fulfillment_lookup::FulfillmentLookup;
pub use notification::{NotificationError, NotificationTransport};
pub use relay_database::{RelayDatabase, RelayDbError};
pub use status_mirror::{StatusMirror, StatusMirrorError};
