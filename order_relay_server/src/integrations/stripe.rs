use stripe_tools::{Customer, StripeApi, StripeApiError};

/// The one thing the webhook handler needs from the Stripe REST API: turning a customer id from a checkout session
/// into the full customer record, whose metadata carries the cart. A trait so that endpoint tests can mock the
/// lookup instead of standing up a Stripe stub.
#[allow(async_fn_in_trait)]
pub trait CustomerResolver {
    async fn resolve_customer(&self, customer_id: &str) -> Result<Customer, StripeApiError>;
}

impl CustomerResolver for StripeApi {
    async fn resolve_customer(&self, customer_id: &str) -> Result<Customer, StripeApiError> {
        self.retrieve_customer(customer_id).await
    }
}
