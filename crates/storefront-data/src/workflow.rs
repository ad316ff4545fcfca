//! Multi-step actions that combine session state with API calls.
//!
//! Each workflow validates locally first and only touches session state after
//! the API has accepted the request.

use crate::{ApiClient, FetchError};
use storefront_commerce::cart::{Discount, DiscountDraft};
use storefront_commerce::catalog::{NewProduct, NewUser, Product, User};
use storefront_commerce::checkout::Order;
use storefront_commerce::{CommerceError, Session};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure of a workflow: either rejected locally or failed on the wire.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error("{0}")]
    Network(#[from] FetchError),

    /// The server created the order but its reply could not be decoded.
    #[error("order placed but the response could not be read: {0}")]
    OrderUnreadable(FetchError),
}

impl From<storefront_commerce::ValidationError> for WorkflowError {
    fn from(e: storefront_commerce::ValidationError) -> Self {
        WorkflowError::Commerce(e.into())
    }
}

/// Everything a shopping page shows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub discounts: Vec<Discount>,
    pub users: Vec<User>,
}

impl Catalog {
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id.as_str() == id)
    }
}

/// Load products, discounts and users together. Any failure fails the load.
pub async fn load_catalog(api: &ApiClient) -> Result<Catalog, FetchError> {
    let (products, discounts, users) = futures::try_join!(
        api.list_products(),
        api.list_discounts(),
        api.list_users()
    )?;
    debug!(
        products = products.len(),
        discounts = discounts.len(),
        users = users.len(),
        "catalog loaded"
    );
    Ok(Catalog {
        products,
        discounts,
        users,
    })
}

/// Submit the session's cart as an order.
///
/// The session is reset as soon as the API answers 201 Created, even if the
/// order in the reply cannot be decoded ([`WorkflowError::OrderUnreadable`]).
/// Any earlier error leaves the session exactly as it was so the user can retry.
pub async fn checkout(api: &ApiClient, session: &mut Session) -> Result<Order, WorkflowError> {
    let request = session.order_request()?;
    let response = match api.submit_order(&request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "checkout failed");
            return Err(e.into());
        }
    };
    session.complete_checkout();

    let order: Order = response.json().map_err(|e| {
        warn!(error = %e, "order placed but response unreadable");
        WorkflowError::OrderUnreadable(e)
    })?;
    info!(order_id = %order.id, items = request.item_count(), "checkout complete");
    Ok(order)
}

pub async fn submit_user(api: &ApiClient, user: &NewUser) -> Result<User, WorkflowError> {
    user.validate()?;
    Ok(api.create_user(user).await?)
}

pub async fn submit_product(api: &ApiClient, product: &NewProduct) -> Result<Product, WorkflowError> {
    product.validate()?;
    Ok(api.create_product(product).await?)
}

/// Build the draft and submit it. An invalid draft never reaches the API.
pub async fn submit_discount(
    api: &ApiClient,
    draft: &DiscountDraft,
) -> Result<Discount, WorkflowError> {
    let discount = draft.build()?;
    Ok(api.create_discount(&discount).await?)
}
