//! Typed endpoints of the storefront API.

use crate::{FetchClient, FetchError, ReqwestTransport, Response, Transport};
use http::StatusCode;
use std::sync::Arc;
use storefront_commerce::cart::{Discount, DiscountRecord};
use storefront_commerce::catalog::{NewProduct, NewUser, Product, User};
use storefront_commerce::checkout::{Order, OrderRequest};
use storefront_commerce::OrderId;
use tracing::{info, warn};

/// Client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: FetchClient,
}

impl ApiClient {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Client talking to `base_url` over the network.
    pub fn connect(base_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(user_agent)?;
        Ok(Self::with_transport(base_url, Arc::new(transport)))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self::new(FetchClient::new(base_url, transport))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// `GET /products`
    pub async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.client
            .get("/products")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    /// `GET /discounts`
    ///
    /// Records that do not decode into a valid discount are skipped.
    pub async fn list_discounts(&self) -> Result<Vec<Discount>, FetchError> {
        let records: Vec<serde_json::Value> = self
            .client
            .get("/discounts")
            .send()
            .await?
            .error_for_status()?
            .json()?;

        let total = records.len();
        let discounts: Vec<Discount> = records.into_iter().filter_map(decode_discount).collect();
        if discounts.len() < total {
            warn!(
                skipped = total - discounts.len(),
                "some discounts were not loaded"
            );
        }
        Ok(discounts)
    }

    /// `GET /users`
    pub async fn list_users(&self) -> Result<Vec<User>, FetchError> {
        self.client
            .get("/users")
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    /// `POST /users`
    pub async fn create_user(&self, user: &NewUser) -> Result<User, FetchError> {
        let created: User = self
            .client
            .post("/users")
            .json(user)?
            .send()
            .await?
            .expect_status(StatusCode::CREATED)?
            .json()?;
        info!(user_id = %created.id, "user created");
        Ok(created)
    }

    /// `POST /products`
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, FetchError> {
        let created: Product = self
            .client
            .post("/products")
            .json(product)?
            .send()
            .await?
            .expect_status(StatusCode::CREATED)?
            .json()?;
        info!(product_id = %created.id, "product created");
        Ok(created)
    }

    /// `POST /discounts`
    pub async fn create_discount(&self, discount: &Discount) -> Result<Discount, FetchError> {
        let record = DiscountRecord::from(discount.clone());
        let created: DiscountRecord = self
            .client
            .post("/discounts")
            .json(&record)?
            .send()
            .await?
            .expect_status(StatusCode::CREATED)?
            .json()?;
        let created =
            Discount::try_from(created).map_err(|e| FetchError::ParseError(e.to_string()))?;
        info!(code = %created.code, "discount created");
        Ok(created)
    }

    /// `POST /orders`, stopping once the server has accepted the order.
    ///
    /// A returned response is a 201: the order exists on the server even if
    /// its body later fails to decode.
    pub async fn submit_order(&self, request: &OrderRequest) -> Result<Response, FetchError> {
        self.client
            .post("/orders")
            .json(request)?
            .send()
            .await?
            .expect_status(StatusCode::CREATED)
    }

    /// `POST /orders`
    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, FetchError> {
        let order: Order = self.submit_order(request).await?.json()?;
        info!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }

    /// `GET /orders/{id}`
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, FetchError> {
        if id.as_str().is_empty() || id.as_str().contains(['/', '?', '#']) {
            return Err(FetchError::InvalidUrl(format!("bad order id: {id}")));
        }
        self.client
            .get(format!("/orders/{}", id))
            .send()
            .await?
            .error_for_status()?
            .json()
    }
}

fn decode_discount(value: serde_json::Value) -> Option<Discount> {
    let record: DiscountRecord = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "skipping unreadable discount record");
            return None;
        }
    };
    match Discount::try_from(record) {
        Ok(discount) => Some(discount),
        Err(e) => {
            warn!(error = %e, "skipping invalid discount");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use crate::Method;
    use storefront_commerce::cart::{DiscountTerms, DiscountType};
    use storefront_commerce::catalog::Category;
    use storefront_commerce::checkout::OrderLine;
    use storefront_commerce::{Money, UserId};

    const BASE: &str = "http://127.0.0.1:3000";

    fn api(transport: MockTransport) -> (ApiClient, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        (ApiClient::with_transport(BASE, transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_list_products() {
        let (api, _) = api(MockTransport::new().route(
            Method::Get,
            "/products",
            200,
            r#"[{"_id":"p1","name":"Cap","category":"Accessories","price":350}]"#,
        ));
        let products = api.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Money::from_decimal(350.0));
    }

    #[tokio::test]
    async fn test_list_discounts_skips_bad_records() {
        let body = r#"[
            {"_id":"d1","discountCode":"SAVE10","type":"coupon","rule":"percentage-amount","discountPayload":{"discountPercent":10}},
            {"_id":"d2","discountCode":"BROKEN","type":"coupon","rule":"points","discountPayload":{}},
            {"_id":"d3","type":"seasonal"},
            {"_id":"d4","discountCode":"SUMMER","type":"seasonal","rule":"price","discountPayload":{"countPerPrice":300,"discountAmount":40}}
        ]"#;
        let (api, _) = api(MockTransport::new().route(Method::Get, "/discounts", 200, body));

        let discounts = api.list_discounts().await.unwrap();
        let codes: Vec<&str> = discounts.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["SAVE10", "SUMMER"]);
    }

    #[tokio::test]
    async fn test_list_users_server_error() {
        let (api, _) = api(MockTransport::new().route(Method::Get, "/users", 500, "boom"));
        let err = api.list_users().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_create_user_requires_201() {
        let created = r#"{"_id":"u9","firstName":"Ann","lastName":"Lee","email":"ann@example.com","points":0}"#;
        let user = NewUser {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@example.com".into(),
            password: "secret".into(),
            phone: "0800000000".into(),
            points: 0.0,
        };

        let (ok_api, transport) = api(MockTransport::new().route(Method::Post, "/users", 201, created));
        let user_back = ok_api.create_user(&user).await.unwrap();
        assert_eq!(user_back.id, UserId::new("u9"));
        let body: serde_json::Value =
            serde_json::from_slice(transport.sent()[0].body_bytes().unwrap()).unwrap();
        assert_eq!(body["firstName"], "Ann");

        let (not_created, _) = api(MockTransport::new().route(Method::Post, "/users", 200, created));
        let err = not_created.create_user(&user).await.unwrap_err();
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_create_product() {
        let (api, _) = api(MockTransport::new().route(
            Method::Post,
            "/products",
            201,
            r#"{"_id":"p7","name":"Tee","category":"Clothing","price":299}"#,
        ));
        let product = NewProduct::new("Tee", Category::Clothing, Money::from_decimal(299.0));
        let created = api.create_product(&product).await.unwrap();
        assert_eq!(created.id.as_str(), "p7");
    }

    #[tokio::test]
    async fn test_create_discount_sends_wire_record() {
        let (api, transport) = api(MockTransport::new().route(
            Method::Post,
            "/discounts",
            201,
            r#"{"_id":"d5","discountCode":"FLAT0","type":"coupon","rule":"fixed-amount","discountPayload":{"discountAmount":0}}"#,
        ));
        let discount = Discount::new(
            "FLAT0",
            DiscountType::Coupon,
            DiscountTerms::FixedAmount {
                discount_amount: 0.0,
            },
        )
        .unwrap();

        let created = api.create_discount(&discount).await.unwrap();
        assert_eq!(created.id.as_ref().map(|id| id.as_str()), Some("d5"));

        let body: serde_json::Value =
            serde_json::from_slice(transport.sent()[0].body_bytes().unwrap()).unwrap();
        assert_eq!(body["discountCode"], "FLAT0");
        assert_eq!(body["type"], "coupon");
        assert_eq!(body["rule"], "fixed-amount");
        assert_eq!(body["discountPayload"]["discountAmount"], 0.0);
    }

    #[tokio::test]
    async fn test_create_order_and_get_order() {
        let order_json = r#"{"_id":"o1","userId":"u1","status":"pending","total":630,"products":[{"productId":"p1","quantity":2}],"discounts":[]}"#;
        let (api, _) = api(
            MockTransport::new()
                .route(Method::Post, "/orders", 201, order_json)
                .route(Method::Get, "/orders/o1", 200, order_json),
        );
        let request = OrderRequest {
            user_id: UserId::new("u1"),
            products: vec![OrderLine {
                product_id: "p1".into(),
                quantity: 2,
            }],
            discounts: vec![],
        };

        let order = api.create_order(&request).await.unwrap();
        assert_eq!(order.total, Money::from_decimal(630.0));

        let fetched = api.get_order(&order.id).await.unwrap();
        assert_eq!(fetched, order);
    }

    #[tokio::test]
    async fn test_submit_order_accepts_undecodable_body() {
        let (api, _) = api(MockTransport::new().route(Method::Post, "/orders", 201, "created"));
        let request = OrderRequest {
            user_id: UserId::new("u1"),
            products: vec![],
            discounts: vec![],
        };

        let response = api.submit_order(&request).await.unwrap();
        assert_eq!(response.status, 201);
        assert!(matches!(
            api.create_order(&request).await,
            Err(FetchError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_get_order_rejects_path_like_id() {
        let (api, transport) = api(MockTransport::new());
        let err = api.get_order(&OrderId::new("../users")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure() {
        let (api, _) = api(MockTransport::new());
        let err = api.list_products().await.unwrap_err();
        assert!(matches!(err, FetchError::RequestError(_)));
    }
}
