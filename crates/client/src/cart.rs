//! Add-to-cart submission and the optimistic cart counter.

use std::sync::Arc;

use storefront_core::ProductId;
use tokio::sync::Mutex;

use crate::api::{ApiError, CartRequest, StorefrontApi};
use crate::view::CartView;

/// Notice shown when the backend rejects an add-to-cart.
pub const ADD_FAILED_NOTICE: &str = "Có lỗi xảy ra khi thêm vào giỏ hàng";

/// Notice shown after a successful add-to-cart when announcing is enabled.
pub const ADDED_NOTICE: &str = "Sản phẩm đã được thêm vào giỏ hàng!";

/// An add-to-cart trigger (button click or form submit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Raw `data-product-id` attribute of the trigger.
    pub product_id: Option<String>,
    default_prevented: bool,
}

impl TriggerEvent {
    pub fn new(product_id: Option<impl Into<String>>) -> Self {
        Self {
            product_id: product_id.map(Into::into),
            default_prevented: false,
        }
    }

    /// Suppress the browser's navigation/form submission.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// How an add-to-cart round trip ended, when it reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// Accepted; the badge now shows `count`.
    Added { count: i64 },
    /// The backend answered `{success: false}`; a notice was shown.
    Rejected,
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("trigger has no product id")]
    MissingProductId,
    #[error("add to cart failed for product {product_id}: {source}")]
    Api {
        product_id: ProductId,
        #[source]
        source: ApiError,
    },
}

/// Handles add-to-cart triggers.
///
/// Takes `&self` so several submissions can be in flight at once; each one
/// updates the shared view only after its own response arrives. There is no
/// de-duplication: two clicks mean two requests and, if both succeed, two
/// increments.
pub struct CartActionHandler<A, V> {
    api: A,
    view: Arc<Mutex<V>>,
    csrf_token: Option<String>,
    announce_success: bool,
}

impl<A, V> CartActionHandler<A, V>
where
    A: StorefrontApi,
    V: CartView,
{
    pub fn new(api: A, view: Arc<Mutex<V>>, csrf_token: Option<String>) -> Self {
        Self {
            api,
            view,
            csrf_token,
            announce_success: false,
        }
    }

    /// Also show [`ADDED_NOTICE`] after a successful add.
    pub fn announce_success(mut self, announce: bool) -> Self {
        self.announce_success = announce;
        self
    }

    pub fn view(&self) -> Arc<Mutex<V>> {
        Arc::clone(&self.view)
    }

    /// Handle a trigger: suppress its default action, then submit.
    pub async fn handle_trigger(&self, event: &mut TriggerEvent) -> Result<CartOutcome, CartError> {
        event.prevent_default();

        let product_id = match event.product_id.as_deref().map(str::parse::<ProductId>) {
            Some(Ok(id)) => id,
            _ => {
                tracing::warn!(raw = ?event.product_id, "add-to-cart trigger without a product id");
                return Err(CartError::MissingProductId);
            }
        };

        self.add_to_cart(product_id).await
    }

    /// Submit one unit of `product_id` and update the view from the response.
    ///
    /// Transport failures are logged and returned; the view is not touched.
    pub async fn add_to_cart(&self, product_id: ProductId) -> Result<CartOutcome, CartError> {
        let request = CartRequest::single(product_id);
        tracing::info!(product_id = %request.product_id, "adding to cart");

        let result = self
            .api
            .add_to_cart(&request, self.csrf_token.as_deref())
            .await;
        let response = match result {
            Ok(response) => response,
            Err(source) => {
                tracing::error!(product_id = %request.product_id, error = %source, "add to cart request failed");
                return Err(CartError::Api {
                    product_id: request.product_id,
                    source,
                });
            }
        };

        let mut view = self.view.lock().await;
        if !response.success {
            tracing::info!(product_id = %request.product_id, "add to cart rejected");
            view.show_notice(ADD_FAILED_NOTICE);
            return Ok(CartOutcome::Rejected);
        }

        let count = parse_leading_int(&view.cart_count_text())
            .unwrap_or(0)
            .saturating_add(1);
        view.set_cart_count_text(count.to_string());
        if self.announce_success {
            view.show_notice(ADDED_NOTICE);
        }

        Ok(CartOutcome::Added { count })
    }
}

/// Integer at the start of `text` (after whitespace), if any.
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '+' || c == '-'));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use storefront_core::Product;
    use tokio::sync::Notify;

    use super::*;
    use crate::api::CartResponse;
    use crate::view::MemoryCartView;

    #[derive(Default)]
    struct ScriptedCart {
        responses: StdMutex<VecDeque<Result<CartResponse, ApiError>>>,
        seen: StdMutex<Vec<(CartRequest, Option<String>)>>,
    }

    impl ScriptedCart {
        fn answering(responses: Vec<Result<CartResponse, ApiError>>) -> Self {
            Self {
                responses: StdMutex::new(responses.into()),
                seen: StdMutex::default(),
            }
        }

        fn seen(&self) -> Vec<(CartRequest, Option<String>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StorefrontApi for ScriptedCart {
        async fn load_more_top_rated(&self, _page: u32) -> Result<Vec<Product>, ApiError> {
            unreachable!("cart handler never paginates")
        }

        async fn add_to_cart(
            &self,
            request: &CartRequest,
            csrf_token: Option<&str>,
        ) -> Result<CartResponse, ApiError> {
            self.seen
                .lock()
                .unwrap()
                .push((request.clone(), csrf_token.map(str::to_string)));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(CartResponse { success: true }))
        }
    }

    fn handler(
        api: ScriptedCart,
        badge: &str,
    ) -> CartActionHandler<Arc<ScriptedCart>, MemoryCartView> {
        CartActionHandler::new(
            Arc::new(api),
            Arc::new(Mutex::new(MemoryCartView::with_count(badge))),
            Some("tok".to_string()),
        )
    }

    #[tokio::test]
    async fn success_increments_counter_by_one() {
        let h = handler(ScriptedCart::default(), "3");
        let mut event = TriggerEvent::new(Some("42"));

        let outcome = h.handle_trigger(&mut event).await.unwrap();

        assert_eq!(outcome, CartOutcome::Added { count: 4 });
        assert!(event.default_prevented());
        let view = h.view();
        let view = view.lock().await;
        assert_eq!(view.count_text, "4");
        assert!(view.notices.is_empty());
    }

    #[tokio::test]
    async fn request_carries_product_quantity_and_token() {
        let api = Arc::new(ScriptedCart::default());
        let h = CartActionHandler::new(
            Arc::clone(&api),
            Arc::new(Mutex::new(MemoryCartView::default())),
            Some("tok".to_string()),
        );

        h.add_to_cart("42".parse().unwrap()).await.unwrap();

        let seen = api.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, CartRequest::single("42".parse().unwrap()));
        assert_eq!(seen[0].0.quantity, 1);
        assert_eq!(seen[0].1.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn unparseable_counter_starts_from_zero() {
        let h = handler(ScriptedCart::default(), "");
        h.add_to_cart("1".parse().unwrap()).await.unwrap();
        assert_eq!(h.view().lock().await.count_text, "1");

        let h = handler(ScriptedCart::default(), "items");
        h.add_to_cart("1".parse().unwrap()).await.unwrap();
        assert_eq!(h.view().lock().await.count_text, "1");
    }

    #[tokio::test]
    async fn rejection_shows_notice_and_keeps_counter() {
        let h = handler(
            ScriptedCart::answering(vec![Ok(CartResponse { success: false })]),
            "5",
        );

        let outcome = h.add_to_cart("9".parse().unwrap()).await.unwrap();

        assert_eq!(outcome, CartOutcome::Rejected);
        let view = h.view();
        let view = view.lock().await;
        assert_eq!(view.count_text, "5");
        assert_eq!(view.notices, vec![ADD_FAILED_NOTICE.to_string()]);
    }

    #[tokio::test]
    async fn transport_failure_is_silent_for_the_shopper() {
        let h = handler(
            ScriptedCart::answering(vec![Err(ApiError::Network("timed out".to_string()))]),
            "5",
        );

        let err = h.add_to_cart("9".parse().unwrap()).await.unwrap_err();

        assert!(matches!(err, CartError::Api { .. }));
        let view = h.view();
        let view = view.lock().await;
        assert_eq!(view.count_text, "5");
        assert!(view.notices.is_empty());
    }

    #[tokio::test]
    async fn missing_product_id_sends_nothing() {
        let api = Arc::new(ScriptedCart::default());
        let h = CartActionHandler::new(
            Arc::clone(&api),
            Arc::new(Mutex::new(MemoryCartView::default())),
            None,
        );

        for raw in [None, Some("  ")] {
            let mut event = TriggerEvent::new(raw);
            let err = h.handle_trigger(&mut event).await.unwrap_err();
            assert!(matches!(err, CartError::MissingProductId));
            assert!(event.default_prevented());
        }
        assert!(api.seen().is_empty());
    }

    #[tokio::test]
    async fn announce_success_shows_added_notice() {
        let h = handler(ScriptedCart::default(), "0").announce_success(true);
        h.add_to_cart("1".parse().unwrap()).await.unwrap();
        assert_eq!(h.view().lock().await.notices, vec![ADDED_NOTICE.to_string()]);
    }

    /// Holds every response until released, so submissions overlap.
    struct GatedCart {
        gate: Notify,
        calls: StdMutex<u32>,
    }

    #[async_trait]
    impl StorefrontApi for GatedCart {
        async fn load_more_top_rated(&self, _page: u32) -> Result<Vec<Product>, ApiError> {
            unreachable!()
        }

        async fn add_to_cart(
            &self,
            _request: &CartRequest,
            _csrf_token: Option<&str>,
        ) -> Result<CartResponse, ApiError> {
            *self.calls.lock().unwrap() += 1;
            self.gate.notified().await;
            Ok(CartResponse { success: true })
        }
    }

    #[tokio::test]
    async fn overlapping_submissions_each_increment() {
        let api = Arc::new(GatedCart {
            gate: Notify::new(),
            calls: StdMutex::new(0),
        });
        let h = CartActionHandler::new(
            Arc::clone(&api),
            Arc::new(Mutex::new(MemoryCartView::with_count("0"))),
            None,
        );

        let mut first = TriggerEvent::new(Some("7"));
        let mut second = TriggerEvent::new(Some("7"));
        let release = async {
            while *api.calls.lock().unwrap() < 2 {
                tokio::task::yield_now().await;
            }
            api.gate.notify_waiters();
        };

        let (a, b, ()) = tokio::join!(
            h.handle_trigger(&mut first),
            h.handle_trigger(&mut second),
            release
        );

        a.unwrap();
        b.unwrap();
        assert_eq!(*api.calls.lock().unwrap(), 2);
        assert_eq!(h.view().lock().await.count_text, "2");
    }

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  12 items"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("+"), None);
        assert_eq!(parse_leading_int("x1"), None);
    }
}
