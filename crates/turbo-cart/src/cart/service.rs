//! Async cart service shared by every view on the page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::cart::entry::{CartEntry, CartLine};
use crate::cart::mutation::{self, AddOutcome, RemoveOutcome, SetQuantityOutcome};
use crate::cart::reconcile::{reconcile, Reconciled};
use crate::cart::store::{CartSnapshot, CartStore};
use crate::checkout::{OrderDraft, OrderSink, PlacedOrder, ShippingAddress};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::CartLineId;
use crate::product::ProductSnapshot;

/// What a view gets when it asks for the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartQuery {
    pub data: Vec<CartLine>,
    /// True while a resynchronization is rebuilding the cache.
    pub is_loading: bool,
    /// Read failure, if the cache could not be decoded.
    pub error: Option<String>,
}

struct Inner {
    store: CartStore,
    config: CartConfig,
    resyncing: AtomicBool,
}

/// Handle to the session cart.
///
/// Cloning is cheap and every clone operates on the same cart. Each mutation
/// waits out the configured latency first and then runs its
/// read-modify-write under the cache lock without suspending, so two
/// mutations never interleave their reads and writes.
#[derive(Clone)]
pub struct CartService {
    inner: Arc<Inner>,
}

impl CartService {
    /// Create a service with its own cache.
    pub fn new(config: CartConfig) -> Self {
        let store = CartStore::with_policies(config.entries_policy(), config.lines_policy());
        Self::with_store(store, config)
    }

    /// Create a service on an existing store.
    pub fn with_store(store: CartStore, config: CartConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                config,
                resyncing: AtomicBool::new(false),
            }),
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &CartStore {
        &self.inner.store
    }

    /// Current cart lines for rendering.
    pub fn cart_query(&self) -> CartQuery {
        let is_loading = self.inner.resyncing.load(Ordering::Acquire);
        match self.inner.store.lines() {
            Ok(data) => CartQuery {
                data,
                is_loading,
                error: None,
            },
            Err(e) => CartQuery {
                data: Vec::new(),
                is_loading,
                error: Some(e.to_string()),
            },
        }
    }

    /// Add `quantity` of `product` to the cart.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(
        &self,
        product: &ProductSnapshot,
        quantity: i64,
    ) -> Result<AddOutcome, CartError> {
        mutation::validate_add(product, quantity)?;
        self.simulate_round_trip().await;

        let result = self.mutate(true, |entries| mutation::add(entries, product, quantity));
        if let Ok(outcome) = &result {
            debug!(
                is_new_item = outcome.is_new_item,
                added_quantity = outcome.added_quantity,
                "added to cart"
            );
        }
        self.finish(result)
    }

    /// Remove a cart line. Accepts the synthetic line id or a bare product id.
    ///
    /// Not idempotent: removing the same line twice fails the second time.
    #[instrument(skip(self, cart_line_id))]
    pub async fn remove_from_cart(
        &self,
        cart_line_id: impl Into<CartLineId>,
    ) -> Result<RemoveOutcome, CartError> {
        let id = cart_line_id.into();
        self.simulate_round_trip().await;

        let result = self.mutate(false, |entries| mutation::remove(entries, &id));
        if let Ok(outcome) = &result {
            debug!(product_id = %outcome.removed_item.product_id, "removed from cart");
        }
        self.finish(result)
    }

    /// Set the absolute quantity of a cart line; 0 removes it.
    #[instrument(skip(self, cart_line_id))]
    pub async fn set_quantity(
        &self,
        cart_line_id: impl Into<CartLineId>,
        quantity: i64,
    ) -> Result<SetQuantityOutcome, CartError> {
        let id = cart_line_id.into();
        mutation::validate_set_quantity(quantity)?;
        self.simulate_round_trip().await;

        let result = self.mutate(false, |entries| {
            mutation::set_quantity(entries, &id, quantity)
        });
        if let Ok(outcome) = &result {
            debug!(
                product_id = %id.product_id(),
                previous = outcome.previous_quantity,
                new = outcome.new_quantity,
                removed = outcome.was_removed,
                "quantity set"
            );
        }
        self.finish(result)
    }

    /// Empty both cart representations. Idempotent.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), CartError> {
        self.simulate_round_trip().await;
        let result = self.inner.store.lock().commit(&[]).map(|_| ());
        if result.is_ok() {
            debug!("cart cleared");
        }
        self.finish(result)
    }

    /// Submit the current cart as an order. Once the order service accepts,
    /// the ordered quantities are taken out of the cart.
    #[instrument(skip(self, sink, shipping_address))]
    pub async fn checkout<S>(
        &self,
        sink: &S,
        shipping_address: ShippingAddress,
    ) -> Result<PlacedOrder, CartError>
    where
        S: OrderSink + ?Sized,
    {
        let lines = self.inner.store.lines()?;
        let currency = self.inner.config.currency;
        if let Some(line) = lines.iter().find(|l| l.product.price.currency != currency) {
            return Err(CartError::InvalidArgument(format!(
                "{} is priced in {:?}, orders are placed in {:?}",
                line.product.name, line.product.price.currency, currency
            )));
        }
        let draft = OrderDraft::from_lines(&lines, self.inner.config.tax_rate, shipping_address)?;

        let placed = sink
            .place_order(&draft)
            .await
            .map_err(|e| CartError::Checkout(format!("{e:#}")))?;
        debug!(order_id = %placed.id, total = %draft.total_amount, "order placed");

        // Lines added while the order was in flight stay in the cart.
        let settled = self.mutate(true, |entries| {
            Ok((mutation::settle(entries, &draft.items), ()))
        });
        self.finish(settled)?;
        Ok(placed)
    }

    /// Force both representations back into agreement.
    ///
    /// Undecodable slots are dropped, a surviving mirror is used to rebuild
    /// the entries, and the mirror is re-projected from the entries.
    pub fn resync(&self) {
        self.inner.resyncing.store(true, Ordering::Release);
        let mut txn = self.inner.store.lock();

        let entries = txn.entries().unwrap_or_else(|e| {
            warn!(error = %e, "dropping undecodable cart entries");
            txn.forget_entries();
            None
        });
        let lines = txn.lines().unwrap_or_else(|e| {
            warn!(error = %e, "dropping undecodable cart lines");
            txn.forget_lines();
            None
        });

        let snapshot = CartSnapshot { entries, lines };
        if let Ok(reconciled) = reconcile(snapshot) {
            if let Err(e) = txn.commit(&reconciled.entries) {
                warn!(error = %e, "resync failed, dropping cart cache");
                txn.forget_entries();
                txn.forget_lines();
            }
        }

        drop(txn);
        self.inner.resyncing.store(false, Ordering::Release);
    }

    async fn simulate_round_trip(&self) {
        let latency = self.inner.config.mutation_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// The read-modify-write section. Runs entirely under the cache lock.
    fn mutate<R>(
        &self,
        allow_empty: bool,
        apply: impl FnOnce(&[CartEntry]) -> Result<(Vec<CartEntry>, R), CartError>,
    ) -> Result<R, CartError> {
        let mut txn = self.inner.store.lock();

        let reconciled = match reconcile(txn.snapshot()?) {
            Err(CartError::EmptyCart) if allow_empty => Reconciled::default(),
            other => other?,
        };
        if reconciled.rebuilt {
            warn!(
                entries = reconciled.entries.len(),
                "cart entries missing while cart lines survived, rebuilt from lines"
            );
            txn.commit(&reconciled.entries)?;
        }

        let (next, outcome) = apply(&reconciled.entries)?;
        txn.commit(&next)?;
        Ok(outcome)
    }

    fn finish<R>(&self, result: Result<R, CartError>) -> Result<R, CartError> {
        if let Err(e) = &result {
            if e.is_internal() {
                warn!(error = %e, "cart mutation failed, resynchronizing");
                self.resync();
            }
        }
        result
    }
}

impl std::fmt::Debug for CartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
