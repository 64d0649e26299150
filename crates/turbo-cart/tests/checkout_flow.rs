mod common;

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use common::*;
use turbo_cart::prelude::*;

/// Order service double that records what it receives.
#[derive(Default)]
struct RecordingSink {
    reject: bool,
    received: Mutex<Vec<OrderDraft>>,
}

#[async_trait]
impl OrderSink for RecordingSink {
    async fn place_order(&self, draft: &OrderDraft) -> anyhow::Result<PlacedOrder> {
        if self.reject {
            anyhow::bail!("orders table unavailable");
        }
        let mut received = self.received.lock().unwrap();
        received.push(draft.clone());
        Ok(PlacedOrder {
            id: OrderId::new(format!("order-{}", received.len())),
        })
    }
}

/// Order service that takes a while to answer.
struct SlowSink {
    delay: Duration,
}

#[async_trait]
impl OrderSink for SlowSink {
    async fn place_order(&self, _draft: &OrderDraft) -> anyhow::Result<PlacedOrder> {
        tokio::time::sleep(self.delay).await;
        Ok(PlacedOrder {
            id: OrderId::new("order-slow"),
        })
    }
}

#[tokio::test]
async fn test_checkout_submits_lines_and_clears() {
    let cart = cart();
    cart.add_to_cart(&product("a", 10.0), 2).await.unwrap();
    cart.add_to_cart(&product("b", 5.0), 3).await.unwrap();
    let sink = RecordingSink::default();

    let placed = cart.checkout(&sink, address()).await.unwrap();

    assert_eq!(placed.id.as_str(), "order-1");
    let received = sink.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].items.len(), 2);
    assert_eq!(received[0].subtotal, Money::from_decimal(35.0, Currency::USD));
    assert_eq!(received[0].total_amount, Money::from_decimal(37.8, Currency::USD));
    assert!(cart.cart_query().data.is_empty());
}

#[tokio::test]
async fn test_rejected_checkout_keeps_cart() {
    let cart = cart();
    cart.add_to_cart(&product("a", 10.0), 2).await.unwrap();
    let sink = RecordingSink {
        reject: true,
        ..Default::default()
    };

    let err = cart.checkout(&sink, address()).await.unwrap_err();

    assert!(matches!(err, CartError::Checkout(ref msg) if msg.contains("orders table")));
    assert_eq!(CartNotice::failed(&err).title, "Order Failed");
    assert_eq!(cart.cart_query().data.len(), 1);
}

#[tokio::test]
async fn test_empty_cart_checkout() {
    let cart = cart();
    let sink = RecordingSink::default();

    assert!(matches!(
        cart.checkout(&sink, address()).await,
        Err(CartError::EmptyCart)
    ));
    assert!(sink.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_through_trait_object() {
    let cart = cart();
    cart.add_to_cart(&product("a", 1.0), 1).await.unwrap();
    let sink: Box<dyn OrderSink> = Box::new(RecordingSink::default());

    cart.checkout(sink.as_ref(), address()).await.unwrap();
    assert!(cart.store().read().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_items_added_during_checkout_survive() {
    let cart = cart();
    cart.add_to_cart(&product("a", 10.0), 2).await.unwrap();

    let pending = {
        let cart = cart.clone();
        tokio::spawn(async move {
            let sink = SlowSink {
                delay: Duration::from_millis(50),
            };
            cart.checkout(&sink, address()).await
        })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    cart.add_to_cart(&product("b", 5.0), 1).await.unwrap();
    cart.add_to_cart(&product("a", 10.0), 1).await.unwrap();

    let placed = pending.await.unwrap().unwrap();
    assert_eq!(placed.id.as_str(), "order-slow");

    // The order carried two of "a"; the extra one and "b" were never ordered.
    let data = cart.cart_query().data;
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].product_id.as_str(), "a");
    assert_eq!(data[0].quantity, 1);
    assert_eq!(data[1].product_id.as_str(), "b");
    assert_eq!(data[1].quantity, 1);
    assert_eq!(total_items(&data), 2);
}
