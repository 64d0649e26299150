#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use turbo_cart::prelude::*;

static TRACING: Once = Once::new();

pub fn setup_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "turbo_cart=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A cart with no simulated latency.
pub fn cart() -> CartService {
    setup_tracing();
    CartService::new(CartConfig::default().with_latency(Duration::ZERO))
}

pub fn product(id: &str, dollars: f64) -> ProductSnapshot {
    ProductSnapshot::new(id, format!("Product {id}"), Money::from_decimal(dollars, Currency::USD))
        .with_category("test")
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        address: "1 Navy Way".into(),
        city: "Arlington".into(),
        state: "VA".into(),
        zip_code: "22202".into(),
    }
}
