use canteen_orders::clients::EntityClient;
use canteen_orders::config::{EngineConfig, PredictorConfig};
use canteen_orders::model::{OrderItem, OrderStatus};
use canteen_orders::order_store::OrderError;
use canteen_orders::runtime::CanteenSystem;
use canteen_orders::service::NewOrder;

fn thali_order(vendor_id: &str, student_id: &str) -> NewOrder {
    NewOrder {
        vendor_id: vendor_id.into(),
        student_id: student_id.into(),
        items: vec![OrderItem::new("Thali", 1, 5)],
        prep_minutes: Some(5),
    }
}

/// Full end-to-end walk: heuristic ETA arithmetic, creation response shape,
/// and load-aware estimates as the vendor's queue grows.
#[tokio::test]
async fn create_order_returns_load_aware_eta_and_token() {
    let system = CanteenSystem::new(EngineConfig::default());

    // Empty queue: 0 active * 5 + 5.
    let first = system
        .orders
        .create_order(thali_order("V1", "S1"))
        .await
        .expect("Failed to create first order");
    assert_eq!(first.eta_minutes, 5);
    assert!(!first.pickup_token.is_empty());

    // A second vendor's queue does not count toward V1's load.
    system
        .orders
        .create_order(thali_order("V2", "S9"))
        .await
        .expect("Failed to create other-vendor order");

    let second = system
        .orders
        .create_order(thali_order("V1", "S2"))
        .await
        .expect("Failed to create second order");
    assert_eq!(second.eta_minutes, 10);

    // Two active orders ahead: 2 * 5 + 5 = 15, the canonical scenario.
    let third = system
        .orders
        .create_order(thali_order("V1", "S3"))
        .await
        .expect("Failed to create third order");
    assert_eq!(third.eta_minutes, 15);
    assert_eq!(third.pickup_token.len(), 32);
    assert_ne!(third.pickup_token, first.pickup_token);

    // The stored record starts at `ordered` with the issued token.
    let stored = system
        .store
        .get(third.order_id.clone())
        .await
        .expect("Failed to get order")
        .expect("Order not found");
    assert_eq!(stored.status, OrderStatus::Ordered);
    assert_eq!(stored.eta_minutes, 15);
    assert_eq!(stored.pickup_token, third.pickup_token);

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Three advances walk ordered -> preparing -> ready -> collected; a fourth
/// hits the terminal state.
#[tokio::test]
async fn advance_status_walks_the_lifecycle_then_stops() {
    let system = CanteenSystem::new(EngineConfig::default());
    let receipt = system
        .orders
        .create_order(thali_order("V1", "S1"))
        .await
        .unwrap();
    let id = receipt.order_id;

    assert_eq!(
        system.orders.advance_status(&id, None).await,
        Ok(OrderStatus::Preparing)
    );
    assert_eq!(
        system.orders.advance_status(&id, None).await,
        Ok(OrderStatus::Ready)
    );
    assert_eq!(
        system.orders.advance_status(&id, None).await,
        Ok(OrderStatus::Collected)
    );
    assert_eq!(
        system.orders.advance_status(&id, None).await,
        Err(OrderError::TerminalState)
    );

    system.shutdown().await.unwrap();
}

/// Explicit targets go through the same monotonicity check as automatic
/// advancement: no skipping, no regression.
#[tokio::test]
async fn explicit_targets_cannot_skip_or_regress() {
    let system = CanteenSystem::new(EngineConfig::default());
    let receipt = system
        .orders
        .create_order(thali_order("V1", "S1"))
        .await
        .unwrap();
    let id = receipt.order_id;

    // Jumping straight to collected is rejected.
    assert_eq!(
        system
            .orders
            .advance_status(&id, Some(OrderStatus::Collected))
            .await,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Ordered,
            to: OrderStatus::Collected,
        })
    );

    // The immediate successor is fine.
    assert_eq!(
        system
            .orders
            .advance_status(&id, Some(OrderStatus::Preparing))
            .await,
        Ok(OrderStatus::Preparing)
    );

    // Moving backward is rejected; the stored status is untouched.
    assert_eq!(
        system
            .orders
            .advance_status(&id, Some(OrderStatus::Ordered))
            .await,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Preparing,
            to: OrderStatus::Ordered,
        })
    );
    let stored = system.store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Preparing);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_orders_report_not_found() {
    let system = CanteenSystem::new(EngineConfig::default());

    assert_eq!(
        system.orders.advance_status("no-such-order", None).await,
        Err(OrderError::NotFound("no-such-order".into()))
    );
    assert_eq!(
        system.orders.pickup("no-such-order", "any-token").await,
        Err(OrderError::NotFound("no-such-order".into()))
    );

    system.shutdown().await.unwrap();
}

/// A configured but unreachable scoring service never fails order creation:
/// every estimate resolves through the heuristic fallback.
#[tokio::test]
async fn dead_scoring_service_degrades_to_the_heuristic() {
    // Bind then drop to obtain a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = EngineConfig::default();
    config.predictor = Some(PredictorConfig {
        url: format!("http://{}/predict", addr),
        timeout_ms: 200,
    });
    let system = CanteenSystem::new(config);

    let receipt = system
        .orders
        .create_order(thali_order("V1", "S1"))
        .await
        .expect("Creation must survive a dead predictor");
    // Heuristic with an empty queue: 0 * 5 + 5.
    assert_eq!(receipt.eta_minutes, 5);

    system.shutdown().await.unwrap();
}

/// The queue lists a vendor's not-yet-collected orders, oldest first, and
/// never includes collected ones.
#[tokio::test]
async fn queue_tracks_active_orders_only() {
    let system = CanteenSystem::new(EngineConfig::default());

    let first = system
        .orders
        .create_order(thali_order("V1", "S1"))
        .await
        .unwrap();
    let second = system
        .orders
        .create_order(thali_order("V1", "S2"))
        .await
        .unwrap();
    system
        .orders
        .create_order(thali_order("V2", "S3"))
        .await
        .unwrap();

    let queue = system.orders.queue("V1").await.unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].order_id, first.order_id);
    assert_eq!(queue[1].order_id, second.order_id);
    assert!(queue.iter().all(|entry| entry.status.is_active()));

    // Collect the first order; it drops out of the queue.
    for _ in 0..2 {
        system.orders.advance_status(&first.order_id, None).await.unwrap();
    }
    system
        .orders
        .pickup(&first.order_id, &first.pickup_token)
        .await
        .unwrap();

    let queue = system.orders.queue("V1").await.unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].order_id, second.order_id);

    system.shutdown().await.unwrap();
}
