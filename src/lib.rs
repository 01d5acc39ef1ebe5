//! # Canteen Orders
//!
//! > **Order lifecycle and wait-time estimation for a campus canteen.**
//!
//! This crate manages food-service orders from placement to pickup: each
//! order gets a predicted completion time, moves through a monotonic set of
//! preparation states, and is redeemed exactly once with a secret token.
//!
//! ## Design Philosophy
//!
//! The engine is built around a message-passing store actor. One Tokio task
//! owns the order collection and processes requests sequentially, so every
//! status transition is an atomic read-modify-write without a single lock —
//! two concurrent pickups of the same order can never both succeed.
//!
//! Estimation is a capability: the [`eta::Predictor`] trait has a
//! deterministic heuristic implementation and a learned one backed by a
//! remote regression service. The two are composed once at startup into a
//! fallback stack, so a dead scoring service degrades the estimate, never the
//! request.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`store`])
//! The generic store actor. Separates the plumbing (channels, message loop,
//! typed errors) from the domain behavior supplied through
//! [`StoreEntity`](store::StoreEntity).
//!
//! ### 2. The Domain ([`model`], [`order_store`])
//! The canonical [`Order`](model::Order) record, the
//! [`OrderStatus`](model::OrderStatus) state machine, and the store actions
//! (advance, redeem) that mutate it.
//!
//! ### 3. Estimation ([`eta`], [`token`])
//! The ETA estimator with its predictor stack, and the pickup-token issuer
//! (CSPRNG issuance, constant-time verification).
//!
//! ### 4. The Interface ([`clients`], [`service`], [`runtime`])
//! The typed store client, the [`OrderLifecycleService`](service::OrderLifecycleService)
//! exposing the four lifecycle operations, and the
//! [`CanteenSystem`](runtime::CanteenSystem) that wires and shuts everything
//! down.
//!
//! ## Quick Start
//!
//! ```ignore
//! let system = CanteenSystem::new(EngineConfig::default());
//!
//! let receipt = system.orders.create_order(new_order).await?;
//! system.orders.advance_status(&receipt.order_id, None).await?;
//! // ... preparing -> ready ...
//! system.orders.pickup(&receipt.order_id, &receipt.pickup_token).await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! Run the tests with `RUST_LOG=info cargo test` to watch the request flow.

pub mod clients;
pub mod config;
pub mod eta;
pub mod model;
pub mod order_store;
pub mod runtime;
pub mod service;
pub mod store;
pub mod token;
