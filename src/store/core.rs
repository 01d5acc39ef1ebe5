//! # Generic Store Actor
//!
//! The order store is modelled as a single Tokio task that owns a `HashMap`
//! and processes requests sequentially. That sequencing is load-bearing:
//! every mutation of a stored entity is one message, so a read-validate-write
//! (for example a status transition) can never interleave with another
//! request for the same entity. No `Mutex` or `RwLock` is needed.
//!
//! ## Key Types
//!
//! - [`StoreEntity`]: the contract a stored record type must implement.
//! - [`StoreActor`]: the generic actor that owns the records.
//! - [`StoreClient`]: the cloneable handle used to talk to the actor.
//! - [`StoreError`]: transport-level errors plus a typed entity error slot.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE CONTRACT
// =============================================================================

/// Trait a record type must implement to be managed by [`StoreActor`].
///
/// # Architecture Note
/// The store logic is written once, generically, and the record type supplies
/// the domain behavior through associated types: the creation payload, the
/// mutating actions it accepts, and the filter its collection can be queried
/// with. Associated types keep every operation fully typed; a caller cannot
/// send the wrong payload to the wrong store.
///
/// All mutation beyond creation flows through [`StoreEntity::handle_action`],
/// which runs inside the actor task. Whatever invariant `handle_action`
/// enforces therefore holds under concurrent callers.
pub trait StoreEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this record (e.g., String, Uuid).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// Enum of record-specific mutating operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Predicate payload for collection queries ([`StoreClient::select`]).
    type Filter: Send + Sync + Debug;

    /// The typed error this record's operations can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the assigned ID and creation payload.
    fn from_create(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this record satisfies the given filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Handle a record-specific action. Runs inside the actor task, so the
    /// whole check-then-mutate sequence is atomic with respect to other
    /// requests.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors returned by store operations.
///
/// The `Entity` variant carries the record type's own error unchanged, so
/// callers can match on domain errors without string parsing.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum StoreError<E: std::error::Error> {
    #[error("store actor closed")]
    Closed,
    #[error("store actor dropped response channel")]
    Dropped,
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Entity(E),
}

/// One-shot response channel carrying a store result.
pub type Respond<V, E> = oneshot::Sender<Result<V, StoreError<E>>>;

/// Request messages accepted by the store actor.
///
/// The surface is deliberately small: records are created, fetched, queried
/// as a collection, and mutated through typed actions. Orders are never
/// updated field-by-field or deleted, so no generic Update/Delete exists.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T::Create,
        respond_to: Respond<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Respond<Option<T>, T::Error>,
    },
    Select {
        filter: T::Filter,
        respond_to: Respond<Vec<T>, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Respond<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

/// The generic actor that owns a collection of records.
///
/// Each instance runs in its own task and processes messages one at a time.
/// The `next_id_fn` is injected so production code can use UUIDs while tests
/// use predictable counters.
pub struct StoreActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: StoreEntity> StoreActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = StoreClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel
    /// closes (i.e., until every client handle has been dropped).
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Order" instead of the full path).
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();
                    match T::from_create(id.clone(), params) {
                        Ok(record) => {
                            // The insert is one message: readers never observe
                            // a partially written record.
                            self.records.insert(id.clone(), record);
                            info!(entity_type, %id, size = self.records.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(StoreError::Entity(e)));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    let found = record.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::Select { filter, respond_to } => {
                    let hits: Vec<T> = self
                        .records
                        .values()
                        .filter(|r| r.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, hits = hits.len(), "Select");
                    let _ = respond_to.send(Ok(hits));
                }
                StoreRequest::Action { id, action, respond_to } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(record) = self.records.get_mut(&id) {
                        let result = record
                            .handle_action(action)
                            .map_err(StoreError::Entity);
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Store actor shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A type-safe, cloneable handle for talking to a [`StoreActor`].
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn select(&self, filter: T::Filter) -> Result<Vec<T>, StoreError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Select { filter, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Action { id, action, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
