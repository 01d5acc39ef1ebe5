//! # Mock Store
//!
//! Utilities for testing store clients in isolation.
//!
//! [`MockStore`] hands out a [`StoreClient`] whose requests are answered by a
//! scripted queue of expectations instead of a real [`StoreActor`]. This lets
//! the lifecycle service be tested against exact store behavior (counts,
//! failures, canned records) deterministically.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::store::{StoreClient, StoreEntity, StoreError, StoreRequest};

/// An expected request and the response to return for it.
enum Expectation<T: StoreEntity> {
    Get {
        response: Result<Option<T>, StoreError<T::Error>>,
    },
    Create {
        response: Result<T::Id, StoreError<T::Error>>,
    },
    Select {
        response: Result<Vec<T>, StoreError<T::Error>>,
    },
    Action {
        response: Result<T::ActionResult, StoreError<T::Error>>,
    },
}

/// A scripted store client for tests.
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::<Order>::new();
/// mock.expect_select().return_ok(vec![]);
/// mock.expect_create().return_ok("order_1".to_string());
///
/// let client = mock.client();
/// // Drive the code under test with `client`...
/// mock.verify(); // Panics if any expectation was left unconsumed.
/// ```
pub struct MockStore<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> MockStore<T> {
    /// Creates a new mock with no expectations queued.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Background task answering each request with the next expectation.
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { respond_to, .. },
                        Some(Expectation::Get { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Select { respond_to, .. },
                        Some(Expectation::Select { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use by the code under test.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    /// Expects a `get` request.
    pub fn expect_get(&mut self) -> GetExpectation<T> {
        GetExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> CreateExpectation<T> {
        CreateExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `select` request.
    pub fn expect_select(&mut self) -> SelectExpectation<T> {
        SelectExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectation<T> {
        ActionExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: StoreEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `get` expectations.
pub struct GetExpectation<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> GetExpectation<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Get { response: Ok(value) });
    }

    pub fn return_err(self, error: StoreError<T::Error>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Get { response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectation<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> CreateExpectation<T> {
    pub fn return_ok(self, id: T::Id) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: StoreError<T::Error>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Err(error) });
    }
}

/// Builder for `select` expectations.
pub struct SelectExpectation<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> SelectExpectation<T> {
    pub fn return_ok(self, records: Vec<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Select { response: Ok(records) });
    }

    pub fn return_err(self, error: StoreError<T::Error>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Select { response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectation<T: StoreEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: StoreEntity> ActionExpectation<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: StoreError<T::Error>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Err(error) });
    }
}
