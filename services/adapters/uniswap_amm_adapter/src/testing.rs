//! In-process call transport
//!
//! [`ScriptedTransport`] answers `eth_call`s from a handler closure and
//! records every call it sees. Used by the test suites and for exercising
//! the client without a node.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::transport::{CallError, CallTransport, EthCall};

type Handler = dyn Fn(&EthCall) -> Result<Vec<u8>, CallError> + Send + Sync;

pub struct ScriptedTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<EthCall>>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&EthCall) -> Result<Vec<u8>, CallError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the same return data
    pub fn returning(output: Vec<u8>) -> Self {
        Self::new(move |_| Ok(output.clone()))
    }

    /// Fail every call with the same error
    pub fn failing(error: CallError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<EthCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl CallTransport for ScriptedTransport {
    async fn eth_call(&self, call: &EthCall) -> Result<Vec<u8>, CallError> {
        self.calls.lock().push(call.clone());
        (self.handler)(call)
    }
}
