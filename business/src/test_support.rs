use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::cart::model::CartLine;
use crate::domain::cart::remote::RemoteCartService;
use crate::domain::errors::RemoteCartError;
use crate::domain::shared::value_objects::LineId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteCall {
    Fetch,
    Update(LineId, u32),
    Remove(LineId),
    Clear,
}

type Reply = Result<Option<CartLine>, RemoteCartError>;

#[derive(Default)]
struct Script {
    cart: Vec<CartLine>,
    calls: Vec<RemoteCall>,
    waiting: Vec<Option<oneshot::Sender<Reply>>>,
}

/// Remote cart whose mutating calls stay open until the test answers them.
/// `fetch_cart` answers immediately with the configured cart.
#[derive(Default)]
pub(crate) struct ScriptedCartService {
    script: Mutex<Script>,
}

impl ScriptedCartService {
    pub(crate) fn with_cart(cart: Vec<CartLine>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(Script {
                cart,
                ..Script::default()
            }),
        })
    }

    pub(crate) fn calls(&self) -> Vec<RemoteCall> {
        self.script.lock().unwrap().calls.clone()
    }

    pub(crate) async fn wait_for_calls(&self, count: usize) {
        loop {
            let seen = self.script.lock().unwrap().calls.len();
            if seen >= count {
                break;
            }
            tokio::task::yield_now().await;
        }
    }

    pub(crate) fn reply_line(&self, index: usize, line: CartLine) {
        self.reply(index, Ok(Some(line)));
    }

    pub(crate) fn reply_ok(&self, index: usize) {
        self.reply(index, Ok(None));
    }

    pub(crate) fn reply_err(&self, index: usize, error: RemoteCartError) {
        self.reply(index, Err(error));
    }

    fn reply(&self, index: usize, reply: Reply) {
        let sender = self.script.lock().unwrap().waiting[index]
            .take()
            .expect("call already answered");
        let _ = sender.send(reply);
    }

    fn record(&self, call: RemoteCall) -> oneshot::Receiver<Reply> {
        let (sender, receiver) = oneshot::channel();
        let mut script = self.script.lock().unwrap();
        script.calls.push(call);
        script.waiting.push(Some(sender));
        receiver
    }

    async fn await_reply(receiver: oneshot::Receiver<Reply>) -> Reply {
        receiver
            .await
            .unwrap_or_else(|_| Err(RemoteCartError::network("reply dropped")))
    }
}

#[async_trait]
impl RemoteCartService for ScriptedCartService {
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, RemoteCartError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(RemoteCall::Fetch);
        script.waiting.push(None);
        Ok(script.cart.clone())
    }

    async fn update_line_quantity(
        &self,
        line_id: LineId,
        quantity: u32,
    ) -> Result<CartLine, RemoteCartError> {
        let receiver = self.record(RemoteCall::Update(line_id, quantity));
        match Self::await_reply(receiver).await? {
            Some(line) => Ok(line),
            None => Err(RemoteCartError::network("empty update reply")),
        }
    }

    async fn remove_line(&self, line_id: LineId) -> Result<(), RemoteCartError> {
        let receiver = self.record(RemoteCall::Remove(line_id));
        Self::await_reply(receiver).await.map(|_| ())
    }

    async fn clear_cart(&self) -> Result<(), RemoteCartError> {
        let receiver = self.record(RemoteCall::Clear);
        Self::await_reply(receiver).await.map(|_| ())
    }
}
