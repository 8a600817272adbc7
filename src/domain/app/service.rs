use std::sync::Arc;

use crate::domain::engine::TimerSnapshot;
use crate::domain::inbound::{ControlPort, QueryPort};
use crate::domain::session::{SendCommandError, SessionHandle};

#[derive(Debug)]
pub struct ControlService {
    session: Arc<SessionHandle>,
}

impl ControlService {
    pub fn new(session: Arc<SessionHandle>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl ControlPort for ControlService {
    async fn start(&self) -> Result<(), SendCommandError> {
        self.session.start().await
    }

    async fn toggle(&self) -> Result<(), SendCommandError> {
        self.session.toggle().await
    }

    async fn stop(&self) -> Result<(), SendCommandError> {
        self.session.stop().await
    }

    async fn finish(&self) -> Result<(), SendCommandError> {
        self.session.finish().await
    }

    async fn mark_round(&self) -> Result<(), SendCommandError> {
        self.session.mark_round().await
    }
}

#[derive(Debug)]
pub struct QueryService {
    session: Arc<SessionHandle>,
}

impl QueryService {
    pub fn new(session: Arc<SessionHandle>) -> Self {
        Self { session }
    }
}

#[async_trait::async_trait]
impl QueryPort for QueryService {
    async fn query(&self) -> Result<TimerSnapshot, SendCommandError> {
        self.session.query().await
    }
}
