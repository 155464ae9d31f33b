//! Processing stages.
//!
//! A route runs an ordered chain of stages over one capability:
//! `process(conn) -> Flow`. The chain is assembled once at
//! route-registration time and terminated by a no-op sentinel stage;
//! execution is a plain iteration that stops at the first
//! [`Flow::Stop`].

use super::conn::Conn;

/// Outcome of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// hand over to the next stage
    Continue,
    /// end the chain
    Stop,
}

/// One processing stage of a route.
pub trait Stage: Send + Sync {
    fn process(&self, conn: &Conn) -> Flow;
}

/// Plain functions and closures are stages.
impl<F> Stage for F
where
    F: Fn(&Conn) -> Flow + Send + Sync,
{
    fn process(&self, conn: &Conn) -> Flow { self(conn) }
}

/// Ordered stage chain.
#[derive(Default)]
pub struct Chain {
    stages: Vec<Box<dyn Stage>>,
}

impl Chain {
    pub fn new() -> Self {
        Chain { stages: Vec::new() }
    }

    /// Append a stage.
    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Terminate the chain with the sentinel stage.
    pub(crate) fn seal(mut self) -> Self {
        self.stages.push(Box::new(Sentinel));
        self
    }

    /// Run stages in order until one stops the flow.
    pub fn run(&self, conn: &Conn) {
        for stage in &self.stages {
            if let Flow::Stop = stage.process(conn) {
                break;
            }
        }
    }
}

/// A single stage converts into a one-stage chain.
impl<S: Stage + 'static> From<S> for Chain {
    fn from(stage: S) -> Self {
        Chain::new().stage(stage)
    }
}

/// Terminal no-op.
struct Sentinel;

impl Stage for Sentinel {
    fn process(&self, _: &Conn) -> Flow { Flow::Stop }
}
