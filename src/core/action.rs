//! Side-effecting actions run after a branch commits.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Procedure executed with the parameters of the event that fired it.
///
/// Actions run after the new state is committed and after every listener
/// has been notified. Their side effects are unconstrained.
pub trait Action: Send + Sync {
    fn execute(&self, parameters: &[Value]);
}

impl<F> Action for F
where
    F: Fn(&[Value]) + Send + Sync,
{
    fn execute(&self, parameters: &[Value]) {
        self(parameters)
    }
}

/// Shareable handle on an action.
#[derive(Clone, Default)]
pub enum Effect {
    /// Does nothing.
    #[default]
    None,
    Run(Arc<dyn Action>),
}

impl Effect {
    pub const NONE: Effect = Effect::None;

    pub fn new<A>(action: A) -> Self
    where
        A: Action + 'static,
    {
        Effect::Run(Arc::new(action))
    }

    /// Build an effect from a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self::new(f)
    }

    pub fn execute(&self, parameters: &[Value]) {
        if let Effect::Run(action) = self {
            action.execute(parameters);
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Run(action) => {
                write!(f, "Run({:#x})", Arc::as_ptr(action) as *const () as usize)
            }
        }
    }
}
