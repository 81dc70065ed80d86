//! Named registers shared between the automaton, its guards and its actions.

use super::error::AutomatonError;
use parking_lot::RwLock;
use regex::Regex;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::trace;

static REGISTER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z][a-zA-Z0-9_]*$").expect("register name pattern is valid")
});

type Slot = Option<Box<dyn Any + Send + Sync>>;

/// Cheaply clonable handle on a register bank.
///
/// Registers live beside the transition table and never influence dispatch
/// on their own; guards and actions capture a handle to read or write them.
/// A register must be created before it is read or written, and is empty
/// until its first write.
///
/// # Example
///
/// ```rust
/// use automaton::Registers;
///
/// let registers = Registers::new();
/// registers.create("count").unwrap();
/// assert_eq!(registers.get::<i32>("count").unwrap(), None);
///
/// registers.set("count", 5).unwrap();
/// assert_eq!(registers.get::<i32>("count").unwrap(), Some(5));
/// ```
#[derive(Clone, Default)]
pub struct Registers {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty register.
    ///
    /// Fails if the name is already taken or does not match
    /// `[a-zA-Z][a-zA-Z0-9_]*`.
    pub fn create(&self, name: &str) -> Result<(), AutomatonError> {
        trace!(register = name, "Creating register");
        let mut slots = self.slots.write();
        if slots.contains_key(name) {
            return Err(AutomatonError::RegisterExists(name.to_string()));
        }
        if !REGISTER_NAME.is_match(name) {
            return Err(AutomatonError::InvalidRegisterName(name.to_string()));
        }
        slots.insert(name.to_string(), None);
        Ok(())
    }

    /// Read a register as `T`.
    ///
    /// Returns `Ok(None)` while the register is empty and
    /// [`AutomatonError::RegisterTypeMismatch`] when it holds another type.
    pub fn get<T>(&self, name: &str) -> Result<Option<T>, AutomatonError>
    where
        T: Any + Clone,
    {
        trace!(register = name, expected = type_name::<T>(), "Reading register");
        let slots = self.slots.read();
        let slot = slots
            .get(name)
            .ok_or_else(|| AutomatonError::UnknownRegister(name.to_string()))?;
        match slot.as_deref() {
            None => Ok(None),
            Some(value) => value
                .downcast_ref::<T>()
                .cloned()
                .map(Some)
                .ok_or_else(|| AutomatonError::RegisterTypeMismatch {
                    name: name.to_string(),
                    expected: type_name::<T>(),
                }),
        }
    }

    /// Overwrite a register. The new value may be of any type.
    pub fn set<T>(&self, name: &str, value: T) -> Result<(), AutomatonError>
    where
        T: Any + Send + Sync,
    {
        trace!(register = name, "Writing register");
        self.replace(name, Some(Box::new(value)))
    }

    /// Empty a register without removing it.
    pub fn clear(&self, name: &str) -> Result<(), AutomatonError> {
        trace!(register = name, "Clearing register");
        self.replace(name, None)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.read().contains_key(name)
    }

    /// Names of all created registers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn replace(&self, name: &str, value: Slot) -> Result<(), AutomatonError> {
        let mut slots = self.slots.write();
        let slot = slots
            .get_mut(name)
            .ok_or_else(|| AutomatonError::UnknownRegister(name.to_string()))?;
        *slot = value;
        Ok(())
    }
}
