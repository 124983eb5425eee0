// ABOUTME: Lexically nested environments mapping names to runtime values

use crate::error::EvalError;
use crate::value::{HashKey, HashPair, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope in the chain. Shared via `Rc` so a function value can retain its
/// defining scope after the frame that created it has exited.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// The root environment, with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// A child scope, created on function call and block entry.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Write into THIS scope unconditionally. Used by declarations and
    /// parameter binding.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Read the innermost binding of `name`, walking the parent chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.get(name);
        }
        None
    }

    /// Update the innermost scope that already defines `name`.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.set(name, value);
        }
        Err(EvalError::runtime(
            &value,
            format!("Cannot assign to undefined variable '{}'", name),
        ))
    }

    /// Resolve `name` like `set` and overwrite one element of the container
    /// it holds: `list[index] = value` or hash-map upsert.
    pub fn set_index(&self, name: &str, index: &Value, value: Value) -> Result<(), EvalError> {
        {
            let mut bindings = self.bindings.borrow_mut();
            if let Some(slot) = bindings.get_mut(name) {
                return write_index(slot, index, value);
            }
        }
        if let Some(parent) = &self.parent {
            return parent.set_index(name, index, value);
        }
        Err(EvalError::runtime(
            &value,
            format!("Cannot index into undefined variable '{}'", name),
        ))
    }

    /// Resolve `name` to a struct instance and write one of its attributes.
    pub fn set_attr(&self, name: &str, attribute: &str, value: Value) -> Result<(), EvalError> {
        {
            let mut bindings = self.bindings.borrow_mut();
            if let Some(slot) = bindings.get_mut(name) {
                return match slot {
                    Value::StructInstance(instance) => {
                        instance.attributes.insert(attribute.to_string(), value);
                        Ok(())
                    }
                    other => Err(EvalError::runtime(
                        &other.clone(),
                        format!("'{}' is not a struct instance", name),
                    )),
                };
            }
        }
        if let Some(parent) = &self.parent {
            return parent.set_attr(name, attribute, value);
        }
        Err(EvalError::runtime(
            &value,
            format!("Cannot set attribute on undefined variable '{}'", name),
        ))
    }

    /// Present-anywhere-in-chain predicate. Only tests and drivers need it.
    #[allow(dead_code)]
    pub fn exists(&self, name: &str) -> bool {
        if self.bindings.borrow().contains_key(name) {
            return true;
        }
        match &self.parent {
            Some(parent) => parent.exists(name),
            None => false,
        }
    }
}

fn write_index(slot: &mut Value, index: &Value, value: Value) -> Result<(), EvalError> {
    match slot {
        Value::List(items) => match index {
            Value::Integer(i) => {
                let position = usize::try_from(*i)
                    .ok()
                    .filter(|&p| p < items.len())
                    .ok_or_else(|| EvalError::runtime(index, "List index out of range"))?;
                items[position] = value;
                Ok(())
            }
            other => Err(EvalError::runtime(other, "List indices must be integers")),
        },
        Value::HashMap(entries) => match HashKey::from_value(index) {
            Some(key) => {
                entries.insert(
                    key,
                    HashPair {
                        key: index.clone(),
                        value,
                    },
                );
                Ok(())
            }
            None => Err(EvalError::runtime(
                index,
                format!("Unhashable key of type {}", index.type_name()),
            )),
        },
        other => Err(EvalError::runtime(
            &other.clone(),
            "Only lists and hash maps support index assignment",
        )),
    }
}
