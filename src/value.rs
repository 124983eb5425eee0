// ABOUTME: Runtime value variants, hash keys, and display forms

use crate::ast::FunctionDecl;
use crate::env::Environment;
use crate::error::EvalError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

// Type-name strings reported by the `type` builtin
pub const INTEGER: &str = "INTEGER";
pub const STRING: &str = "STRING";
pub const BOOL: &str = "BOOL";
pub const LIST: &str = "LIST";
pub const HASHMAP: &str = "HASHMAP";
pub const FUNCTION: &str = "FUNCTION";
pub const BUILTIN: &str = "BULITIN";
pub const STRUCT: &str = "STRUCT";
pub const RETURN: &str = "RETURN";
pub const NULL: &str = "NULL";

/// A user-defined function together with the environment of its definition
/// site. The captured environment is what makes closures work.
#[derive(Debug)]
pub struct FunctionValue {
    pub decl: Rc<FunctionDecl>,
    pub env: Rc<Environment>,
}

/// A host-provided callable registered in the root environment.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: fn(&[Value]) -> Result<Value, EvalError>,
}

/// A declared struct shape: attribute defaults evaluated at declaration time
/// plus the methods, each closing over the declaring environment.
#[derive(Debug)]
pub struct StructDef {
    pub name: String,
    pub defaults: HashMap<String, Value>,
    pub methods: HashMap<String, Rc<FunctionValue>>,
}

/// One runtime realization of a struct type.
#[derive(Debug, Clone)]
pub struct StructInstance {
    pub def: Rc<StructDef>,
    pub attributes: HashMap<String, Value>,
}

/// A hash map entry keeps the original key value next to the stored value so
/// entries can be displayed and iterated.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// Canonical identity of a hashable key: a type tag plus a 64-bit content
/// value. Distinct-object-but-equal-content keys collide by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: HashKind,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    Integer,
    Bool,
    Str,
}

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl HashKey {
    /// Derive the canonical key for a value, or `None` for unhashable kinds.
    /// Integers and booleans use their numeric content, strings FNV-1a of
    /// their bytes.
    pub fn from_value(value: &Value) -> Option<HashKey> {
        match value {
            Value::Integer(v) => Some(HashKey {
                kind: HashKind::Integer,
                value: *v as u64,
            }),
            Value::Bool(b) => Some(HashKey {
                kind: HashKind::Bool,
                value: u64::from(*b),
            }),
            Value::Str(s) => Some(HashKey {
                kind: HashKind::Str,
                value: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    Str(String),
    List(Vec<Value>),
    HashMap(HashMap<HashKey, HashPair>),
    Function(Rc<FunctionValue>),
    Builtin(BuiltinFunction),
    StructType(Rc<StructDef>),
    StructInstance(StructInstance),
    /// Wrapper threading a `return` up through block execution. Unwrapped by
    /// the enclosing call; never visible to language code.
    ReturnValue(Box<Value>),
    Null,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => INTEGER,
            Value::Str(_) => STRING,
            Value::Bool(_) => BOOL,
            Value::List(_) => LIST,
            Value::HashMap(_) => HASHMAP,
            Value::Function(_) => FUNCTION,
            Value::Builtin(_) => BUILTIN,
            Value::StructType(_) | Value::StructInstance(_) => STRUCT,
            Value::ReturnValue(_) => RETURN,
            Value::Null => NULL,
        }
    }
}

/// Host-level equality, used by tests and by the evaluator's `==`/`!=`
/// handling of same-typed primitives. Functions and struct types compare by
/// identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::HashMap(a), Value::HashMap(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::StructType(a), Value::StructType(b)) => Rc::ptr_eq(a, b),
            (Value::StructInstance(a), Value::StructInstance(b)) => {
                Rc::ptr_eq(&a.def, &b.def) && a.attributes == b.attributes
            }
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::HashMap(entries) => {
                // Sort by displayed key for stable output
                let mut pairs: Vec<_> = entries.values().collect();
                pairs.sort_by_key(|pair| pair.key.to_string());
                write!(f, "{{")?;
                for (i, pair) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
            Value::Function(function) => write!(f, "Function {}", function.decl.name.lexeme),
            Value::Builtin(builtin) => write!(f, "Builtin Function {}", builtin.name),
            Value::StructType(def) => write!(f, "Struct {}", def.name),
            Value::StructInstance(instance) => write!(f, "Struct {} instance", instance.def.name),
            Value::ReturnValue(value) => write!(f, "{}", value),
            Value::Null => write!(f, "null"),
        }
    }
}
