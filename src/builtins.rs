// ABOUTME: Host-provided builtin functions registered in the root environment

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{BuiltinFunction, Value};
use std::rc::Rc;

const BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "print",
        func: builtin_print,
    },
    BuiltinFunction {
        name: "len",
        func: builtin_len,
    },
    BuiltinFunction {
        name: "type",
        func: builtin_type,
    },
    BuiltinFunction {
        name: "append",
        func: builtin_append,
    },
    BuiltinFunction {
        name: "removeAt",
        func: builtin_remove_at,
    },
];

/// Register every builtin into the root environment.
pub fn register_builtins(env: Rc<Environment>) {
    for builtin in BUILTINS {
        env.define(builtin.name.to_string(), Value::Builtin(*builtin));
    }
}

/// Write each argument's display form on its own line.
fn builtin_print(args: &[Value]) -> Result<Value, EvalError> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(Value::Null)
}

fn builtin_len(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::message(format!(
            "len() takes exactly one argument, got {}",
            args.len()
        )));
    }
    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.len() as i64)),
        Value::List(items) => Ok(Value::Integer(items.len() as i64)),
        Value::HashMap(entries) => Ok(Value::Integer(entries.len() as i64)),
        other => Err(EvalError::message(format!(
            "len() does not support values of type {}",
            other.type_name()
        ))),
    }
}

fn builtin_type(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::message(format!(
            "type() takes exactly one argument, got {}",
            args.len()
        )));
    }
    Ok(Value::Str(format!("<type: {}>", args[0].type_name())))
}

/// Returns a new list; the argument list is left untouched.
fn builtin_append(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::message(format!(
            "append() takes exactly two arguments, got {}",
            args.len()
        )));
    }
    match &args[0] {
        Value::List(items) => {
            let mut items = items.clone();
            items.push(args[1].clone());
            Ok(Value::List(items))
        }
        other => Err(EvalError::message(format!(
            "append() expects a list as its first argument, got {}",
            other.type_name()
        ))),
    }
}

/// Returns a new list without the element at the given index.
fn builtin_remove_at(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::message(format!(
            "removeAt() takes exactly two arguments, got {}",
            args.len()
        )));
    }
    let Value::List(items) = &args[0] else {
        return Err(EvalError::message(format!(
            "removeAt() expects a list as its first argument, got {}",
            args[0].type_name()
        )));
    };
    let Value::Integer(index) = &args[1] else {
        return Err(EvalError::message(format!(
            "removeAt() expects an integer index, got {}",
            args[1].type_name()
        )));
    };

    let position = usize::try_from(*index)
        .ok()
        .filter(|&p| p < items.len())
        .ok_or_else(|| {
            EvalError::message(format!("removeAt() index {} is out of range", index))
        })?;

    let mut items = items.clone();
    items.remove(position);
    Ok(Value::List(items))
}
