// ABOUTME: Tree-walking evaluator dispatching on statement and expression variants

use crate::ast::{Expr, Stmt};
use crate::env::Environment;
use crate::error::EvalError;
use crate::token::{byte_string, Token, TokenKind};
use crate::value::{FunctionValue, HashKey, HashPair, StructDef, StructInstance, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Run a parsed program in `env`, which should already hold the builtins.
/// Returns the value of the last statement, which is `Null` unless the
/// program ends in an expression statement.
pub fn eval_program(statements: &[Stmt], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Null;
    for statement in statements {
        result = eval_statement(statement, env)?;
        if let Value::ReturnValue(value) = result {
            return Err(EvalError::runtime(&value, "'return' outside of a function"));
        }
    }
    Ok(result)
}

/// Evaluate one statement for its side effects. A `ReturnValue` result is
/// threaded upward until the enclosing function call unwraps it.
pub fn eval_statement(stmt: &Stmt, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match stmt {
        Stmt::Expression(expr) => eval_expression(expr, env),

        Stmt::Var { name, initializer } => {
            let value = match initializer {
                Some(expr) => eval_expression(expr, env)?,
                None => Value::Null,
            };
            env.define(name.lexeme.clone(), value);
            Ok(Value::Null)
        }

        Stmt::Block(statements) => {
            let child = Environment::with_parent(env.clone());
            eval_block(statements, &child)
        }

        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            if is_truthy(&eval_expression(condition, env)?) {
                eval_statement(then_branch, env)
            } else if let Some(else_branch) = else_branch {
                eval_statement(else_branch, env)
            } else {
                Ok(Value::Null)
            }
        }

        Stmt::While { condition, body } => {
            while is_truthy(&eval_expression(condition, env)?) {
                let result = eval_statement(body, env)?;
                if matches!(result, Value::ReturnValue(_)) {
                    return Ok(result);
                }
            }
            Ok(Value::Null)
        }

        // The initializer runs in the enclosing scope, so a `for`-declared
        // counter stays observable after the loop
        Stmt::For {
            initializer,
            condition,
            step,
            body,
        } => {
            eval_statement(initializer, env)?;
            while is_truthy(&eval_expression(condition, env)?) {
                let result = eval_statement(body, env)?;
                if matches!(result, Value::ReturnValue(_)) {
                    return Ok(result);
                }
                eval_expression(step, env)?;
            }
            Ok(Value::Null)
        }

        Stmt::Return { value, .. } => {
            let result = match value {
                Some(expr) => eval_expression(expr, env)?,
                None => Value::Null,
            };
            Ok(Value::ReturnValue(Box::new(result)))
        }

        Stmt::Function(decl) => {
            let function = Value::Function(Rc::new(FunctionValue {
                decl: decl.clone(),
                env: env.clone(),
            }));
            env.define(decl.name.lexeme.clone(), function);
            Ok(Value::Null)
        }

        Stmt::Struct {
            name,
            attributes,
            methods,
        } => {
            let mut defaults = HashMap::new();
            for (attr_name, initializer) in attributes {
                let value = match initializer {
                    Some(expr) => eval_expression(expr, env)?,
                    None => Value::Null,
                };
                defaults.insert(attr_name.lexeme.clone(), value);
            }

            let mut method_map = HashMap::new();
            for decl in methods {
                method_map.insert(
                    decl.name.lexeme.clone(),
                    Rc::new(FunctionValue {
                        decl: decl.clone(),
                        env: env.clone(),
                    }),
                );
            }

            let def = Rc::new(StructDef {
                name: name.lexeme.clone(),
                defaults,
                methods: method_map,
            });
            env.define(name.lexeme.clone(), Value::StructType(def));
            Ok(Value::Null)
        }
    }
}

/// Evaluate a sequence of statements in `env`, stopping early on a
/// `ReturnValue` and propagating it as the result.
fn eval_block(statements: &[Stmt], env: &Rc<Environment>) -> Result<Value, EvalError> {
    for statement in statements {
        let result = eval_statement(statement, env)?;
        if matches!(result, Value::ReturnValue(_)) {
            return Ok(result);
        }
    }
    Ok(Value::Null)
}

pub fn eval_expression(expr: &Expr, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(value) => Ok(Value::Integer(*value)),
        Expr::Str(value) => Ok(Value::Str(value.clone())),
        Expr::Bool(value) => Ok(Value::Bool(*value)),
        Expr::Group(inner) => eval_expression(inner, env),

        Expr::Variable(name) => env
            .get(&name.lexeme)
            .ok_or_else(|| EvalError::message(format!("Undefined variable '{}'", name.lexeme))),

        Expr::Unary { operator, right } => {
            let value = eval_expression(right, env)?;
            match operator.kind {
                TokenKind::Minus => match value {
                    Value::Integer(v) => Ok(Value::Integer(v.wrapping_neg())),
                    other => Err(EvalError::runtime(
                        &other,
                        "Operand of unary '-' must be an integer",
                    )),
                },
                TokenKind::Bang => Ok(Value::Bool(!is_truthy(&value))),
                _ => Err(EvalError::message(format!(
                    "Unknown unary operator '{}'",
                    operator.lexeme
                ))),
            }
        }

        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let lhs = eval_expression(left, env)?;
            let rhs = eval_expression(right, env)?;
            eval_binary(operator, lhs, rhs)
        }

        Expr::Logical {
            left,
            operator,
            right,
        } => {
            let lhs = eval_expression(left, env)?;
            match operator.kind {
                TokenKind::And => {
                    if !is_truthy(&lhs) {
                        return Ok(Value::Bool(false));
                    }
                    let rhs = eval_expression(right, env)?;
                    Ok(Value::Bool(is_truthy(&rhs)))
                }
                TokenKind::Or => {
                    if is_truthy(&lhs) {
                        return Ok(Value::Bool(true));
                    }
                    let rhs = eval_expression(right, env)?;
                    Ok(Value::Bool(is_truthy(&rhs)))
                }
                _ => Err(EvalError::message(format!(
                    "Unknown logical operator '{}'",
                    operator.lexeme
                ))),
            }
        }

        Expr::Assign { name, value } => {
            let value = eval_expression(value, env)?;
            env.set(&name.lexeme, value.clone())?;
            Ok(value)
        }

        Expr::AssignIndex { name, index, value } => {
            let value = eval_expression(value, env)?;
            let index = eval_expression(index, env)?;
            env.set_index(&name.lexeme, &index, value.clone())?;
            Ok(value)
        }

        Expr::AssignAttr {
            name,
            attribute,
            value,
        } => {
            let value = eval_expression(value, env)?;
            env.set_attr(&name.lexeme, &attribute.lexeme, value.clone())?;
            Ok(value)
        }

        Expr::Call { callee, args } => {
            let callee = eval_expression(callee, env)?;
            let mut arguments = Vec::with_capacity(args.len());
            for arg in args {
                arguments.push(eval_expression(arg, env)?);
            }
            call_value(callee, arguments)
        }

        Expr::Get {
            object,
            accessor,
            is_method,
        } => {
            let target = eval_expression(object, env)?;
            eval_get(target, accessor, *is_method, env)
        }

        Expr::List(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval_expression(element, env)?);
            }
            Ok(Value::List(values))
        }

        Expr::HashMap(pairs) => {
            let mut entries = HashMap::with_capacity(pairs.len());
            for (key_expr, value_expr) in pairs {
                let key = eval_expression(key_expr, env)?;
                let value = eval_expression(value_expr, env)?;
                let hash = HashKey::from_value(&key).ok_or_else(|| {
                    EvalError::runtime(
                        &key,
                        format!("Unhashable key of type {}", key.type_name()),
                    )
                })?;
                entries.insert(hash, HashPair { key, value });
            }
            Ok(Value::HashMap(entries))
        }
    }
}

/// Conditionals branch on this: booleans by content, integers iff non-zero,
/// every other kind is false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Integer(v) => *v != 0,
        _ => false,
    }
}

fn eval_binary(operator: &Token, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match operator.kind {
        TokenKind::Plus => match (lhs, rhs) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a.wrapping_add(b))),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (lhs, _) => Err(EvalError::runtime(
                &lhs,
                "Operands of '+' must both be integers or both be strings",
            )),
        },
        TokenKind::Minus => integer_arithmetic(lhs, rhs, "-", |a, b| Ok(a.wrapping_sub(b))),
        TokenKind::Asterisk => integer_arithmetic(lhs, rhs, "*", |a, b| Ok(a.wrapping_mul(b))),
        TokenKind::Slash => integer_arithmetic(lhs, rhs, "/", |a, b| {
            if b == 0 {
                Err("Division by zero")
            } else {
                Ok(a.wrapping_div(b))
            }
        }),
        TokenKind::Modulo => integer_arithmetic(lhs, rhs, "%", |a, b| {
            if b == 0 {
                Err("Modulo by zero")
            } else {
                Ok(a.wrapping_rem(b))
            }
        }),

        TokenKind::Lt => integer_comparison(lhs, rhs, "<", |a, b| a < b),
        TokenKind::LtEq => integer_comparison(lhs, rhs, "<=", |a, b| a <= b),
        TokenKind::Gt => integer_comparison(lhs, rhs, ">", |a, b| a > b),
        TokenKind::GtEq => integer_comparison(lhs, rhs, ">=", |a, b| a >= b),

        TokenKind::Eq => Ok(Value::Bool(values_equal(&lhs, &rhs))),
        TokenKind::NotEq => Ok(Value::Bool(!values_equal(&lhs, &rhs))),

        _ => Err(EvalError::message(format!(
            "Unknown binary operator '{}'",
            operator.lexeme
        ))),
    }
}

fn integer_arithmetic(
    lhs: Value,
    rhs: Value,
    operator: &str,
    apply: fn(i64, i64) -> Result<i64, &'static str>,
) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => match apply(a, b) {
            Ok(result) => Ok(Value::Integer(result)),
            Err(message) => Err(EvalError::runtime(&Value::Integer(a), message)),
        },
        (lhs, _) => Err(EvalError::runtime(
            &lhs,
            format!("Operands of '{}' must be integers", operator),
        )),
    }
}

fn integer_comparison(
    lhs: Value,
    rhs: Value,
    operator: &str,
    compare: fn(i64, i64) -> bool,
) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Bool(compare(a, b))),
        (lhs, _) => Err(EvalError::runtime(
            &lhs,
            format!("Operands of '{}' must be integers", operator),
        )),
    }
}

/// Equality for `==`/`!=`: defined on same-typed integer/string/boolean
/// pairs; every other combination, containers included, compares unequal.
fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => false,
    }
}

/// Dispatch a call on the callee's kind. Indexing arrives here too, since
/// the parser reuses the call node for `container[index]`.
fn call_value(callee: Value, arguments: Vec<Value>) -> Result<Value, EvalError> {
    match callee {
        Value::Function(function) => call_function(&function, arguments),

        Value::Builtin(builtin) => (builtin.func)(&arguments),

        // A struct type is its own constructor
        Value::StructType(def) => Ok(Value::StructInstance(StructInstance {
            def: def.clone(),
            attributes: def.defaults.clone(),
        })),

        Value::List(items) => {
            let index = single_index_argument(&arguments, "List")?;
            match usize::try_from(index).ok().and_then(|i| items.get(i)) {
                Some(value) => Ok(value.clone()),
                None => Err(EvalError::runtime(
                    &Value::Integer(index),
                    "List index out of range",
                )),
            }
        }

        Value::HashMap(entries) => {
            if arguments.len() != 1 {
                return Err(EvalError::message(format!(
                    "Hash map access expects one key, got {}",
                    arguments.len()
                )));
            }
            let key = &arguments[0];
            let hash = HashKey::from_value(key).ok_or_else(|| {
                EvalError::runtime(key, format!("Unhashable key of type {}", key.type_name()))
            })?;
            Ok(entries
                .get(&hash)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null))
        }

        Value::Str(s) => {
            let index = single_index_argument(&arguments, "String")?;
            match usize::try_from(index).ok().and_then(|i| s.as_bytes().get(i)) {
                // One code unit means one byte, returned unchanged
                Some(&byte) => Ok(Value::Str(byte_string(vec![byte]))),
                None => Err(EvalError::runtime(
                    &Value::Integer(index),
                    "String index out of range",
                )),
            }
        }

        other => Err(EvalError::runtime(&other, "Value is not callable")),
    }
}

fn single_index_argument(arguments: &[Value], target: &str) -> Result<i64, EvalError> {
    if arguments.len() != 1 {
        return Err(EvalError::message(format!(
            "{} index expects a single integer, got {} arguments",
            target,
            arguments.len()
        )));
    }
    match &arguments[0] {
        Value::Integer(i) => Ok(*i),
        other => Err(EvalError::runtime(
            other,
            format!("{} indices must be integers", target),
        )),
    }
}

/// Invoke a user function: a fresh frame is chained onto the environment
/// captured at the definition site, never the caller's.
fn call_function(function: &FunctionValue, arguments: Vec<Value>) -> Result<Value, EvalError> {
    let decl = &function.decl;
    if arguments.len() != decl.params.len() {
        return Err(EvalError::message(format!(
            "Function '{}' expects {} arguments, got {}",
            decl.name.lexeme,
            decl.params.len(),
            arguments.len()
        )));
    }

    let frame = Environment::with_parent(function.env.clone());
    for (param, argument) in decl.params.iter().zip(arguments) {
        frame.define(param.lexeme.clone(), argument);
    }

    match eval_block(&decl.body, &frame)? {
        Value::ReturnValue(value) => Ok(*value),
        _ => Ok(Value::Null),
    }
}

/// Attribute or method access. Reading anything but a struct instance is
/// best-effort and yields `Null`.
fn eval_get(
    target: Value,
    accessor: &Expr,
    is_method: bool,
    env: &Rc<Environment>,
) -> Result<Value, EvalError> {
    let Value::StructInstance(instance) = target else {
        return Ok(Value::Null);
    };

    if is_method {
        let Expr::Call { callee, args } = accessor else {
            return Ok(Value::Null);
        };
        let Expr::Variable(name) = callee.as_ref() else {
            return Ok(Value::Null);
        };
        let Some(method) = instance.def.methods.get(&name.lexeme) else {
            return Err(EvalError::message(format!(
                "Undefined method '{}' on struct {}",
                name.lexeme, instance.def.name
            )));
        };

        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            arguments.push(eval_expression(arg, env)?);
        }

        // Wrap the method's closure in a scope that binds `this`
        let this_env = Environment::with_parent(method.env.clone());
        this_env.define(
            "this".to_string(),
            Value::StructInstance(instance.clone()),
        );
        let bound = FunctionValue {
            decl: method.decl.clone(),
            env: this_env,
        };
        return call_function(&bound, arguments);
    }

    match accessor {
        Expr::Variable(name) => Ok(instance
            .attributes
            .get(&name.lexeme)
            .cloned()
            .unwrap_or(Value::Null)),
        _ => Ok(Value::Null),
    }
}
