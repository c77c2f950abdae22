//! The tree-walking evaluator.
//!
//! Holds the circuit being built and drives statement and expression
//! evaluation. The evaluation mode ([`EvalMode`]) is threaded explicitly
//! through every call that might emit a gate or read a variable, rather than
//! intercepted by swapping out the environment's methods, so that
//! contravariant evaluation composes with ordinary nesting.

use crate::builtins;
use crate::environment::{EnvRef, Environment};
use crate::error::{EvalError, EvalResult};
use crate::value::{UserFunction, Value};
use cavy_ir::{Circuit, Gate, Wire};
use cavy_syntax::{BinOp, Expr, Stmt, UnOp};
use std::rc::Rc;

/// Where a gate emission or variable read is headed: straight to the
/// circuit, or collected so a `coevaluate` bracket can uncompute and redo
/// it around a controlled body.
enum EvalMode {
    Normal,
    Contravariant { gates: Vec<Gate>, reads: Vec<(String, Value)> },
}

/// Threads a [`Circuit`] through statement and expression evaluation.
///
/// A fresh `Evaluator` always starts with an empty circuit; there is no
/// global allocator or circuit shared across instances.
pub struct Evaluator {
    pub circuit: Circuit,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Build a root environment with every built-in registered, and run
    /// `stmts` against it.
    pub fn run(&mut self, stmts: &[Stmt]) -> EvalResult<()> {
        let root = Environment::root();
        for name in builtins::NAMES {
            Environment::set(&root, name, Value::Builtin(name));
        }
        for stmt in stmts {
            self.exec_stmt(&root, stmt)?;
        }
        Ok(())
    }

    // ---- gate emission / variable reads, mode-aware ----

    fn emit_gate(&mut self, env: &EnvRef, gate: Gate, mode: &mut EvalMode) -> EvalResult<()> {
        let embedded = Environment::embed_gate(env, gate)?;
        match mode {
            EvalMode::Normal => self.circuit.extend(embedded),
            EvalMode::Contravariant { gates, .. } => gates.extend(embedded),
        }
        Ok(())
    }

    fn read_var(&mut self, env: &EnvRef, name: &str, mode: &mut EvalMode) -> EvalResult<Value> {
        match mode {
            EvalMode::Normal => Environment::get(env, name),
            EvalMode::Contravariant { reads, .. } => {
                let value = Environment::peek(env, name)?;
                reads.push((name.to_string(), value.clone()));
                Ok(value)
            }
        }
    }

    // ---- the uncompute / recompute bracket ----

    /// Evaluate `cond` contravariantly, then run `body` with the resulting
    /// value, bracketed by an uncompute before and a recompute-and-rebind
    /// after. The recompute-and-rebind epilogue runs whether `cond` or
    /// `body` failed or not, so a partial failure never leaves a moved
    /// binding or a half-uncomputed circuit behind.
    fn coevaluate<R>(
        &mut self,
        env: &EnvRef,
        cond: &Expr,
        body: impl FnOnce(&mut Self, Value) -> EvalResult<R>,
    ) -> EvalResult<R> {
        let mut mode = EvalMode::Contravariant { gates: Vec::new(), reads: Vec::new() };
        let outcome = self.eval_expr(env, cond, &mut mode);
        let (collected, reads) = match mode {
            EvalMode::Contravariant { gates, reads } => (gates, reads),
            EvalMode::Normal => unreachable!("coevaluate always runs in contravariant mode"),
        };

        let result = outcome.and_then(|v| {
            for g in collected.iter().rev() {
                let uncompute = g.conjugate()?;
                self.circuit.push(uncompute);
            }
            body(self, v)
        });

        // Epilogue: always recompute and always rebind, even on failure.
        self.circuit.extend(collected);
        for (name, value) in reads {
            Environment::set(env, &name, value);
        }
        result
    }

    // ---- statements ----

    fn exec_stmt(&mut self, env: &EnvRef, stmt: &Stmt) -> EvalResult<()> {
        match stmt {
            Stmt::ExprStmt(expr) => {
                let mut mode = EvalMode::Normal;
                self.eval_expr(env, expr, &mut mode)?;
                Ok(())
            }
            Stmt::PrintStmt(expr) => {
                let mut mode = EvalMode::Normal;
                let value = self.eval_expr(env, expr, &mut mode)?;
                println!("{value}");
                Ok(())
            }
            Stmt::AssnStmt { name, rhs } => {
                let mut mode = EvalMode::Normal;
                let value = self.eval_expr(env, rhs, &mut mode)?;
                if let Value::Measurement(wire) = value {
                    self.circuit.label(name.clone(), wire);
                }
                Environment::set(env, name, value);
                Ok(())
            }
            Stmt::BlockStmt(stmts) => {
                let child = Environment::child(env);
                for s in stmts {
                    self.exec_stmt(&child, s)?;
                }
                Ok(())
            }
            Stmt::IfStmt { cond, then_block, else_block } => {
                self.exec_if(env, cond, then_block, else_block.as_deref())
            }
            Stmt::LetStmt { binder, expr, body } => {
                let binder = binder.clone();
                self.coevaluate(env, expr, |this, v| {
                    let child = Environment::child(env);
                    Environment::set(&child, &binder, v);
                    for s in body {
                        this.exec_stmt(&child, s)?;
                    }
                    Ok(())
                })
            }
            Stmt::ForStmt { binder, iterator, body } => {
                let binder = binder.clone();
                self.coevaluate(env, iterator, |this, v| {
                    let elements = this.sequence_elements(&v)?;
                    for element in elements {
                        let child = Environment::child(env);
                        Environment::set(&child, &binder, element);
                        for s in body {
                            this.exec_stmt(&child, s)?;
                        }
                    }
                    Ok(())
                })
            }
            Stmt::FnStmt { name, params, body } => {
                let func = Value::Function(Rc::new(UserFunction {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    closure: Rc::clone(env),
                }));
                Environment::set(env, name, func);
                Ok(())
            }
        }
    }

    fn exec_if(
        &mut self,
        env: &EnvRef,
        cond: &Expr,
        then_block: &[Stmt],
        else_block: Option<&[Stmt]>,
    ) -> EvalResult<()> {
        self.coevaluate(env, cond, |this, v| match v {
            Value::Qubit(wire) => {
                if else_block.is_some() {
                    return Err(EvalError::TypeError(
                        "an 'if' with a qubit condition cannot have an 'else' branch".into(),
                    ));
                }
                let child = Environment::child_with_control(env, wire);
                for s in then_block {
                    this.exec_stmt(&child, s)?;
                }
                Ok(())
            }
            Value::Bool(true) => {
                let child = Environment::child(env);
                for s in then_block {
                    this.exec_stmt(&child, s)?;
                }
                Ok(())
            }
            Value::Bool(false) => {
                if let Some(else_stmts) = else_block {
                    let child = Environment::child(env);
                    for s in else_stmts {
                        this.exec_stmt(&child, s)?;
                    }
                }
                Ok(())
            }
            other => Err(EvalError::TypeError(format!(
                "invalid condition: expected a boolean or qubit, got {}",
                other.type_name()
            ))),
        })
    }

    fn sequence_elements(&self, v: &Value) -> EvalResult<Vec<Value>> {
        match v {
            Value::Range(lo, hi) => Ok((*lo..*hi).map(Value::Int).collect()),
            Value::Array(items) => Ok(items.clone()),
            other => Err(EvalError::TypeError(format!(
                "cannot iterate over a {}",
                other.type_name()
            ))),
        }
    }

    // ---- expressions ----

    fn eval_expr(&mut self, env: &EnvRef, expr: &Expr, mode: &mut EvalMode) -> EvalResult<Value> {
        match expr {
            Expr::Literal(tok) => Ok(literal_value(tok)),
            Expr::Group(inner) => self.eval_expr(env, inner, mode),
            Expr::Variable { name, .. } => self.read_var(env, name, mode),
            Expr::UnOp { op, right, .. } => self.eval_unop(env, *op, right, mode),
            Expr::BinOp { left, op, right, .. } => self.eval_binop(env, left, *op, right, mode),
            Expr::ExtensionalArray { items, .. } => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(env, item, mode)?);
                }
                Ok(Value::Array(values))
            }
            Expr::IntensionalArray { item, reps, .. } => {
                let reps = self.eval_expr(env, reps, mode)?;
                let reps = reps
                    .as_int()
                    .ok_or_else(|| EvalError::TypeError("array repetition count must be an integer".into()))?;
                let mut values = Vec::with_capacity(reps.max(0) as usize);
                for _ in 0..reps {
                    values.push(self.eval_expr(env, item, mode)?);
                }
                Ok(Value::Array(values))
            }
            Expr::Index { root, index, .. } => {
                let root_value = self.eval_expr(env, root, mode)?;
                let index_value = self.eval_expr(env, index, mode)?;
                let idx = index_value
                    .as_int()
                    .ok_or_else(|| EvalError::TypeError("array index must be an integer".into()))?;
                match root_value {
                    Value::Array(items) => {
                        let idx = usize::try_from(idx)
                            .map_err(|_| EvalError::TypeError("array index out of bounds".into()))?;
                        items
                            .get(idx)
                            .cloned()
                            .ok_or_else(|| EvalError::TypeError("array index out of bounds".into()))
                    }
                    other => Err(EvalError::TypeError(format!("cannot index a {}", other.type_name()))),
                }
            }
            Expr::Call { callee, args, .. } => {
                let callee_value = self.eval_expr(env, callee, mode)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for a in args {
                    arg_values.push(self.eval_expr(env, a, mode)?);
                }
                self.call(env, callee_value, arg_values, mode)
            }
        }
    }

    fn eval_unop(&mut self, env: &EnvRef, op: UnOp, right: &Expr, mode: &mut EvalMode) -> EvalResult<Value> {
        let value = self.eval_expr(env, right, mode)?;
        match op {
            UnOp::Not => match value {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                Value::Qubit(wire) => {
                    self.emit_gate(env, Gate::Not(wire), mode)?;
                    Ok(Value::Qubit(wire))
                }
                other => Err(EvalError::TypeError(format!("cannot apply '~' to a {}", other.type_name()))),
            },
            UnOp::Linearize => match value {
                Value::Bool(b) => {
                    let wire = Environment::alloc_qubit(env);
                    if b {
                        self.emit_gate(env, Gate::Not(wire), mode)?;
                    }
                    Ok(Value::Qubit(wire))
                }
                _ => Err(EvalError::TypeError("value cannot be linearised".into())),
            },
            UnOp::Delinearize => match value {
                Value::Qubit(wire) => {
                    self.emit_gate(env, Gate::StrongMeasurement(wire), mode)?;
                    Ok(Value::Measurement(wire))
                }
                _ => Err(EvalError::TypeError("value cannot be delinearised".into())),
            },
        }
    }

    fn eval_binop(
        &mut self,
        env: &EnvRef,
        left: &Expr,
        op: BinOp,
        right: &Expr,
        mode: &mut EvalMode,
    ) -> EvalResult<Value> {
        let l = self.eval_expr(env, left, mode)?;
        let r = self.eval_expr(env, right, mode)?;
        match op {
            BinOp::Eq => Ok(Value::Bool(values_equal(&l, &r)?)),
            BinOp::NotEq => Ok(Value::Bool(!values_equal(&l, &r)?)),
            BinOp::Range => {
                let (lo, hi) = (int_operand(&l)?, int_operand(&r)?);
                Ok(Value::Range(lo, hi))
            }
            BinOp::Add => Ok(Value::Int(int_operand(&l)? + int_operand(&r)?)),
            BinOp::Sub => Ok(Value::Int(int_operand(&l)? - int_operand(&r)?)),
            BinOp::Mul => Ok(Value::Int(int_operand(&l)? * int_operand(&r)?)),
            BinOp::Mod => Ok(Value::Int(int_operand(&l)? % int_operand(&r)?)),
            BinOp::Pow => {
                let (base, exp) = (int_operand(&l)?, int_operand(&r)?);
                let exp = u32::try_from(exp)
                    .map_err(|_| EvalError::TypeError("'^' exponent must be non-negative".into()))?;
                Ok(Value::Int(base.pow(exp)))
            }
        }
    }

    fn call(&mut self, env: &EnvRef, callee: Value, args: Vec<Value>, mode: &mut EvalMode) -> EvalResult<Value> {
        match callee {
            Value::Builtin(name) => self.call_builtin(env, name, args, mode),
            Value::Function(func) => {
                if args.len() != func.params.len() {
                    return Err(EvalError::ArityError { expected: func.params.len(), actual: args.len() });
                }
                let call_env = Environment::child(&func.closure);
                for (param, value) in func.params.iter().zip(args) {
                    Environment::set(&call_env, param, value);
                }
                self.exec_function_body(&call_env, &func.body)
            }
            other => Err(EvalError::TypeError(format!("{} is not callable", other.type_name()))),
        }
    }

    /// Run a function body to completion. The value of a trailing
    /// expression-statement becomes the call's result; a body with no
    /// trailing expression yields `0`, since this language has no explicit
    /// `return`.
    fn exec_function_body(&mut self, env: &EnvRef, body: &[Stmt]) -> EvalResult<Value> {
        let mut result = Value::Int(0);
        for (i, stmt) in body.iter().enumerate() {
            if i + 1 == body.len() {
                if let Stmt::ExprStmt(expr) = stmt {
                    let mut mode = EvalMode::Normal;
                    result = self.eval_expr(env, expr, &mut mode)?;
                    continue;
                }
            }
            self.exec_stmt(env, stmt)?;
        }
        Ok(result)
    }

    fn call_builtin(
        &mut self,
        env: &EnvRef,
        name: &'static str,
        mut args: Vec<Value>,
        mode: &mut EvalMode,
    ) -> EvalResult<Value> {
        let expected = builtins::arity(name);
        if args.len() != expected {
            return Err(EvalError::ArityError { expected, actual: args.len() });
        }
        match name {
            "qubit" => Ok(Value::Qubit(Environment::alloc_qubit(env))),
            "split" => self.vectorized_gate(env, args.remove(0), name, Gate::Hadamard, mode),
            "flip" => self.vectorized_gate(env, args.remove(0), name, Gate::Z, mode),
            "not" => self.vectorized_gate(env, args.remove(0), name, Gate::Not, mode),
            "debug" => {
                let value = args.remove(0);
                println!("debug: {value}");
                Ok(value)
            }
            _ => unreachable!("unknown builtin '{name}'"),
        }
    }

    fn vectorized_gate(
        &mut self,
        env: &EnvRef,
        value: Value,
        name: &'static str,
        ctor: fn(Wire) -> Gate,
        mode: &mut EvalMode,
    ) -> EvalResult<Value> {
        match value {
            Value::Qubit(wire) => {
                self.emit_gate(env, ctor(wire), mode)?;
                Ok(Value::Qubit(wire))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.vectorized_gate(env, item, name, ctor, mode)?);
                }
                Ok(Value::Array(out))
            }
            other => Err(EvalError::TypeError(format!(
                "'{name}' expects a qubit or an array of qubits, got {}",
                other.type_name()
            ))),
        }
    }
}

fn literal_value(tok: &cavy_syntax::Token) -> Value {
    match &tok.kind {
        cavy_syntax::TokenKind::Int(n) => Value::Int(*n),
        cavy_syntax::TokenKind::Bool(b) => Value::Bool(*b),
        other => unreachable!("non-literal token in Literal expression: {other:?}"),
    }
}

fn int_operand(v: &Value) -> EvalResult<i64> {
    v.as_int()
        .ok_or_else(|| EvalError::TypeError(format!("expected an integer, got {}", v.type_name())))
}

fn values_equal(l: &Value, r: &Value) -> EvalResult<bool> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Qubit(a), Value::Qubit(b)) | (Value::Measurement(a), Value::Measurement(b)) => Ok(a == b),
        (a, b) => Err(EvalError::TypeError(format!(
            "cannot compare {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}
