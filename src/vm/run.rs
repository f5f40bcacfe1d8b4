use std::rc::Rc;

use crate::bytecode::OpCode;
use crate::value::Value;
use crate::vm::{InterpretResult, RuntimeError, VM};

impl VM {
    /// The opcode dispatch loop: fetch, advance, match. Runs until `Return`
    /// or a runtime error; there is no incremental step/yield API and no
    /// recovery from a runtime error once one is raised.
    pub(super) fn run(&mut self) -> InterpretResult {
        loop {
            let byte = self.read_byte();
            let op = match OpCode::from_byte(byte) {
                Some(op) => op,
                None => unreachable!("compiler only ever writes bytes it produced from OpCode"),
            };

            let outcome = self.dispatch(op);
            match outcome {
                Ok(Some(result)) => return result,
                Ok(None) => {}
                Err(error) => {
                    report_runtime_error(&error);
                    return InterpretResult::RuntimeError;
                }
            }
        }
    }

    /// Executes one instruction. `Ok(Some(result))` ends the loop (only
    /// `Return` does this); `Ok(None)` continues; `Err` is a runtime error.
    fn dispatch(&mut self, op: OpCode) -> Result<Option<InterpretResult>, RuntimeError> {
        match op {
            OpCode::Constant => {
                let value = self.read_constant();
                self.push(value);
            }
            OpCode::Nil => self.push(Value::Nil),
            OpCode::True => self.push(Value::Bool(true)),
            OpCode::False => self.push(Value::Bool(false)),
            OpCode::Pop => {
                self.pop();
            }
            OpCode::GetLocal => {
                let slot = self.read_byte();
                self.push(self.stack[slot as usize].clone());
            }
            OpCode::SetLocal => {
                let slot = self.read_byte();
                self.stack[slot as usize] = self.peek(0).clone();
            }
            OpCode::GetGlobal => {
                let name = self.read_global_name();
                match self.globals.get(&name) {
                    Some(value) => {
                        let value = value.clone();
                        self.push(value);
                    }
                    None => return Err(self.runtime_error(format!("Undefined variable '{}'.", name))),
                }
            }
            OpCode::DefineGlobal => {
                let name = self.read_global_name();
                let value = self.pop();
                // Redefining an existing global is permitted, per the reference
                // language's semantics — see DESIGN.md.
                self.globals.set(Rc::from(name.as_str()), value);
            }
            OpCode::SetGlobal => {
                let name = self.read_global_name();
                // Assignment is an expression: the value stays on the stack.
                let value = self.peek(0).clone();
                if self.globals.set(Rc::from(name.as_str()), value) {
                    self.globals.delete(&name);
                    return Err(self.runtime_error(format!("Undefined variable '{}'.", name)));
                }
            }
            OpCode::Add => self.add()?,
            OpCode::Subtract => self.numeric_binary_op(|a, b| a - b)?,
            OpCode::Multiply => self.numeric_binary_op(|a, b| a * b)?,
            OpCode::Divide => self.numeric_binary_op(|a, b| a / b)?,
            OpCode::Less => self.comparison_op(|a, b| a < b)?,
            OpCode::Greater => self.comparison_op(|a, b| a > b)?,
            OpCode::Equal => {
                let b = self.pop();
                let a = self.pop();
                self.push(Value::Bool(a == b));
            }
            OpCode::Not => {
                let value = self.pop();
                self.push(Value::Bool(value.is_falsey()));
            }
            OpCode::Negate => {
                let value = self.peek(0);
                match value {
                    Value::Number(n) => {
                        let n = *n;
                        self.pop();
                        self.push(Value::Number(-n));
                    }
                    _ => return Err(self.runtime_error("Operand must be a number.")),
                }
            }
            OpCode::Print => {
                let value = self.pop();
                println!("{}", value.display_plain());
            }
            OpCode::Jump => {
                let offset = self.read_short();
                self.ip += offset as usize;
            }
            OpCode::JumpIfFalse => {
                let offset = self.read_short();
                if self.peek(0).is_falsey() {
                    self.ip += offset as usize;
                }
            }
            OpCode::Loop => {
                let offset = self.read_short();
                self.ip -= offset as usize;
            }
            OpCode::Return => return Ok(Some(InterpretResult::Ok)),
        }

        Ok(None)
    }

    /// `DefineGlobal`/`GetGlobal`/`SetGlobal` all carry a one-byte constant
    /// index pointing at the variable's name in the constant pool.
    fn read_global_name(&mut self) -> String {
        match self.read_constant() {
            Value::Str(s) => s.to_string(),
            _ => unreachable!("the compiler only ever emits a string constant for a global's name"),
        }
    }

    /// `+` is overloaded: numeric addition, or string concatenation when
    /// both operands are strings. Any other combination is a runtime error.
    fn add(&mut self) -> Result<(), RuntimeError> {
        match (self.peek(1), self.peek(0)) {
            (Value::Number(_), Value::Number(_)) => self.numeric_binary_op(|a, b| a + b),
            (Value::Str(_), Value::Str(_)) => {
                let b = self.pop();
                let a = self.pop();
                let (a, b) = match (a, b) {
                    (Value::Str(a), Value::Str(b)) => (a, b),
                    _ => unreachable!(),
                };
                let mut concatenated = String::with_capacity(a.len() + b.len());
                concatenated.push_str(&a);
                concatenated.push_str(&b);
                self.push(Value::Str(Rc::from(concatenated)));
                Ok(())
            }
            _ => Err(self.runtime_error("Operands must be two numbers or two strings.")),
        }
    }

    fn numeric_binary_op(&mut self, op: impl Fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
        match (self.peek(1), self.peek(0)) {
            (Value::Number(_), Value::Number(_)) => {
                let b = self.pop();
                let a = self.pop();
                let (a, b) = match (a, b) {
                    (Value::Number(a), Value::Number(b)) => (a, b),
                    _ => unreachable!(),
                };
                self.push(Value::Number(op(a, b)));
                Ok(())
            }
            _ => Err(self.runtime_error("Operands must be numbers.")),
        }
    }

    fn comparison_op(&mut self, op: impl Fn(f64, f64) -> bool) -> Result<(), RuntimeError> {
        match (self.peek(1), self.peek(0)) {
            (Value::Number(_), Value::Number(_)) => {
                let b = self.pop();
                let a = self.pop();
                let (a, b) = match (a, b) {
                    (Value::Number(a), Value::Number(b)) => (a, b),
                    _ => unreachable!(),
                };
                self.push(Value::Bool(op(a, b)));
                Ok(())
            }
            _ => Err(self.runtime_error("Operands must be numbers.")),
        }
    }
}

fn report_runtime_error(error: &RuntimeError) {
    crate::errors::report_runtime_error(error.line, &error.message);
}
