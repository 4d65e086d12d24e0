//! Expression lowering: literals, loads, operators, and the two recognized
//! callables, each producing a [`Value`] — an IR operand paired with its
//! resolved type.
//!
//! Types are tracked structurally as expressions recurse (a literal's type
//! is immediate, an operator's result type follows from its already-checked
//! operand types), mirroring the type rules the analyzer already enforced.
//! The one place the AST alone can't recover a type — a `VarDecl` with no
//! annotation — reads the answer straight from [`coal_sem::TypeTable`]
//! instead of re-deriving it (see `expr_ty`).

use coal_par::{BinOp, Expr, ExprKind, UnOp};
use coal_sem::NamedType;
use coal_util::{DiagnosticBuilder, DiagnosticCode, Span, Symbol};

use crate::error::{EmitError, Result};
use crate::function::FunctionEmitter;
use crate::types::ir_type;

/// One lowered operand: its IR spelling and resolved Coal type.
pub(crate) struct Value {
    pub(crate) operand: String,
    pub(crate) ty: NamedType,
}

impl<'m, 't, 'h> FunctionEmitter<'m, 't, 'h> {
    /// The authoritative resolved type of `e`, read from the analyzer's
    /// `TypeTable` — used where the AST alone can't recover a type (a
    /// `VarDecl` with no annotation takes its type from its initializer
    /// expression this way). Expression lowering itself tracks types
    /// structurally as it recurses, since every sub-expression's `Value`
    /// already carries the type its own lowering resolved.
    pub(crate) fn expr_ty(&self, e: &Expr) -> Result<NamedType> {
        self.table.expr_type(e.id).ok_or(EmitError::MissingExprType)
    }

    pub(crate) fn lower_expr(&mut self, e: &Expr) -> Result<Value> {
        match &*e.kind {
            ExprKind::IntLit(v) => Ok(Value { operand: v.to_string(), ty: NamedType::Int }),
            ExprKind::FloatLit(v) => Ok(Value { operand: format_float(*v), ty: NamedType::Float }),
            ExprKind::BoolLit(v) => Ok(Value {
                operand: if *v { "1".to_string() } else { "0".to_string() },
                ty: NamedType::Bool,
            }),
            ExprKind::CharLit(c) => Ok(Value { operand: (*c as u32).to_string(), ty: NamedType::Char }),
            ExprKind::StringLit(sym) => self.lower_string_literal(*sym),
            ExprKind::Ident { name } => self.lower_ident(*name),
            ExprKind::Unary { op, expr } => self.lower_unary(*op, expr),
            ExprKind::Binary { op, left, right } => self.lower_binary(*op, left, right),
            ExprKind::Call { callee, args } => self.lower_call(*callee, args),
            ExprKind::MethodCall { receiver, method, args } => self.lower_method_call(receiver, *method, args),
        }
    }

    fn lower_string_literal(&mut self, sym: Symbol) -> Result<Value> {
        let text = sym.as_str();
        let idx = self.module.intern_string(text);
        let k = self.module.string_byte_len(idx);
        let len = k - 1;
        let ptr = self.fresh_ssa();
        self.emit(format!(
            "{ptr} = getelementptr inbounds [{k} x i8], ptr @.str.{idx}, i64 0, i64 0"
        ));
        let operand = self.pack_string(&ptr, &len.to_string())?;
        Ok(Value { operand, ty: NamedType::String })
    }

    /// Packs a `ptr`/length pair into the `{ ptr, i32 }` aggregate value via
    /// two `insertvalue`s against an `undef` seed.
    fn pack_string(&mut self, ptr_operand: &str, len_operand: &str) -> Result<String> {
        let t0 = self.fresh_ssa();
        self.emit(format!("{t0} = insertvalue {{ ptr, i32 }} undef, ptr {ptr_operand}, 0"));
        let t1 = self.fresh_ssa();
        self.emit(format!("{t1} = insertvalue {{ ptr, i32 }} {t0}, i32 {len_operand}, 1"));
        Ok(t1)
    }

    fn unpack_string_ptr(&mut self, string_operand: &str) -> String {
        let ptr = self.fresh_ssa();
        self.emit(format!("{ptr} = extractvalue {{ ptr, i32 }} {string_operand}, 0"));
        ptr
    }

    fn unpack_string_len(&mut self, string_operand: &str) -> String {
        let len = self.fresh_ssa();
        self.emit(format!("{len} = extractvalue {{ ptr, i32 }} {string_operand}, 1"));
        len
    }

    fn lower_ident(&mut self, name: Symbol) -> Result<Value> {
        let (slot, ty) = self
            .resolve_local(name)
            .ok_or_else(|| EmitError::Internal(format!("no slot for local `{name}`")))?;
        let loaded = self.fresh_ssa();
        self.emit(format!("{loaded} = load {}, ptr {slot}", ir_type(ty)));
        Ok(Value { operand: loaded, ty })
    }

    fn lower_unary(&mut self, op: UnOp, expr: &Expr) -> Result<Value> {
        let operand = self.lower_expr(expr)?;
        match op {
            UnOp::Not => {
                let result = self.fresh_ssa();
                self.emit(format!("{result} = xor i1 {}, true", operand.operand));
                Ok(Value { operand: result, ty: NamedType::Bool })
            }
        }
    }

    fn lower_binary(&mut self, op: BinOp, left: &Expr, right: &Expr) -> Result<Value> {
        match op {
            BinOp::And => self.lower_short_circuit(true, left, right),
            BinOp::Or => self.lower_short_circuit(false, left, right),
            _ => {
                let lhs = self.lower_expr(left)?;
                let rhs = self.lower_expr(right)?;
                match op {
                    BinOp::Eq | BinOp::Ne => self.lower_comparison(op, lhs, rhs),
                    BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => self.lower_comparison(op, lhs, rhs),
                    BinOp::Add if lhs.ty == NamedType::String => self.lower_string_concat(lhs, rhs),
                    _ => self.lower_arithmetic(op, lhs, rhs),
                }
            }
        }
    }

    /// `&&`/`||` with explicit basic blocks and a `phi i1` join. `is_and`
    /// selects which operand value short-circuits without evaluating the
    /// right-hand side.
    fn lower_short_circuit(&mut self, is_and: bool, left: &Expr, right: &Expr) -> Result<Value> {
        let lhs = self.lower_expr(left)?;
        let (prefix, rhs_label, short_label, short_value) = if is_and {
            ("and", "and.rhs", "and.false", "0")
        } else {
            ("or", "or.rhs", "or.true", "1")
        };
        let rhs_block = self.fresh_label(rhs_label);
        let short_block = self.fresh_label(short_label);
        let end_block = self.fresh_label(&format!("{prefix}.end"));

        if is_and {
            self.emit(format!(
                "br i1 {}, label %{rhs_block}, label %{short_block}",
                lhs.operand
            ));
        } else {
            self.emit(format!(
                "br i1 {}, label %{short_block}, label %{rhs_block}",
                lhs.operand
            ));
        }

        self.emit_label(&rhs_block);
        let rhs = self.lower_expr(right)?;
        self.emit(format!("br label %{end_block}"));

        self.emit_label(&short_block);
        self.emit(format!("br label %{end_block}"));

        self.emit_label(&end_block);
        let result = self.fresh_ssa();
        self.emit(format!(
            "{result} = phi i1 [ {short_value}, %{short_block} ], [ {}, %{rhs_block} ]",
            rhs.operand
        ));
        Ok(Value { operand: result, ty: NamedType::Bool })
    }

    fn lower_comparison(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Result<Value> {
        if lhs.ty == NamedType::String {
            let lp = self.unpack_string_ptr(&lhs.operand);
            let rp = self.unpack_string_ptr(&rhs.operand);
            let cond = match op {
                BinOp::Eq => "eq",
                BinOp::Ne => "ne",
                _ => return Err(EmitError::UnsupportedOperator(op_text(op).to_string(), "string".to_string())),
            };
            let result = self.fresh_ssa();
            self.emit(format!("{result} = icmp {cond} ptr {lp}, {rp}"));
            return Ok(Value { operand: result, ty: NamedType::Bool });
        }

        let result = self.fresh_ssa();
        if lhs.ty == NamedType::Float {
            let cond = match op {
                BinOp::Eq => "oeq",
                BinOp::Ne => "one",
                BinOp::Lt => "olt",
                BinOp::Le => "ole",
                BinOp::Gt => "ogt",
                BinOp::Ge => "oge",
                _ => unreachable!("only comparison operators reach lower_comparison"),
            };
            self.emit(format!("{result} = fcmp {cond} double {}, {}", lhs.operand, rhs.operand));
        } else {
            let cond = match op {
                BinOp::Eq => "eq",
                BinOp::Ne => "ne",
                BinOp::Lt => "slt",
                BinOp::Le => "sle",
                BinOp::Gt => "sgt",
                BinOp::Ge => "sge",
                _ => unreachable!("only comparison operators reach lower_comparison"),
            };
            self.emit(format!("{result} = icmp {cond} {} {}, {}", ir_type(lhs.ty), lhs.operand, rhs.operand));
        }
        Ok(Value { operand: result, ty: NamedType::Bool })
    }

    fn lower_arithmetic(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Result<Value> {
        if op == BinOp::Pow {
            let was_int = lhs.ty == NamedType::Int;
            let lf = self.to_double(lhs);
            let rf = self.to_double(rhs);
            let result = self.fresh_ssa();
            self.emit(format!(
                "{result} = call double @llvm.pow.f64(double {}, double {})",
                lf.operand, rf.operand
            ));
            if was_int {
                let narrowed = self.fresh_ssa();
                self.emit(format!("{narrowed} = fptosi double {result} to i32"));
                return Ok(Value { operand: narrowed, ty: NamedType::Int });
            }
            return Ok(Value { operand: result, ty: NamedType::Float });
        }

        match lhs.ty {
            NamedType::Int => {
                let instr = match op {
                    BinOp::Add => "add",
                    BinOp::Sub => "sub",
                    BinOp::Mul => "mul",
                    BinOp::Div => "sdiv",
                    BinOp::Mod => "srem",
                    _ => return Err(EmitError::UnsupportedOperator(op_text(op).to_string(), "i32".to_string())),
                };
                let result = self.fresh_ssa();
                self.emit(format!("{result} = {instr} i32 {}, {}", lhs.operand, rhs.operand));
                Ok(Value { operand: result, ty: NamedType::Int })
            }
            NamedType::Float => {
                let instr = match op {
                    BinOp::Add => "fadd",
                    BinOp::Sub => "fsub",
                    BinOp::Mul => "fmul",
                    BinOp::Div => "fdiv",
                    _ => return Err(EmitError::UnsupportedOperator(op_text(op).to_string(), "double".to_string())),
                };
                let result = self.fresh_ssa();
                self.emit(format!("{result} = {instr} double {}, {}", lhs.operand, rhs.operand));
                Ok(Value { operand: result, ty: NamedType::Float })
            }
            other => Err(EmitError::UnsupportedOperator(op_text(op).to_string(), ir_type(other).to_string())),
        }
    }

    fn to_double(&mut self, v: Value) -> Value {
        if v.ty == NamedType::Float {
            return v;
        }
        let result = self.fresh_ssa();
        self.emit(format!("{result} = sitofp i32 {} to double", v.operand));
        Value { operand: result, ty: NamedType::Float }
    }

    fn lower_string_concat(&mut self, lhs: Value, rhs: Value) -> Result<Value> {
        let lp = self.unpack_string_ptr(&lhs.operand);
        let llen = self.unpack_string_len(&lhs.operand);
        let rp = self.unpack_string_ptr(&rhs.operand);
        let rlen = self.unpack_string_len(&rhs.operand);

        let total = self.fresh_ssa();
        self.emit(format!("{total} = add i32 {llen}, {rlen}"));
        let total64 = self.fresh_ssa();
        self.emit(format!("{total64} = zext i32 {total} to i64"));
        let alloc_size = self.fresh_ssa();
        self.emit(format!("{alloc_size} = add i64 {total64}, 1"));
        let new_ptr = self.fresh_ssa();
        self.emit(format!("{new_ptr} = call ptr @malloc(i64 {alloc_size})"));

        let llen64 = self.fresh_ssa();
        self.emit(format!("{llen64} = zext i32 {llen} to i64"));
        self.emit(format!("call ptr @memcpy(ptr {new_ptr}, ptr {lp}, i64 {llen64})"));

        let tail_ptr = self.fresh_ssa();
        self.emit(format!("{tail_ptr} = getelementptr inbounds i8, ptr {new_ptr}, i64 {llen64}"));
        let rlen64 = self.fresh_ssa();
        self.emit(format!("{rlen64} = zext i32 {rlen} to i64"));
        self.emit(format!("call ptr @memcpy(ptr {tail_ptr}, ptr {rp}, i64 {rlen64})"));

        let nul_ptr = self.fresh_ssa();
        self.emit(format!("{nul_ptr} = getelementptr inbounds i8, ptr {new_ptr}, i64 {total64}"));
        self.emit(format!("store i8 0, ptr {nul_ptr}"));

        let packed = self.pack_string(&new_ptr, &total)?;
        Ok(Value { operand: packed, ty: NamedType::String })
    }

    fn lower_call(&mut self, callee: Symbol, args: &[Expr]) -> Result<Value> {
        let trailing_newline = match callee.as_str() {
            "println" => true,
            "print" => false,
            other => return Err(EmitError::UnknownFunction(other.to_string())),
        };
        let arg = self.lower_expr(&args[0])?;
        let (fmt, printf_arg) = match arg.ty {
            NamedType::Bool | NamedType::Char => {
                let widened = self.fresh_ssa();
                self.emit(format!("{widened} = zext {} {} to i32", ir_type(arg.ty), arg.operand));
                (if trailing_newline { "%d\n" } else { "%d" }, format!("i32 {widened}"))
            }
            NamedType::Int => (if trailing_newline { "%d\n" } else { "%d" }, format!("i32 {}", arg.operand)),
            NamedType::Float => (if trailing_newline { "%f\n" } else { "%f" }, format!("double {}", arg.operand)),
            NamedType::String => {
                let ptr = self.unpack_string_ptr(&arg.operand);
                (if trailing_newline { "%s\n" } else { "%s" }, format!("ptr {ptr}"))
            }
        };
        let fmt_ptr = self.format_string_ptr(fmt);
        let result = self.fresh_ssa();
        self.emit(format!("{result} = call i32 (ptr, ...) @printf(ptr {fmt_ptr}, {printf_arg})"));
        Ok(Value { operand: result, ty: NamedType::Int })
    }

    fn format_string_ptr(&mut self, text: &str) -> String {
        let idx = self.module.intern_string(text);
        let k = self.module.string_byte_len(idx);
        let ptr = self.fresh_ssa();
        self.emit(format!(
            "{ptr} = getelementptr inbounds [{k} x i8], ptr @.str.{idx}, i64 0, i64 0"
        ));
        ptr
    }

    fn lower_method_call(&mut self, receiver: &Expr, method: Symbol, _args: &[Expr]) -> Result<Value> {
        let recv = self.lower_expr(receiver)?;
        let literal_text = match &*receiver.kind {
            ExprKind::StringLit(sym) => Some(sym.as_str()),
            _ => None,
        };
        match method.as_str() {
            "toString" => self.lower_to_string(recv),
            "toInt" => self.lower_to_int(recv, literal_text, receiver.span),
            "toFloat" => self.lower_to_float(recv, literal_text, receiver.span),
            other => Err(EmitError::UnknownMethod(other.to_string())),
        }
    }

    /// Reports that a string literal can't be parsed as the target of
    /// `.toInt()`/`.toFloat()`, then returns the sentinel error that tells
    /// the caller a diagnostic has already been emitted.
    fn unsupported_conversion(&self, text: &str, target: &str, span: Span) -> EmitError {
        DiagnosticBuilder::error(format!("`{text}` cannot be converted to `{target}`"))
            .code(DiagnosticCode::UNSUPPORTED_CONVERSION)
            .span(span)
            .emit(self.handler);
        EmitError::Diagnosed
    }

    fn lower_to_string(&mut self, recv: Value) -> Result<Value> {
        if recv.ty == NamedType::String {
            return Ok(recv);
        }
        let buf = self.fresh_ssa();
        self.emit(format!("{buf} = alloca [64 x i8]"));
        let buf_ptr = self.fresh_ssa();
        self.emit(format!("{buf_ptr} = getelementptr inbounds [64 x i8], ptr {buf}, i64 0, i64 0"));

        let (fmt, printf_arg) = match recv.ty {
            NamedType::Bool | NamedType::Char => {
                let widened = self.fresh_ssa();
                self.emit(format!("{widened} = zext {} {} to i32", ir_type(recv.ty), recv.operand));
                ("%d", format!("i32 {widened}"))
            }
            NamedType::Int => ("%d", format!("i32 {}", recv.operand)),
            NamedType::Float => ("%f", format!("double {}", recv.operand)),
            NamedType::String => unreachable!("handled above"),
        };
        let fmt_ptr = self.format_string_ptr(fmt);
        let written = self.fresh_ssa();
        self.emit(format!(
            "{written} = call i32 (ptr, i64, ptr, ...) @snprintf(ptr {buf_ptr}, i64 64, ptr {fmt_ptr}, {printf_arg})"
        ));
        let packed = self.pack_string(&buf_ptr, &written)?;
        Ok(Value { operand: packed, ty: NamedType::String })
    }

    fn lower_to_int(&mut self, recv: Value, literal_text: Option<&str>, span: Span) -> Result<Value> {
        match recv.ty {
            NamedType::Int => Ok(recv),
            NamedType::Bool | NamedType::Char => {
                let result = self.fresh_ssa();
                self.emit(format!("{result} = zext {} {} to i32", ir_type(recv.ty), recv.operand));
                Ok(Value { operand: result, ty: NamedType::Int })
            }
            NamedType::Float => {
                let result = self.fresh_ssa();
                self.emit(format!("{result} = fptosi double {} to i32", recv.operand));
                Ok(Value { operand: result, ty: NamedType::Int })
            }
            NamedType::String => {
                if let Some(text) = literal_text {
                    let parsed: i32 = text
                        .trim()
                        .parse()
                        .map_err(|_| self.unsupported_conversion(text, "int", span))?;
                    return Ok(Value { operand: parsed.to_string(), ty: NamedType::Int });
                }
                let ptr = self.unpack_string_ptr(&recv.operand);
                let parsed64 = self.fresh_ssa();
                self.emit(format!("{parsed64} = call i64 @strtol(ptr {ptr}, ptr null, i32 10)"));
                let result = self.fresh_ssa();
                self.emit(format!("{result} = trunc i64 {parsed64} to i32"));
                Ok(Value { operand: result, ty: NamedType::Int })
            }
        }
    }

    fn lower_to_float(&mut self, recv: Value, literal_text: Option<&str>, span: Span) -> Result<Value> {
        match recv.ty {
            NamedType::Float => Ok(recv),
            NamedType::Int => {
                let result = self.fresh_ssa();
                self.emit(format!("{result} = sitofp i32 {} to double", recv.operand));
                Ok(Value { operand: result, ty: NamedType::Float })
            }
            NamedType::Bool | NamedType::Char => {
                let widened = self.fresh_ssa();
                self.emit(format!("{widened} = zext {} {} to i32", ir_type(recv.ty), recv.operand));
                let result = self.fresh_ssa();
                self.emit(format!("{result} = sitofp i32 {widened} to double"));
                Ok(Value { operand: result, ty: NamedType::Float })
            }
            NamedType::String => {
                if let Some(text) = literal_text {
                    let parsed: f64 = text
                        .trim()
                        .parse()
                        .map_err(|_| self.unsupported_conversion(text, "float", span))?;
                    return Ok(Value { operand: format_float(parsed), ty: NamedType::Float });
                }
                let ptr = self.unpack_string_ptr(&recv.operand);
                let result = self.fresh_ssa();
                self.emit(format!("{result} = call double @strtod(ptr {ptr}, ptr null)"));
                Ok(Value { operand: result, ty: NamedType::Float })
            }
        }
    }
}

fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn op_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Pow => "^",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
    }
}
