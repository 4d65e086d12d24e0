//! Hand-rolled, write-only dumps for the `--emit-*` debugging flags.
//!
//! None of these round-trip: they exist so a human (or a test) can read an
//! intermediate stage, not so the driver can read them back — so there's no
//! need for a `serde` dependency here.

use coal_lex::Token;
use coal_par::{Block, Decl, Expr, ExprKind, FnDecl, IfStmt, Program, Stmt, TypeRef, VarDecl, WhileStmt};

/// One line per token: `line:col  KIND  'lexeme'`.
pub fn tokens_text(tokens: &[Token], source: &str) -> String {
    let mut out = String::new();
    for tok in tokens {
        let lexeme = tok.span.text(source);
        out.push_str(&format!(
            "{}:{}  {}  '{}'\n",
            tok.span.line,
            tok.span.column,
            tok.kind.name(),
            lexeme
        ));
    }
    out
}

/// The same token sequence as a JSON array of `{pos, kind, lexeme}`.
pub fn tokens_json(tokens: &[Token], source: &str) -> String {
    let mut out = String::from("[\n");
    for (i, tok) in tokens.iter().enumerate() {
        let lexeme = tok.span.text(source);
        out.push_str(&format!(
            "  {{\"pos\": [{}, {}], \"kind\": \"{}\", \"lexeme\": \"{}\"}}",
            tok.span.line,
            tok.span.column,
            tok.kind.name(),
            escape(lexeme)
        ));
        if i + 1 < tokens.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push(']');
    out
}

pub fn ast_json(program: &Program) -> String {
    let decls: Vec<String> = program.decls.iter().map(decl_json).collect();
    format!("{{\"decls\": [{}]}}", decls.join(", "))
}

fn decl_json(decl: &Decl) -> String {
    match decl {
        Decl::FnDecl(f) => fn_decl_json(f),
    }
}

fn fn_decl_json(f: &FnDecl) -> String {
    format!(
        "{{\"kind\": \"FnDecl\", \"name\": \"{}\", \"body\": {}}}",
        escape(f.name.as_str()),
        block_json(&f.body)
    )
}

fn block_json(block: &Block) -> String {
    let stmts: Vec<String> = block.stmts.iter().map(stmt_json).collect();
    format!("{{\"stmts\": [{}]}}", stmts.join(", "))
}

fn stmt_json(stmt: &Stmt) -> String {
    match stmt {
        Stmt::VarDecl(v) => var_decl_json(v),
        Stmt::Assign(a) => format!(
            "{{\"kind\": \"Assign\", \"name\": \"{}\", \"value\": {}}}",
            escape(a.name.as_str()),
            expr_json(&a.value)
        ),
        Stmt::ExprStmt(e) => format!("{{\"kind\": \"ExprStmt\", \"expr\": {}}}", expr_json(e)),
        Stmt::IfStmt(i) => if_stmt_json(i),
        Stmt::WhileStmt(w) => while_stmt_json(w),
    }
}

fn var_decl_json(v: &VarDecl) -> String {
    let ty = v
        .annotated_type
        .map(type_ref_json)
        .unwrap_or_else(|| "null".to_string());
    let init = v.init.as_ref().map(expr_json).unwrap_or_else(|| "null".to_string());
    format!(
        "{{\"kind\": \"VarDecl\", \"name\": \"{}\", \"annotatedType\": {}, \"init\": {}, \"isConst\": {}}}",
        escape(v.name.as_str()),
        ty,
        init,
        v.is_const
    )
}

fn if_stmt_json(i: &IfStmt) -> String {
    let branches: Vec<String> = i
        .branches
        .iter()
        .map(|b| format!("{{\"cond\": {}, \"body\": {}}}", expr_json(&b.cond), block_json(&b.body)))
        .collect();
    let else_branch = i.else_branch.as_ref().map(block_json).unwrap_or_else(|| "null".to_string());
    format!(
        "{{\"kind\": \"IfStmt\", \"branches\": [{}], \"elseBranch\": {}}}",
        branches.join(", "),
        else_branch
    )
}

fn while_stmt_json(w: &WhileStmt) -> String {
    format!(
        "{{\"kind\": \"WhileStmt\", \"cond\": {}, \"body\": {}}}",
        expr_json(&w.cond),
        block_json(&w.body)
    )
}

fn type_ref_json(ty: TypeRef) -> String {
    let name = match ty {
        TypeRef::Int => "int",
        TypeRef::Float => "float",
        TypeRef::Bool => "bool",
        TypeRef::Char => "char",
        TypeRef::String => "string",
        TypeRef::Named(sym) => return format!("\"{}\"", escape(sym.as_str())),
    };
    format!("\"{name}\"")
}

fn expr_json(e: &Expr) -> String {
    match &*e.kind {
        ExprKind::IntLit(v) => format!("{{\"kind\": \"IntLit\", \"value\": {v}}}"),
        ExprKind::FloatLit(v) => format!("{{\"kind\": \"FloatLit\", \"value\": {v}}}"),
        ExprKind::BoolLit(v) => format!("{{\"kind\": \"BoolLit\", \"value\": {v}}}"),
        ExprKind::CharLit(c) => format!("{{\"kind\": \"CharLit\", \"value\": \"{}\"}}", escape(&c.to_string())),
        ExprKind::StringLit(sym) => format!("{{\"kind\": \"StringLit\", \"value\": \"{}\"}}", escape(sym.as_str())),
        ExprKind::Ident { name } => format!("{{\"kind\": \"Ident\", \"name\": \"{}\"}}", escape(name.as_str())),
        ExprKind::Unary { op: _, expr } => {
            format!("{{\"kind\": \"Unary\", \"op\": \"!\", \"expr\": {}}}", expr_json(expr))
        }
        ExprKind::Binary { op, left, right } => format!(
            "{{\"kind\": \"Binary\", \"op\": \"{}\", \"left\": {}, \"right\": {}}}",
            bin_op_text(*op),
            expr_json(left),
            expr_json(right)
        ),
        ExprKind::Call { callee, args } => format!(
            "{{\"kind\": \"Call\", \"callee\": \"{}\", \"args\": [{}]}}",
            escape(callee.as_str()),
            args.iter().map(expr_json).collect::<Vec<_>>().join(", ")
        ),
        ExprKind::MethodCall { receiver, method, args } => format!(
            "{{\"kind\": \"MethodCall\", \"receiver\": {}, \"method\": \"{}\", \"args\": [{}]}}",
            expr_json(receiver),
            escape(method.as_str()),
            args.iter().map(expr_json).collect::<Vec<_>>().join(", ")
        ),
    }
}

fn bin_op_text(op: coal_par::BinOp) -> &'static str {
    use coal_par::BinOp::*;
    match op {
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        Pow => "^",
        Eq => "==",
        Ne => "!=",
        Lt => "<",
        Le => "<=",
        Gt => ">",
        Ge => ">=",
        And => "&&",
        Or => "||",
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use coal_util::{FileId, Handler};

    fn lex_all(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut lexer = coal_lex::Lexer::new(source, FileId::DUMMY, &handler);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token();
            let eof = tok.is_eof();
            tokens.push(tok);
            if eof {
                break;
            }
        }
        tokens
    }

    #[test]
    fn tokens_text_includes_line_col_kind_and_lexeme() {
        let source = "fn main";
        let tokens = lex_all(source);
        let dump = tokens_text(&tokens, source);
        assert!(dump.contains("1:1  fn  'fn'"));
        assert!(dump.contains("1:4  Identifier  'main'"));
    }

    #[test]
    fn tokens_json_is_a_well_formed_array() {
        let source = "1 2";
        let tokens = lex_all(source);
        let json = tokens_json(&tokens, source);
        assert!(json.starts_with('['));
        assert!(json.trim_end().ends_with(']'));
        assert!(json.contains("\"kind\": \"IntLiteral\""));
    }

    #[test]
    fn ast_json_captures_a_var_decl() {
        let handler = Handler::new();
        let program = coal_par::parse("fn main() { var x: int = 1 }", FileId::DUMMY, &handler);
        assert!(!handler.has_errors());
        let json = ast_json(&program);
        assert!(json.contains("\"kind\": \"VarDecl\""));
        assert!(json.contains("\"name\": \"x\""));
        assert!(json.contains("\"isConst\": false"));
    }

    #[test]
    fn ast_json_captures_if_elif_else() {
        let handler = Handler::new();
        let program = coal_par::parse(
            "fn main() { if (true) { println(1) } elif (false) { println(2) } else { println(3) } }",
            FileId::DUMMY,
            &handler,
        );
        assert!(!handler.has_errors());
        let json = ast_json(&program);
        assert!(json.contains("\"kind\": \"IfStmt\""));
        assert!(json.contains("\"elseBranch\""));
    }
}
