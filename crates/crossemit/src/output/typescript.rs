//! TypeScript writer.
//!
//! Types render as `(text, self_contained)`, where a self-contained type can
//! take an `[]` suffix without parentheses.

use super::{FileWriter, doc_block, py_repr_str};
use crate::expr::{BoolOp, Callee, CompareOp, PanExpr, StringPart, TypeCheck};
use crate::imports::aggregate;
use crate::precedence::{TsPrecedence, wrap_dot, wrap_mult};
use crate::script::{RenderOptions, Script};
use crate::stmt::{
    CatchBlock, ClassSpec, FunctionSpec, HardCoded, InterfaceSpec, RaiseMessage, ReturnType,
    Statement, Statements, TryCatchBlock,
};
use crate::target::Target;
use crate::traits::{EmitError, Result, Writer};
use crate::types::{CrossType, LiteralValue};

const TS: Target = Target::TypeScript;

/// Parameter names for callable types.
const CALLABLE_ARG_NAMES: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Static instance of the TypeScript writer for registry.
pub static TYPESCRIPT_WRITER: TypeScriptWriterImpl = TypeScriptWriterImpl;

/// TypeScript writer implementing the Writer trait.
pub struct TypeScriptWriterImpl;

impl Writer for TypeScriptWriterImpl {
    fn target(&self) -> Target {
        TS
    }

    fn write(&self, script: &Script, options: &RenderOptions) -> Result<String> {
        emit(script, options)
    }
}

// JavaScript string literals accept the same quoting and escapes.
fn ts_str(s: &str) -> String {
    py_repr_str(s)
}

fn ts_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Str(s) => ts_str(s),
    }
}

impl CrossType {
    /// TypeScript type and whether it is self-contained.
    pub fn ts_type(&self) -> Result<(String, bool)> {
        Ok(match self {
            CrossType::Any => ("any".to_string(), true),
            CrossType::Str => ("string".to_string(), true),
            CrossType::Num => ("number".to_string(), true),
            CrossType::Bool => ("boolean".to_string(), true),
            CrossType::Null => ("null".to_string(), true),
            CrossType::Omit => ("undefined".to_string(), true),
            CrossType::Literal(set) => {
                let values: Vec<String> = set.sorted().into_iter().map(ts_literal).collect();
                (values.join(" | "), values.len() == 1)
            }
            CrossType::Optional(inner) => (format!("{} | null", inner.ts_type()?.0), false),
            CrossType::List(inner) => {
                let (inner, self_contained) = inner.ts_type()?;
                if self_contained {
                    (format!("{inner}[]"), false)
                } else {
                    (format!("Array<{inner}>"), false)
                }
            }
            CrossType::Set(inner) => (format!("Set<{}>", inner.ts_type()?.0), true),
            CrossType::Dict(key, value) => (
                format!("{{[k: {}]: {}}}", key.ts_type()?.0, value.ts_type()?.0),
                true,
            ),
            CrossType::Map(key, value) => (
                format!("Map<{}, {}>", key.ts_type()?.0, value.ts_type()?.0),
                true,
            ),
            CrossType::Union(members) => {
                if members.is_empty() {
                    return Err(EmitError::logic("union without members"));
                }
                let mut parts = Vec::with_capacity(members.len());
                for member in members {
                    parts.push(member.ts_type()?.0);
                }
                (parts.join(" | "), false)
            }
            CrossType::Callable { args, ret } => {
                if args.len() > CALLABLE_ARG_NAMES.len() {
                    return Err(EmitError::logic(format!(
                        "callable types support at most {} arguments",
                        CALLABLE_ARG_NAMES.len()
                    )));
                }
                let mut parts = Vec::with_capacity(args.len());
                for (name, arg) in CALLABLE_ARG_NAMES.chars().zip(args) {
                    parts.push(format!("{name}: {}", arg.ts_type()?.0));
                }
                (format!("({}) => {}", parts.join(", "), ret.ts_type()?.0), false)
            }
            CrossType::NewType { name, .. } => (name.clone(), true),
            CrossType::Custom(custom) => match &custom.typescript {
                Some(expr) => (expr.clone(), false),
                None => return Err(EmitError::missing("CustomType", TS)),
            },
            CrossType::PythonOnly { .. } => {
                return Err(EmitError::not_supported("Python-only type", TS));
            }
            CrossType::TypeScriptOnly(expr) => (expr.clone(), false),
        })
    }
}

fn template_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn join_args(args: &[PanExpr]) -> Result<String> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(arg.ts_expr()?.0);
    }
    Ok(parts.join(", "))
}

/// `base[key] !== undefined ? base[key] : fallback`
fn ts_fallback(target: &PanExpr, key: &PanExpr, fallback: &PanExpr) -> Result<String> {
    let access = format!("{}[{}]", wrap_dot(target.ts_expr()?), key.ts_expr()?.0);
    Ok(format!(
        "{access} !== undefined ? {access} : {}",
        fallback.ts_expr()?.0
    ))
}

impl PanExpr {
    /// TypeScript code for this expression and how tightly it binds.
    pub fn ts_expr(&self) -> Result<(String, TsPrecedence)> {
        use TsPrecedence as P;
        Ok(match self {
            PanExpr::Literal(value) => (ts_literal(value), P::Literal),
            PanExpr::Null => ("null".to_string(), P::Literal),
            PanExpr::Omit => ("undefined".to_string(), P::Literal),
            PanExpr::List { values, .. } => (format!("[{}]", join_args(values)?), P::Literal),
            PanExpr::Dict { entries, .. } => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    parts.push(format!("{}: {}", ts_str(key), value.ts_expr()?.0));
                }
                (format!("{{{}}}", parts.join(", ")), P::Literal)
            }
            PanExpr::Cast { ty, value } => (
                format!("({} as {})", wrap_dot(value.ts_expr()?), ty.ts_type()?.0),
                P::Literal,
            ),
            PanExpr::IndexAccess {
                target,
                index: key,
                fallback,
            }
            | PanExpr::KeyAccess {
                target,
                key,
                fallback,
            } => match fallback {
                None => (
                    format!("{}[{}]", wrap_dot(target.ts_expr()?), key.ts_expr()?.0),
                    P::Dot,
                ),
                Some(fallback) => (ts_fallback(target, key, fallback)?, P::AddSub),
            },
            PanExpr::Var { name, .. } => (name.clone(), P::Literal),
            PanExpr::Prop { name, owner, .. } => match owner {
                None => (format!("this.{name}"), P::Dot),
                Some(owner) => (format!("{}.{name}", wrap_dot(owner.ts_expr()?)), P::Dot),
            },
            PanExpr::Call(call) => {
                if !call.kwargs.is_empty() {
                    return Err(EmitError::not_supported("keyword arguments", TS));
                }
                let callee = match &call.callee {
                    Callee::Function(name) => name.clone(),
                    Callee::Expr(expr) => wrap_dot(expr.ts_expr()?),
                };
                let new = if call.constructor { "new " } else { "" };
                (format!("{new}{callee}({})", join_args(&call.args)?), P::Dot)
            }
            PanExpr::StringBuilder(parts) => {
                let mut out = String::from("`");
                for part in parts {
                    match part {
                        StringPart::Text(text) => out.push_str(&template_text(text)),
                        StringPart::Expr(expr) => {
                            out.push_str("${");
                            out.push_str(&expr.ts_expr()?.0);
                            out.push('}');
                        }
                    }
                }
                out.push('`');
                (out, P::Literal)
            }
            PanExpr::TsOnly { code, prec } => (code.clone(), *prec),
            PanExpr::PyOnly { .. } => {
                return Err(EmitError::not_supported("Python-only expression", TS));
            }
            PanExpr::PhpOnly { .. } => {
                return Err(EmitError::not_supported("PHP-only expression", TS));
            }
            PanExpr::AndOr { op, args } => {
                let joiner = match op {
                    BoolOp::And => " && ",
                    BoolOp::Or => " || ",
                };
                match args.as_slice() {
                    [] => return Err(EmitError::logic("boolean combinator without operands")),
                    [only] => (format!("!!{}", wrap_mult(only.ts_expr()?)), P::MultDiv),
                    many => {
                        let mut parts = Vec::with_capacity(many.len());
                        for arg in many {
                            parts.push(wrap_mult(arg.ts_expr()?));
                        }
                        (format!("!!({})", parts.join(joiner)), P::MultDiv)
                    }
                }
            }
            PanExpr::Not(inner) => match inner.negated() {
                Some(negated) => return negated.ts_expr(),
                None => (format!("!{}", wrap_mult(inner.ts_expr()?)), P::MultDiv),
            },
            PanExpr::Length(inner) => (format!("{}.length", wrap_dot(inner.ts_expr()?)), P::Dot),
            PanExpr::IsNull { target, negated } => {
                let op = if *negated { "!==" } else { "===" };
                (format!("{} {op} null", wrap_dot(target.ts_expr()?)), P::AddSub)
            }
            PanExpr::Compare {
                op,
                left,
                right,
                negated,
            } => {
                let op = match (op, negated) {
                    (CompareOp::Eq, false) => "===",
                    (CompareOp::Eq, true) => "!==",
                    (CompareOp::Lt, false) => "<",
                    (CompareOp::Lt, true) => ">=",
                    (CompareOp::Gt, false) => ">",
                    (CompareOp::Gt, true) => "<=",
                };
                (
                    format!(
                        "{} {op} {}",
                        wrap_mult(left.ts_expr()?),
                        wrap_mult(right.ts_expr()?)
                    ),
                    P::MultDiv,
                )
            }
            PanExpr::IsType { value, check } => {
                let value = wrap_dot(value.ts_expr()?);
                match check {
                    TypeCheck::Str => (format!("typeof {value} === 'string'"), P::MultDiv),
                    TypeCheck::Int => (format!("typeof {value} === 'number'"), P::MultDiv),
                    TypeCheck::Bool => (format!("typeof {value} === 'boolean'"), P::MultDiv),
                    TypeCheck::List => (format!("Array.isArray({value})"), P::Dot),
                }
            }
            PanExpr::NotOmitted(value) => (
                format!("typeof {} !== 'undefined'", wrap_dot(value.ts_expr()?)),
                P::MultDiv,
            ),
            PanExpr::Await(value) => (format!("await {}", wrap_dot(value.ts_expr()?)), P::MultDiv),
            PanExpr::HardCoded(hard) => match &hard.typescript {
                Some((render, prec)) => (render(), *prec),
                None => return Err(EmitError::missing("HardCodedExpr", TS)),
            },
        })
    }
}

fn write_block(block: &Statements, w: &mut FileWriter<'_>) -> Result<()> {
    for stmt in block.iter() {
        write_statement(stmt, w)?;
    }
    Ok(())
}

fn write_statement(stmt: &Statement, w: &mut FileWriter<'_>) -> Result<()> {
    match stmt {
        Statement::Blank => w.blank(),
        Statement::Comment(text) => {
            for line in text.split('\n') {
                w.line0(format!("// {line}").trim_end());
            }
        }
        Statement::Expr(expr) => w.line0(format!("{};", expr.ts_expr()?.0)),
        Statement::HardCoded(hard) => match &hard.typescript {
            HardCoded::Missing => return Err(EmitError::missing("HardCodedStatement", TS)),
            HardCoded::Omitted => {}
            HardCoded::Code(code) => w.line0(code),
        },
        Statement::Raise(raise) => {
            let message = match &raise.message {
                RaiseMessage::Text(text) => ts_str(text),
                RaiseMessage::Expr(expr) => expr.ts_expr()?.0,
            };
            w.line0(format!("throw new {}({message});", raise.ctor_for(TS)));
        }
        Statement::Return(value) => {
            if value.is_omit() {
                w.line0("return;");
            } else {
                w.line0(format!("return {};", value.ts_expr()?.0));
            }
        }
        Statement::Assign(assign) => {
            let mut line = assign.target.ts_expr()?.0;
            if assign.declare {
                line.insert_str(0, "let ");
                if let Some(ty) = &assign.declared_type {
                    line.push_str(": ");
                    line.push_str(&ty.ts_type()?.0);
                }
            }
            if let Some(value) = &assign.value {
                line.push_str(" = ");
                line.push_str(&value.ts_expr()?.0);
            }
            line.push(';');
            w.line0(line);
        }
        Statement::ListAppend(append) => w.line0(format!(
            "{}.push({});",
            wrap_dot(append.list.ts_expr()?),
            append.value.ts_expr()?.0
        )),
        Statement::DictBuilder(builder) => {
            let dict_type = CrossType::Dict(
                Box::new(builder.key_type.clone()),
                Box::new(builder.value_type.clone()),
            );
            let mut parts = Vec::new();
            for entry in builder.entries.iter().filter(|e| !e.allow_omit) {
                parts.push(format!("{}: {}", ts_str(&entry.key), entry.value.ts_expr()?.0));
            }
            w.line0(format!(
                "let {}: {} = {{{}}};",
                builder.var,
                dict_type.ts_type()?.0,
                parts.join(", ")
            ));
            for entry in builder.entries.iter().filter(|e| e.allow_omit) {
                let check = PanExpr::NotOmitted(Box::new(entry.value.clone())).ts_expr()?.0;
                w.line0(format!("if ({check}) {{"));
                w.line1(format!(
                    "{}[{}] = {};",
                    builder.var,
                    ts_str(&entry.key),
                    entry.value.ts_expr()?.0
                ));
                w.line0("}");
            }
        }
        Statement::Conditional(cond) => {
            w.line0(format!("if ({}) {{", cond.expr.ts_expr()?.0));
            write_block(&cond.body, &mut w.with_more_indent())?;
            for (expr, body) in &cond.elifs {
                w.line0(format!("}} else if ({}) {{", expr.ts_expr()?.0));
                write_block(body, &mut w.with_more_indent())?;
            }
            if let Some(body) = &cond.else_body {
                w.line0("} else {");
                write_block(body, &mut w.with_more_indent())?;
            }
            w.line0("}");
            w.blank();
        }
        Statement::ForLoop(looped) => {
            w.line0(format!(
                "for (let {} of {}) {{",
                looped.var.ts_expr()?.0,
                looped.iterable.ts_expr()?.0
            ));
            write_block(&looped.body, &mut w.with_more_indent())?;
            w.line0("}");
            w.blank();
        }
        Statement::DictLoop(looped) => {
            let value = looped.value.ts_expr()?.0;
            let head = match (&looped.key, looped.is_map()) {
                (Some(key), true) => format!(
                    "for (let [{}, {value}] of {}) {{",
                    key.ts_expr()?.0,
                    looped.iterable.ts_expr()?.0
                ),
                (None, true) => format!(
                    "for (let {value} of {}.values()) {{",
                    wrap_dot(looped.iterable.ts_expr()?)
                ),
                (Some(key), false) => format!(
                    "for (let [{}, {value}] of Object.entries({})) {{",
                    key.ts_expr()?.0,
                    looped.iterable.ts_expr()?.0
                ),
                (None, false) => format!(
                    "for (let {value} of Object.values({})) {{",
                    looped.iterable.ts_expr()?.0
                ),
            };
            w.line0(head);
            write_block(&looped.body, &mut w.with_more_indent())?;
            w.line0("}");
            w.blank();
        }
        Statement::TryCatch(block) => write_try(block, w)?,
        Statement::Function(func) => write_function(func, w)?,
        Statement::Class(class) => write_class(class, w)?,
        Statement::Interface(iface) => write_interface(iface, w)?,
        Statement::Block(block) => write_block(block, w)?,
    }
    Ok(())
}

/// TypeScript has a single untyped `catch`, so typed arms become an
/// `instanceof` chain inside it.
fn write_try(block: &TryCatchBlock, w: &mut FileWriter<'_>) -> Result<()> {
    block.check_has_handlers()?;

    let mut var: Option<&str> = None;
    let mut typed: Vec<(&str, &CatchBlock)> = Vec::new();
    let mut catch_all: Option<&CatchBlock> = None;
    for arm in &block.catches {
        if let Some(name) = arm.var.as_deref() {
            match var {
                None => var = Some(name),
                Some(existing) if existing != name => {
                    return Err(EmitError::logic(
                        "every catch arm must bind the same variable name for TypeScript",
                    ));
                }
                Some(_) => {}
            }
        }
        if catch_all.is_some() {
            return Err(EmitError::logic(
                "the catch arm without a TypeScript exception class must come last",
            ));
        }
        match arm.classes.typescript.as_deref() {
            Some(class) => typed.push((class, arm)),
            None => catch_all = Some(arm),
        }
    }

    w.line0("try {");
    write_block(&block.body, &mut w.with_more_indent())?;

    if !block.catches.is_empty() {
        if typed.is_empty() {
            match var {
                Some(var) => w.line0(format!("}} catch ({var}) {{")),
                None => w.line0("} catch {"),
            }
            if let Some(arm) = catch_all {
                write_block(&arm.body, &mut w.with_more_indent())?;
            }
        } else {
            let Some(var) = var else {
                return Err(EmitError::logic(
                    "typed catch arms need a bound variable for TypeScript",
                ));
            };
            w.line0(format!("}} catch ({var}) {{"));
            let mut inner = w.with_more_indent();
            for (i, (class, arm)) in typed.iter().enumerate() {
                if i == 0 {
                    inner.line0(format!("if ({var} instanceof {class}) {{"));
                } else {
                    inner.line0(format!("}} else if ({var} instanceof {class}) {{"));
                }
                write_block(&arm.body, &mut inner.with_more_indent())?;
            }
            match catch_all {
                Some(arm) => {
                    inner.line0("} else {");
                    write_block(&arm.body, &mut inner.with_more_indent())?;
                    inner.line0("}");
                }
                None => {
                    inner.line0("}");
                    inner.line0(format!("throw {var};"));
                }
            }
        }
    }

    if let Some(finally) = &block.finally {
        w.line0("} finally {");
        write_block(finally, &mut w.with_more_indent())?;
    }
    w.line0("}");
    Ok(())
}

fn write_function(func: &FunctionSpec, w: &mut FileWriter<'_>) -> Result<()> {
    func.check_abstract_body()?;
    if !func.overloads.is_empty() {
        return Err(EmitError::not_supported("function overloads", TS));
    }
    if !func.kwargs.is_empty() {
        return Err(EmitError::not_supported("keyword arguments", TS));
    }

    if !func.docstring.is_empty() {
        for line in doc_block(&func.docstring) {
            w.line0(line);
        }
    }
    for decorator in &func.decorators_ts {
        w.line0(format!("@{decorator}"));
    }

    let mut modifiers: Vec<&str> = Vec::new();
    if func.is_async {
        if func.is_constructor {
            return Err(EmitError::logic("a constructor cannot be async"));
        }
        modifiers.push("async");
    }
    if func.is_abstract {
        modifiers.push("abstract");
    }
    if func.is_static {
        modifiers.push("static");
    }
    if func.is_method {
        if modifiers.is_empty() {
            modifiers.push("public");
        }
    } else {
        modifiers.push("function");
    }
    let name = if func.is_constructor {
        "constructor"
    } else {
        func.name.as_str()
    };
    w.line0(format!("{} {name}(", modifiers.join(" ")));
    for arg in &func.pargs {
        let mut line = format!("{}: {}", arg.name, arg.ty.ts_type()?.0);
        if let Some(default) = &arg.default {
            line.push_str(" = ");
            line.push_str(&default.ts_expr()?.0);
        }
        line.push(',');
        w.line1(line);
    }

    let ret = if func.is_constructor {
        None
    } else {
        let ret = match &func.ret {
            ReturnType::NoReturn => "void".to_string(),
            ReturnType::Type(ty) => ty.ts_type()?.0,
        };
        Some(if func.is_async {
            format!("Promise<{ret}>")
        } else {
            ret
        })
    };
    let signature_end = match &ret {
        Some(ret) => format!("): {ret}"),
        None => ")".to_string(),
    };
    if func.is_abstract {
        w.line0(format!("{signature_end};"));
    } else {
        w.line0(format!("{signature_end} {{"));
        write_block(&func.body, &mut w.with_more_indent())?;
        w.line0("}");
    }
    Ok(())
}

fn write_class(class: &ClassSpec, w: &mut FileWriter<'_>) -> Result<()> {
    if !class.docstring.is_empty() {
        for line in doc_block(&class.docstring) {
            w.line0(line);
        }
    }
    let mut head = String::new();
    if class.ts_export {
        head.push_str("export ");
    }
    if class.is_abstract {
        head.push_str("abstract ");
    }
    head.push_str("class ");
    head.push_str(&class.name);
    if let Some(parent) = &class.ts_parent {
        head.push_str(" extends ");
        head.push_str(parent);
    }
    w.line0(format!("{head} {{"));

    let mut inner = w.with_more_indent();
    let mut need_blank = false;
    for prop in &class.properties {
        if prop.ts_observable {
            inner.blank();
            inner.line0("@observable");
        }
        let access = if prop.ts_readonly { "readonly" } else { "public" };
        let mut line = format!("{access} {}: {}", prop.name, prop.ty.ts_type()?.0);
        if let Some(default) = prop.default.as_ref().filter(|d| d.is_literal()) {
            line.push_str(" = ");
            line.push_str(&default.ts_expr()?.0);
        }
        line.push(';');
        inner.line0(line);
        need_blank = true;
    }
    if let Some(ctor) = class.constructor_for(TS)? {
        if need_blank {
            inner.blank();
        }
        write_function(&ctor, &mut inner)?;
        need_blank = true;
    }
    for method in &class.methods {
        if need_blank {
            inner.blank();
        }
        write_function(method, &mut inner)?;
        need_blank = true;
    }
    for remark in &class.remarks {
        inner.line0(format!("// {remark}"));
    }
    w.line0("}");
    Ok(())
}

fn write_interface(iface: &InterfaceSpec, w: &mut FileWriter<'_>) -> Result<()> {
    let export = if iface.ts_export { "export " } else { "" };
    w.line0(format!("{export}interface {} {{", iface.name));
    for (name, ty) in &iface.properties {
        w.line1(format!("{name}: {};", ty.ts_type()?.0));
    }
    w.line0("}");
    Ok(())
}

/// Render a whole script as a TypeScript module.
pub(crate) fn emit(script: &Script, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    let mut w = FileWriter::new(&mut out, &options.indent);

    for comment in &script.file_comments {
        w.line0(format!("// {comment}").trim_end());
    }

    let groups = aggregate(script.imports(TS)?);
    for module in &groups.modules {
        w.line0(format!("import {};", ts_str(module)));
    }
    for (module, names) in &groups.names {
        w.line0(format!("import {{{}}} from {};", names.join(", "), ts_str(module)));
    }
    if !groups.is_empty() {
        w.blank();
    }

    if !script.new_types.is_empty() {
        for decl in &script.new_types {
            let (base, self_contained) = decl.base.ts_type()?;
            let base = if self_contained {
                base
            } else {
                format!("({base})")
            };
            let export = if decl.ts_export { "export " } else { "" };
            w.line0(format!(
                "{export}type {} = {base} & {{readonly brand: unique symbol}};",
                decl.name
            ));
        }
        w.blank();
    }

    write_block(&script.content, &mut w)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{
        PanCall, and_, await_, exacteq_, isnull, isstr, islist, not_, or_, pan, pan_omit,
        pannotomit, pyexpr, tsexpr,
    };
    use crate::stmt::{AcceptsStatements, ExceptionClasses};
    use crate::types::{
        CustomType, callable, dictof, lit, listof, mapof, maybe, omittable, setof, unionof,
    };

    fn ty(t: &CrossType) -> String {
        t.ts_type().unwrap().0
    }

    fn expr(e: &PanExpr) -> String {
        e.ts_expr().unwrap().0
    }

    fn render(block: &Statements) -> String {
        let mut out = String::new();
        write_block(block, &mut FileWriter::new(&mut out, "  ")).unwrap();
        out
    }

    #[test]
    fn test_types() {
        assert_eq!(ty(&listof(CrossType::Str)), "string[]");
        assert_eq!(ty(&listof(listof(CrossType::Str))), "Array<string[]>");
        assert_eq!(ty(&listof(maybe(CrossType::Num))), "Array<number | null>");
        assert_eq!(ty(&setof(CrossType::Num)), "Set<number>");
        assert_eq!(ty(&dictof(CrossType::Str, CrossType::Bool)), "{[k: string]: boolean}");
        assert_eq!(ty(&mapof(CrossType::Str, CrossType::Num)), "Map<string, number>");
        assert_eq!(
            ty(&omittable(CrossType::Str)),
            "string | undefined"
        );
        assert_eq!(
            ty(&callable([CrossType::Str, CrossType::Num], CrossType::Bool)),
            "(a: string, b: number) => boolean"
        );
        assert_eq!(ty(&unionof([CrossType::Str, CrossType::Null])), "string | null");
        assert_eq!(ty(&listof(lit(["a"]))), "'a'[]");
        assert_eq!(ty(&listof(lit(["a", "b"]))), "Array<'a' | 'b'>");
    }

    #[test]
    fn test_callable_argument_limit() {
        let args = vec![CrossType::Str; 53];
        let err = callable(args, CrossType::Bool).ts_type().unwrap_err();
        assert!(matches!(err, EmitError::InvalidLogic(_)));
        assert!(callable(vec![CrossType::Str; 52], CrossType::Bool).ts_type().is_ok());
    }

    #[test]
    fn test_custom_and_foreign_types() {
        let custom: CrossType = CustomType::new().typescript("Foo<Bar>").into();
        assert_eq!(ty(&custom), "Foo<Bar>");
        let py_only: CrossType = CustomType::new().python("Foo").into();
        assert!(matches!(
            py_only.ts_type(),
            Err(EmitError::ImplementationMissing { .. })
        ));
        assert_eq!(ty(&CrossType::TypeScriptOnly("Partial<X>".into())), "Partial<X>");
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr(&pan("")), "''");
        assert_eq!(expr(&pan(true)), "true");
        assert_eq!(expr(&pan(Option::<i32>::None)), "null");
        assert_eq!(expr(&pan_omit()), "undefined");
    }

    #[test]
    fn test_precedence() {
        let e = tsexpr("a || b").getprop("length", CrossType::Num);
        assert_eq!(expr(&e), "(a || b).length");
        let x = PanExpr::var("x", None);
        assert_eq!(expr(&not_(isnull(x.clone()))), "x !== null");
        assert_eq!(expr(&not_(x.clone())), "!x");
        assert_eq!(expr(&not_(exacteq_(x.clone(), pan(5)))), "x !== 5");
        assert_eq!(expr(&or_([x.clone()])), "!!x");
        assert_eq!(
            expr(&and_([x.clone(), isnull(x.clone())])),
            "!!(x && (x === null))"
        );
    }

    #[test]
    fn test_fallback_access() {
        let d = PanExpr::var("d", Some(dictof(CrossType::Str, CrossType::Num)));
        assert_eq!(
            expr(&d.getitem_or("k", 0)),
            "d['k'] !== undefined ? d['k'] : 0"
        );
    }

    #[test]
    fn test_calls() {
        assert_eq!(
            expr(&PanCall::construct("Pet").arg("Rex").into()),
            "new Pet('Rex')"
        );
        let with_kwarg: PanExpr = PanCall::function("f").kwarg("x", 1).unwrap().into();
        assert!(matches!(
            with_kwarg.ts_expr(),
            Err(EmitError::NotSupported { .. })
        ));
        assert!(pyexpr("x").ts_expr().is_err());
    }

    #[test]
    fn test_template_literal() {
        let name = PanExpr::var("name", Some(CrossType::Str));
        let e = PanExpr::string_builder(["cost: $".into(), name.into(), " `x`".into()]);
        assert_eq!(expr(&e), "`cost: \\$${name} \\`x\\``");
    }

    #[test]
    fn test_type_checks_and_await() {
        let v = PanExpr::var("v", None);
        assert_eq!(expr(&isstr(v.clone())), "typeof v === 'string'");
        assert_eq!(expr(&islist(v.clone())), "Array.isArray(v)");
        assert_eq!(expr(&pannotomit(v.clone())), "typeof v !== 'undefined'");
        assert_eq!(expr(&await_(v)), "await v");
    }

    #[test]
    fn test_try_catch_chain_rethrows() {
        let mut block = Statements::new();
        block.with_try(|t| {
            t.also_return(pan(1));
            t.with_catch(Some("e"), ExceptionClasses::any().typescript("TypeError"), |c| {
                c.also_return(pan(2));
            });
            t.with_catch(Some("e"), ExceptionClasses::any().typescript("RangeError"), |c| {
                c.also_return(pan(3));
            });
        });
        assert_eq!(
            render(&block),
            "try {\n  return 1;\n} catch (e) {\n  if (e instanceof TypeError) {\n    return 2;\n  } else if (e instanceof RangeError) {\n    return 3;\n  }\n  throw e;\n}\n"
        );
    }

    #[test]
    fn test_try_catch_all_must_be_last() {
        let mut block = Statements::new();
        block.with_try(|t| {
            t.with_catch(Some("e"), ExceptionClasses::any(), |_| {});
            t.with_catch(Some("e"), ExceptionClasses::any().typescript("TypeError"), |_| {});
        });
        let mut out = String::new();
        let err = write_block(&block, &mut FileWriter::new(&mut out, "  ")).unwrap_err();
        assert!(matches!(err, EmitError::InvalidLogic(_)));
    }

    #[test]
    fn test_lone_catch_all_without_var() {
        let mut block = Statements::new();
        block.with_try(|t| {
            t.with_catch(None, ExceptionClasses::any(), |c| {
                c.remark("ignored");
            });
        });
        assert_eq!(render(&block), "try {\n} catch {\n  // ignored\n}\n");
    }

    #[test]
    fn test_dict_loops() {
        let d = PanExpr::var("d", Some(dictof(CrossType::Str, CrossType::Num)));
        let m = PanExpr::var("m", Some(mapof(CrossType::Str, CrossType::Num)));
        let mut block = Statements::new();
        block.with_dict_iter(d.clone(), "v", Some("k"), |_| {});
        block.with_dict_iter(d, "v", None, |_| {});
        block.with_dict_iter(m.clone(), "v", Some("k"), |_| {});
        block.with_dict_iter(m, "v", None, |_| {});
        assert_eq!(
            render(&block),
            "for (let [k, v] of Object.entries(d)) {\n}\n\nfor (let v of Object.values(d)) {\n}\n\nfor (let [k, v] of m) {\n}\n\nfor (let v of m.values()) {\n}\n\n"
        );
    }
}
