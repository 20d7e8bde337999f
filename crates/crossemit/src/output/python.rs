//! Python writer.
//!
//! Renders types as `typing` annotations, expressions with
//! [`PyPrecedence`] tags, and statements through a [`FileWriter`]. Every
//! statement writer returns the number of code lines it produced, so that
//! empty blocks can be given a `pass`.

use super::{FileWriter, py_repr_str};
use crate::expr::{BoolOp, Callee, CompareOp, PanExpr, StringPart, TypeCheck};
use crate::imports::aggregate;
use crate::precedence::{PyPrecedence, wrap_dot, wrap_mult};
use crate::script::{RenderOptions, Script};
use crate::stmt::{
    ClassSpec, FunctionArg, FunctionSpec, HardCoded, RaiseMessage, ReturnType, Statement,
    Statements, TryCatchBlock,
};
use crate::target::Target;
use crate::traits::{EmitError, Result, Writer};
use crate::types::{CrossType, LiteralValue};

const PY: Target = Target::Python;

/// Static instance of the Python writer for the registry.
pub static PYTHON_WRITER: PythonWriterImpl = PythonWriterImpl;

/// Python writer implementing the Writer trait.
pub struct PythonWriterImpl;

impl Writer for PythonWriterImpl {
    fn target(&self) -> Target {
        PY
    }

    fn write(&self, script: &Script, options: &RenderOptions) -> Result<String> {
        emit(script, options)
    }
}

pub(crate) fn py_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(true) => "True".to_string(),
        LiteralValue::Bool(false) => "False".to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Str(s) => py_repr_str(s),
    }
}

impl CrossType {
    /// Python annotation and whether it must be written as a string.
    pub fn py_type(&self) -> Result<(String, bool)> {
        let generic = |name: &str, args: &[&CrossType]| -> Result<(String, bool)> {
            let mut quote = false;
            let mut parts = Vec::with_capacity(args.len());
            for arg in args {
                let (text, q) = arg.py_type()?;
                quote |= q;
                parts.push(text);
            }
            Ok((format!("{name}[{}]", parts.join(", ")), quote))
        };
        match self {
            CrossType::Any => Ok(("Any".to_string(), false)),
            CrossType::Str => Ok(("str".to_string(), false)),
            CrossType::Num => Ok(("int".to_string(), false)),
            CrossType::Bool => Ok(("bool".to_string(), false)),
            CrossType::Null => Ok(("None".to_string(), false)),
            CrossType::Omit => Ok(("builtins.ellipsis".to_string(), true)),
            CrossType::Literal(set) => {
                let values: Vec<String> = set.sorted().into_iter().map(py_literal).collect();
                Ok((format!("Literal[{}]", values.join(", ")), false))
            }
            CrossType::Optional(inner) => generic("Optional", &[inner]),
            CrossType::List(inner) => generic("List", &[inner]),
            CrossType::Set(inner) => generic("Set", &[inner]),
            CrossType::Dict(key, value) => generic("Dict", &[key, value]),
            CrossType::Map(key, value) => generic("Mapping", &[key, value]),
            CrossType::Union(members) => {
                if members.is_empty() {
                    return Err(EmitError::logic("union without members"));
                }
                let members: Vec<&CrossType> = members.iter().collect();
                generic("Union", &members)
            }
            CrossType::Callable { args, ret } => {
                let mut quote = false;
                let mut parts = Vec::with_capacity(args.len());
                for arg in args {
                    let (text, q) = arg.py_type()?;
                    quote |= q;
                    parts.push(text);
                }
                let (ret, q) = ret.py_type()?;
                Ok((
                    format!("Callable[[{}], {ret}]", parts.join(", ")),
                    quote || q,
                ))
            }
            CrossType::NewType { name, .. } => Ok((name.clone(), false)),
            CrossType::Custom(custom) => match &custom.python {
                Some(expr) => Ok((expr.clone(), true)),
                None => Err(EmitError::missing("CustomType", PY)),
            },
            CrossType::PythonOnly { expr, quoted } => Ok((expr.clone(), *quoted)),
            CrossType::TypeScriptOnly(_) => Err(EmitError::not_supported("TypeScript-only type", PY)),
        }
    }

    /// Python annotation, quoted when needed.
    pub fn py_type_quoted(&self) -> Result<String> {
        let (text, quote) = self.py_type()?;
        Ok(if quote { py_repr_str(&text) } else { text })
    }
}

fn fstring_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            c => out.push(c),
        }
    }
    out
}

fn join_args(args: &[PanExpr]) -> Result<Vec<String>> {
    args.iter().map(|a| Ok(a.py_expr()?.0)).collect()
}

impl PanExpr {
    /// Python code for this expression and how tightly it binds.
    pub fn py_expr(&self) -> Result<(String, PyPrecedence)> {
        use PyPrecedence as P;
        Ok(match self {
            PanExpr::Literal(value) => (py_literal(value), P::Literal),
            PanExpr::Null => ("None".to_string(), P::Literal),
            PanExpr::Omit => ("...".to_string(), P::MultDiv),
            PanExpr::List { values, .. } => (format!("[{}]", join_args(values)?.join(", ")), P::Literal),
            PanExpr::Dict { entries, .. } => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    parts.push(format!("{}: {}", py_repr_str(key), value.py_expr()?.0));
                }
                (format!("{{{}}}", parts.join(", ")), P::Literal)
            }
            PanExpr::Cast { ty, value } => (
                format!("cast({}, {})", ty.py_type_quoted()?, value.py_expr()?.0),
                P::Dot,
            ),
            PanExpr::IndexAccess {
                target,
                index,
                fallback,
            } => {
                let base = wrap_dot(target.py_expr()?);
                let (idx, _) = index.py_expr()?;
                match fallback {
                    None => (format!("{base}[{idx}]"), P::Dot),
                    Some(fallback) => (
                        format!(
                            "{base}[{idx}] if len({}) > {} else {}",
                            target.py_expr()?.0,
                            wrap_mult(index.py_expr()?),
                            fallback.py_expr()?.0
                        ),
                        P::AddSub,
                    ),
                }
            }
            PanExpr::KeyAccess {
                target,
                key,
                fallback,
            } => {
                let base = wrap_dot(target.py_expr()?);
                let (key, _) = key.py_expr()?;
                match fallback {
                    None => (format!("{base}[{key}]"), P::Dot),
                    Some(fallback) => (
                        format!("{base}.get({key}, {})", fallback.py_expr()?.0),
                        P::Dot,
                    ),
                }
            }
            PanExpr::Var { name, .. } => (name.clone(), P::Literal),
            PanExpr::Prop { name, owner, .. } => match owner {
                None => (format!("self.{name}"), P::Dot),
                Some(owner) => (format!("{}.{name}", wrap_dot(owner.py_expr()?)), P::Dot),
            },
            PanExpr::Call(call) => {
                let callee = match &call.callee {
                    Callee::Function(name) => name.clone(),
                    Callee::Expr(expr) => wrap_dot(expr.py_expr()?),
                };
                let mut args = join_args(&call.args)?;
                for (name, value) in &call.kwargs {
                    args.push(format!("{name}={}", value.py_expr()?.0));
                }
                (format!("{callee}({})", args.join(", ")), P::Dot)
            }
            PanExpr::StringBuilder(parts) => {
                let mut out = String::from("f\"");
                for part in parts {
                    match part {
                        StringPart::Text(text) => out.push_str(&fstring_text(text)),
                        StringPart::Expr(expr) => {
                            out.push('{');
                            out.push_str(&expr.py_expr()?.0);
                            out.push('}');
                        }
                    }
                }
                out.push('"');
                (out, P::Literal)
            }
            PanExpr::PyOnly { code, prec } => (code.clone(), *prec),
            PanExpr::TsOnly { .. } => return Err(EmitError::not_supported("TypeScript-only expression", PY)),
            PanExpr::PhpOnly { .. } => return Err(EmitError::not_supported("PHP-only expression", PY)),
            PanExpr::AndOr { op, args } => {
                let joiner = match op {
                    BoolOp::And => " and ",
                    BoolOp::Or => " or ",
                };
                let inner = match args.as_slice() {
                    [] => return Err(EmitError::logic("boolean combinator without operands")),
                    [only] => only.py_expr()?.0,
                    many => {
                        let mut parts = Vec::with_capacity(many.len());
                        for arg in many {
                            parts.push(wrap_mult(arg.py_expr()?));
                        }
                        parts.join(joiner)
                    }
                };
                (format!("bool({inner})"), P::Dot)
            }
            PanExpr::Not(inner) => match inner.negated() {
                Some(negated) => return negated.py_expr(),
                None => (format!("not {}", wrap_mult(inner.py_expr()?)), P::MultDiv),
            },
            PanExpr::Length(inner) => (format!("len({})", inner.py_expr()?.0), P::Dot),
            PanExpr::IsNull { target, negated } => {
                let op = if *negated { "is not" } else { "is" };
                (format!("{} {op} None", wrap_mult(target.py_expr()?)), P::AddSub)
            }
            PanExpr::Compare {
                op,
                left,
                right,
                negated,
            } => {
                let op = match (op, negated) {
                    (CompareOp::Eq, false) => "==",
                    (CompareOp::Eq, true) => "!=",
                    (CompareOp::Lt, false) => "<",
                    (CompareOp::Lt, true) => ">=",
                    (CompareOp::Gt, false) => ">",
                    (CompareOp::Gt, true) => "<=",
                };
                (
                    format!(
                        "{} {op} {}",
                        wrap_mult(left.py_expr()?),
                        wrap_mult(right.py_expr()?)
                    ),
                    P::MultDiv,
                )
            }
            PanExpr::IsType { value, check } => {
                let class = match check {
                    TypeCheck::Str => "str",
                    TypeCheck::Int => "int",
                    TypeCheck::Bool => "bool",
                    TypeCheck::List => "list",
                };
                (format!("isinstance({}, {class})", value.py_expr()?.0), P::Dot)
            }
            PanExpr::NotOmitted(value) => (
                format!("not isinstance({}, type(...))", value.py_expr()?.0),
                P::MultDiv,
            ),
            PanExpr::Await(value) => (format!("await {}", wrap_dot(value.py_expr()?)), P::MultDiv),
            PanExpr::HardCoded(hard) => match &hard.python {
                Some((render, prec)) => (render(), *prec),
                None => return Err(EmitError::missing("HardCodedExpr", PY)),
            },
        })
    }
}

fn write_block(block: &Statements, w: &mut FileWriter<'_>) -> Result<usize> {
    let mut count = 0;
    for stmt in block.iter() {
        count += write_statement(stmt, w)?;
    }
    Ok(count)
}

/// Write a block one level deeper, with `pass` if it produced no code.
fn write_body(block: &Statements, w: &mut FileWriter<'_>) -> Result<()> {
    let mut inner = w.with_more_indent();
    if write_block(block, &mut inner)? == 0 {
        inner.line0("pass");
    }
    Ok(())
}

fn write_statement(stmt: &Statement, w: &mut FileWriter<'_>) -> Result<usize> {
    match stmt {
        Statement::Blank => {
            w.blank();
            Ok(0)
        }
        Statement::Comment(text) => {
            for line in text.split('\n') {
                w.line0(format!("# {line}").trim_end());
            }
            Ok(0)
        }
        Statement::Expr(expr) => {
            w.line0(expr.py_expr()?.0);
            Ok(1)
        }
        Statement::HardCoded(hard) => match &hard.python {
            HardCoded::Missing => Err(EmitError::missing("HardCodedStatement", PY)),
            HardCoded::Omitted => Ok(0),
            HardCoded::Code(code) => {
                w.line0(code);
                Ok(1)
            }
        },
        Statement::Raise(raise) => {
            let message = match &raise.message {
                RaiseMessage::Text(text) => py_repr_str(text),
                RaiseMessage::Expr(expr) => expr.py_expr()?.0,
            };
            w.line0(format!("raise {}({message})", raise.ctor_for(PY)));
            Ok(1)
        }
        Statement::Return(value) => {
            if value.is_omit() {
                w.line0("return");
            } else {
                w.line0(format!("return {}", value.py_expr()?.0));
            }
            Ok(1)
        }
        Statement::Assign(assign) => {
            let mut line = assign.target.py_expr()?.0;
            if let Some(ty) = &assign.declared_type {
                line.push_str(": ");
                line.push_str(&ty.py_type_quoted()?);
            }
            if let Some(value) = &assign.value {
                line.push_str(" = ");
                line.push_str(&value.py_expr()?.0);
            }
            w.line0(line);
            Ok(1)
        }
        Statement::ListAppend(append) => {
            w.line0(format!(
                "{}.append({})",
                wrap_dot(append.list.py_expr()?),
                append.value.py_expr()?.0
            ));
            Ok(1)
        }
        Statement::DictBuilder(builder) => {
            let dict_type = CrossType::Dict(
                Box::new(builder.key_type.clone()),
                Box::new(builder.value_type.clone()),
            );
            let mut parts = Vec::new();
            for entry in builder.entries.iter().filter(|e| !e.allow_omit) {
                parts.push(format!("{}: {}", py_repr_str(&entry.key), entry.value.py_expr()?.0));
            }
            w.line0(format!(
                "{}: {} = {{{}}}",
                builder.var,
                dict_type.py_type_quoted()?,
                parts.join(", ")
            ));
            for entry in builder.entries.iter().filter(|e| e.allow_omit) {
                let check = PanExpr::NotOmitted(Box::new(entry.value.clone())).py_expr()?.0;
                w.line0(format!("if {check}:"));
                w.line1(format!(
                    "{}[{}] = {}",
                    builder.var,
                    py_repr_str(&entry.key),
                    entry.value.py_expr()?.0
                ));
            }
            Ok(1)
        }
        Statement::Conditional(cond) => {
            w.line0(format!("if {}:", cond.expr.py_expr()?.0));
            write_body(&cond.body, w)?;
            for (expr, body) in &cond.elifs {
                w.line0(format!("elif {}:", expr.py_expr()?.0));
                write_body(body, w)?;
            }
            if let Some(body) = &cond.else_body {
                w.line0("else:");
                write_body(body, w)?;
            }
            w.blank();
            Ok(1)
        }
        Statement::ForLoop(looped) => {
            w.line0(format!(
                "for {} in {}:",
                looped.var.py_expr()?.0,
                looped.iterable.py_expr()?.0
            ));
            write_body(&looped.body, w)?;
            w.blank();
            Ok(1)
        }
        Statement::DictLoop(looped) => {
            let iterable = wrap_dot(looped.iterable.py_expr()?);
            let value = looped.value.py_expr()?.0;
            match &looped.key {
                Some(key) => w.line0(format!(
                    "for {}, {value} in {iterable}.items():",
                    key.py_expr()?.0
                )),
                None => w.line0(format!("for {value} in {iterable}.values():")),
            }
            write_body(&looped.body, w)?;
            w.blank();
            Ok(1)
        }
        Statement::TryCatch(block) => write_try(block, w),
        Statement::Function(func) => write_function(func, w),
        Statement::Class(class) => write_class(class, w),
        Statement::Interface(_) => Err(EmitError::not_supported("InterfaceSpec", PY)),
        Statement::Block(block) => write_block(block, w),
    }
}

fn write_try(block: &TryCatchBlock, w: &mut FileWriter<'_>) -> Result<usize> {
    block.check_has_handlers()?;
    w.line0("try:");
    write_body(&block.body, w)?;
    for arm in &block.catches {
        let class = arm.classes.python.as_deref().unwrap_or("Exception");
        match &arm.var {
            Some(var) => w.line0(format!("except {class} as {var}:")),
            None => w.line0(format!("except {class}:")),
        }
        write_body(&arm.body, w)?;
    }
    if let Some(finally) = &block.finally {
        w.line0("finally:");
        write_body(finally, w)?;
    }
    Ok(1)
}

fn py_arg(arg: &FunctionArg) -> Result<String> {
    let mut out = format!("{}: {}", arg.name, arg.ty.py_type_quoted()?);
    if let Some(default) = &arg.default {
        out.push_str(" = ");
        out.push_str(&default.py_expr()?.0);
    }
    Ok(out)
}

fn write_function(func: &FunctionSpec, w: &mut FileWriter<'_>) -> Result<usize> {
    func.check_abstract_body()?;
    for overload in &func.overloads {
        write_function(&func.overload_variant(overload), w)?;
    }

    w.blank();
    for decorator in &func.decorators_py {
        w.line0(format!("@{decorator}"));
    }
    if func.is_static {
        w.line0("@classmethod");
    }
    if func.is_abstract {
        w.line0("@abc.abstractmethod");
    }
    let name = if func.is_constructor {
        "__init__"
    } else {
        func.name.as_str()
    };
    let def = if func.is_async { "async def" } else { "def" };
    w.line0(format!("{def} {name}("));
    {
        let mut inner = w.with_more_indent();
        if func.is_method {
            inner.line0(if func.is_static { "class_," } else { "self," });
        }
        for arg in &func.pargs {
            inner.line0(format!("{},", py_arg(arg)?));
        }
        if !func.kwargs.is_empty() {
            inner.line0("*,");
            for arg in &func.kwargs {
                inner.line0(format!("{},", py_arg(arg)?));
            }
        }
    }
    let ret = match &func.ret {
        ReturnType::NoReturn => "None".to_string(),
        ReturnType::Type(ty) => ty.py_type_quoted()?,
    };
    w.line0(format!(") -> {ret}:"));

    let mut inner = w.with_more_indent();
    if !func.docstring.is_empty() {
        inner.line0("\"\"\"");
        for line in &func.docstring {
            inner.line0(line);
        }
        inner.line0("\"\"\"");
    }
    let count = write_block(&func.body, &mut inner)?;
    if func.is_abstract {
        inner.line0("...");
    } else if count == 0 {
        inner.line0("pass");
    }
    Ok(1)
}

fn write_class(class: &ClassSpec, w: &mut FileWriter<'_>) -> Result<usize> {
    if class.py_dataclass {
        w.line0("@dataclass");
    }
    let mut bases = class.py_bases.clone();
    if class.is_abstract {
        bases.push("abc.ABC".to_string());
    }
    if bases.is_empty() {
        w.line0(format!("class {}:", class.name));
    } else {
        w.line0(format!("class {}({}):", class.name, bases.join(", ")));
    }

    // Functions open with their own blank line, which separates the members.
    let mut inner = w.with_more_indent();
    let mut has_body = false;
    if !class.docstring.is_empty() {
        inner.line0("\"\"\"");
        for line in &class.docstring {
            inner.line0(line);
        }
        inner.line0("\"\"\"");
        has_body = true;
    }
    for prop in &class.properties {
        // Defaults live in the constructor, dataclass or not.
        inner.line0(format!("{}: {}", prop.name, prop.ty.py_type_quoted()?));
        has_body = true;
    }
    if let Some(ctor) = class.constructor_for(PY)? {
        write_function(&ctor, &mut inner)?;
        has_body = true;
    }
    for method in &class.methods {
        write_function(method, &mut inner)?;
        has_body = true;
    }
    for remark in &class.remarks {
        inner.line0(format!("# {remark}"));
    }
    if !has_body {
        inner.line0("pass");
    }
    w.blank();
    Ok(1)
}

/// Render a whole script as a Python module.
pub(crate) fn emit(script: &Script, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    let mut w = FileWriter::new(&mut out, &options.indent);

    if !script.file_comments.is_empty() {
        w.line0("\"\"\"");
        for comment in &script.file_comments {
            w.line0(comment);
        }
        w.line0("\"\"\"");
    }

    let groups = aggregate(script.imports(PY)?);
    if !groups.modules.is_empty() {
        for module in &groups.modules {
            w.line0(format!("import {module}"));
        }
        w.blank();
    }
    if !groups.names.is_empty() {
        for (module, names) in &groups.names {
            w.line0(format!("from {module} import {}", names.join(", ")));
        }
        w.blank();
    }

    if !script.new_types.is_empty() {
        for decl in &script.new_types {
            w.line0(format!(
                "{} = NewType({}, {})",
                decl.name,
                py_repr_str(&decl.name),
                decl.base.py_type_quoted()?
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
        PanCall, exacteq_, isnull, not_, or_, pan, pan_omit, pannotomit, pyexpr, tsexpr,
    };
    use crate::types::{
        CustomType, callable, dictof, lit, listof, mapof, maybe, omittable, setof, unionof,
    };

    fn ty(t: &CrossType) -> String {
        t.py_type_quoted().unwrap()
    }

    fn expr(e: &PanExpr) -> String {
        e.py_expr().unwrap().0
    }

    #[test]
    fn test_flat_types() {
        assert_eq!(ty(&CrossType::Any), "Any");
        assert_eq!(ty(&CrossType::Str), "str");
        assert_eq!(ty(&CrossType::Num), "int");
        assert_eq!(ty(&CrossType::Bool), "bool");
        assert_eq!(ty(&CrossType::Null), "None");
        assert_eq!(ty(&CrossType::Omit), "'builtins.ellipsis'");
    }

    #[test]
    fn test_composite_types() {
        assert_eq!(ty(&listof(listof(CrossType::Str))), "List[List[str]]");
        assert_eq!(ty(&setof(CrossType::Num)), "Set[int]");
        assert_eq!(ty(&dictof(CrossType::Str, CrossType::Num)), "Dict[str, int]");
        assert_eq!(ty(&mapof(CrossType::Str, CrossType::Num)), "Mapping[str, int]");
        assert_eq!(ty(&maybe(CrossType::Str)), "Optional[str]");
        assert_eq!(
            ty(&callable([CrossType::Str, CrossType::Num], CrossType::Bool)),
            "Callable[[str, int], bool]"
        );
        assert_eq!(
            ty(&unionof([CrossType::Bool, CrossType::Omit])),
            "'Union[bool, builtins.ellipsis]'"
        );
    }

    #[test]
    fn test_literal_type_ordering() {
        assert_eq!(
            ty(&lit::<crate::types::LiteralValue>([
                2.into(),
                "b".into(),
                false.into(),
                "a".into(),
                1.into(),
                true.into(),
            ])),
            "Literal[True, False, 1, 2, 'a', 'b']"
        );
    }

    #[test]
    fn test_custom_type_is_quoted_and_required() {
        let foo: CrossType = CustomType::new().python("Foo").into();
        assert_eq!(ty(&listof(foo)), "'List[Foo]'");
        let ts_only: CrossType = CustomType::new().typescript("Foo").into();
        let err = ts_only.py_type().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CustomType was not given a Python implementation"
        );
        assert!(CrossType::TypeScriptOnly("X".into()).py_type().is_err());
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr(&pan("")), "''");
        assert_eq!(expr(&pan("'")), "\"'\"");
        assert_eq!(expr(&pan(true)), "True");
        assert_eq!(expr(&pan(Option::<bool>::None)), "None");
        assert_eq!(expr(&pan(-5)), "-5");
        assert_eq!(expr(&pan_omit()), "...");
    }

    #[test]
    fn test_or_as_property_base_is_wrapped() {
        let a = PanExpr::var("a", Some(CrossType::Bool));
        let b = PanExpr::var("b", Some(CrossType::Bool));
        let e = pyexpr("x or y").getprop("real", CrossType::Num);
        assert_eq!(expr(&e), "(x or y).real");
        let tight = PanExpr::prop("child", CrossType::Any).getprop("name", CrossType::Str);
        assert_eq!(expr(&tight), "self.child.name");
        assert_eq!(expr(&or_([a, b])), "bool(a or b)");
    }

    #[test]
    fn test_negation_folding() {
        let x = PanExpr::var("x", None);
        assert_eq!(expr(&not_(isnull(x.clone()))), "x is not None");
        assert_eq!(expr(&not_(exacteq_(x.clone(), pan(1)))), "x != 1");
        assert_eq!(expr(&not_(exacteq_(x.clone(), pan_omit()))), "x != (...)");
        assert_eq!(expr(&not_(x.clone())), "not x");
        assert_eq!(expr(&not_(not_(x))), "x");
    }

    #[test]
    fn test_fallback_access() {
        let d = PanExpr::var("d", Some(dictof(CrossType::Str, CrossType::Num)));
        assert_eq!(expr(&d.clone().getitem("k")), "d['k']");
        assert_eq!(expr(&d.getitem_or("k", 0)), "d.get('k', 0)");
        let l = PanExpr::var("l", Some(listof(CrossType::Num)));
        assert_eq!(expr(&l.getindex_or(2, -1)), "l[2] if len(l) > 2 else -1");
    }

    #[test]
    fn test_calls() {
        let call = PanCall::function("make")
            .arg(1)
            .kwarg("flag", true)
            .unwrap();
        assert_eq!(expr(&call.into()), "make(1, flag=True)");
        assert_eq!(expr(&PanCall::construct("Class1").arg(66).into()), "Class1(66)");
        let method = PanExpr::var("items", None).call_method("append", vec![pan(1)]);
        assert_eq!(expr(&method), "items.append(1)");
    }

    #[test]
    fn test_string_builder_escapes_braces() {
        let who = PanExpr::var("who", Some(CrossType::Str));
        let e = PanExpr::string_builder(["Hello {".into(), who.into(), "} \"!\"".into()]);
        assert_eq!(expr(&e), "f\"Hello {{{who}}} \\\"!\\\"\"");
    }

    #[test]
    fn test_other_target_escape_hatches_fail() {
        assert!(matches!(
            tsexpr("x!").py_expr(),
            Err(EmitError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_not_omitted() {
        let a = PanExpr::var("a", Some(omittable(CrossType::Num)));
        assert_eq!(expr(&pannotomit(a)), "not isinstance(a, type(...))");
    }
}
