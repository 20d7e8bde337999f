//! PHP writer.
//!
//! PHP has no type aliases, no keyword arguments and no omission sentinel;
//! those constructs fail with [`EmitError::NotSupported`]. Types render as
//! `(strict_type, doc_type, self_contained)`: the strict type goes into
//! signatures when PHP can express it, the doc type into `@var` docblocks.

use std::collections::BTreeMap;

use super::{FileWriter, doc_block, php_str};
use crate::expr::{BoolOp, Callee, CompareOp, PanExpr, StringPart, TypeCheck};
use crate::precedence::{PhpPrecedence, wrap_dot, wrap_mult};
use crate::script::{RenderOptions, Script};
use crate::stmt::{
    ClassSpec, FunctionSpec, HardCoded, InterfaceSpec, RaiseMessage, ReturnType, Statement,
    Statements, TryCatchBlock,
};
use crate::target::Target;
use crate::traits::{EmitError, Result, Writer};
use crate::types::{CrossType, LiteralValue};

const PHP: Target = Target::Php;

/// Static instance of the PHP writer for registry.
pub static PHP_WRITER: PhpWriterImpl = PhpWriterImpl;

/// PHP writer implementing the Writer trait.
pub struct PhpWriterImpl;

impl Writer for PhpWriterImpl {
    fn target(&self) -> Target {
        PHP
    }

    fn write(&self, script: &Script, options: &RenderOptions) -> Result<String> {
        emit(script, options)
    }
}

fn php_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Int(i) => i.to_string(),
        LiteralValue::Str(s) => php_str(s),
    }
}

/// Rendered PHP type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpTypes {
    /// Type usable in a signature, if PHP has one.
    pub lang: Option<String>,
    /// Type for docblocks.
    pub doc: String,
    /// Whether `doc` can take an `[]` suffix.
    pub self_contained: bool,
}

impl PhpTypes {
    fn new(lang: Option<&str>, doc: impl Into<String>, self_contained: bool) -> Self {
        Self {
            lang: lang.map(str::to_string),
            doc: doc.into(),
            self_contained,
        }
    }
}

impl CrossType {
    pub fn php_types(&self) -> Result<PhpTypes> {
        Ok(match self {
            CrossType::Any => PhpTypes::new(None, "mixed", true),
            CrossType::Str => PhpTypes::new(Some("string"), "string", true),
            CrossType::Num => PhpTypes::new(Some("int"), "int", true),
            CrossType::Bool => PhpTypes::new(Some("bool"), "boolean", true),
            CrossType::Null => PhpTypes::new(None, "null", true),
            CrossType::Omit => return Err(EmitError::not_supported("the omitted-argument type", PHP)),
            CrossType::Set(_) => return Err(EmitError::not_supported("set types", PHP)),
            CrossType::Literal(set) => match set.php_subtypes().as_slice() {
                [] => return Err(EmitError::logic("literal type without values")),
                [only] => PhpTypes::new(Some(*only), *only, true),
                many => PhpTypes::new(Some("mixed"), many.join("|"), false),
            },
            CrossType::Optional(inner) => {
                PhpTypes::new(None, format!("null|{}", inner.php_types()?.doc), false)
            }
            CrossType::List(inner) | CrossType::Dict(_, inner) => {
                let inner = inner.php_types()?;
                let doc = if inner.self_contained {
                    format!("{}[]", inner.doc)
                } else {
                    "mixed".to_string()
                };
                PhpTypes::new(Some("array"), doc, false)
            }
            CrossType::Map(..) => PhpTypes::new(Some("\\Ds\\Map"), "\\Ds\\Map", true),
            CrossType::Union(members) => {
                if members.is_empty() {
                    return Err(EmitError::logic("union without members"));
                }
                let mut parts = Vec::with_capacity(members.len());
                for member in members {
                    parts.push(member.php_types()?.doc);
                }
                PhpTypes::new(None, parts.join("|"), false)
            }
            CrossType::Callable { .. } => PhpTypes::new(None, "callable", true),
            CrossType::NewType { base, .. } => base.php_types()?,
            CrossType::Custom(custom) => match &custom.php {
                Some(php) => PhpTypes::new(php.lang.as_deref(), php.doc.clone(), false),
                None => return Err(EmitError::missing("CustomType", PHP)),
            },
            CrossType::PythonOnly { .. } => {
                return Err(EmitError::not_supported("Python-only type", PHP));
            }
            CrossType::TypeScriptOnly(_) => {
                return Err(EmitError::not_supported("TypeScript-only type", PHP));
            }
        })
    }
}

fn join_args(args: &[PanExpr]) -> Result<String> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        parts.push(arg.php_expr()?.0);
    }
    Ok(parts.join(", "))
}

impl PanExpr {
    /// PHP code for this expression and how tightly it binds.
    pub fn php_expr(&self) -> Result<(String, PhpPrecedence)> {
        use PhpPrecedence as P;
        Ok(match self {
            PanExpr::Literal(value) => (php_literal(value), P::Literal),
            PanExpr::Null => ("null".to_string(), P::Literal),
            PanExpr::Omit => return Err(EmitError::not_supported("omitted arguments", PHP)),
            PanExpr::List { values, .. } => (format!("[{}]", join_args(values)?), P::Literal),
            PanExpr::Dict { entries, .. } => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    parts.push(format!("{} => {}", php_str(key), value.php_expr()?.0));
                }
                (format!("[{}]", parts.join(", ")), P::Literal)
            }
            // PHP is dynamically typed; the cast only informs the other targets.
            PanExpr::Cast { value, .. } => return value.php_expr(),
            PanExpr::IndexAccess {
                target,
                index: key,
                fallback,
            }
            | PanExpr::KeyAccess {
                target,
                key,
                fallback,
            } => {
                let access = format!("{}[{}]", wrap_dot(target.php_expr()?), key.php_expr()?.0);
                match fallback {
                    None => (access, P::Arrow),
                    Some(fallback) => (
                        format!("{access} ?? {}", wrap_mult(fallback.php_expr()?)),
                        P::MultDiv,
                    ),
                }
            }
            PanExpr::Var { name, .. } => (format!("${name}"), P::Literal),
            PanExpr::Prop { name, owner, .. } => match owner {
                None => (format!("$this->{name}"), P::Arrow),
                Some(owner) => (format!("{}->{name}", wrap_dot(owner.php_expr()?)), P::Arrow),
            },
            PanExpr::Call(call) => {
                if !call.kwargs.is_empty() {
                    return Err(EmitError::not_supported("keyword arguments", PHP));
                }
                let args = join_args(&call.args)?;
                match &call.callee {
                    Callee::Function(name) if call.constructor => {
                        (format!("new {name}({args})"), P::MultDiv)
                    }
                    Callee::Function(name) => (format!("{name}({args})"), P::Arrow),
                    Callee::Expr(expr) => {
                        let callee = wrap_dot(expr.php_expr()?);
                        if call.constructor {
                            (format!("new {callee}({args})"), P::MultDiv)
                        } else {
                            (format!("{callee}({args})"), P::Arrow)
                        }
                    }
                }
            }
            PanExpr::StringBuilder(parts) => {
                if parts.is_empty() {
                    return Ok(("''".to_string(), P::Literal));
                }
                let mut pieces = Vec::with_capacity(parts.len());
                for part in parts {
                    match part {
                        StringPart::Text(text) => pieces.push(php_str(text)),
                        StringPart::Expr(expr) => pieces.push(wrap_mult(expr.php_expr()?)),
                    }
                }
                (pieces.join(" . "), P::MultDiv)
            }
            PanExpr::PhpOnly { code, prec } => (code.clone(), *prec),
            PanExpr::PyOnly { .. } => {
                return Err(EmitError::not_supported("Python-only expression", PHP));
            }
            PanExpr::TsOnly { .. } => {
                return Err(EmitError::not_supported("TypeScript-only expression", PHP));
            }
            PanExpr::AndOr { op, args } => {
                let mut parts = Vec::with_capacity(args.len());
                for arg in args {
                    parts.push(wrap_dot(arg.php_expr()?));
                }
                match parts.as_slice() {
                    [] => return Err(EmitError::logic("boolean combinator without operands")),
                    [only] => (format!("(bool){only}"), P::MultDiv),
                    _ => {
                        let joiner = match op {
                            BoolOp::And => " && ",
                            BoolOp::Or => " || ",
                        };
                        (parts.join(joiner), P::MultDiv)
                    }
                }
            }
            PanExpr::Not(inner) => match inner.negated() {
                Some(negated) => return negated.php_expr(),
                None => (format!("!{}", wrap_mult(inner.php_expr()?)), P::MultDiv),
            },
            PanExpr::Length(inner) => (format!("count({})", inner.php_expr()?.0), P::Literal),
            PanExpr::IsNull { target, negated } => {
                let op = if *negated { "!==" } else { "===" };
                (format!("{} {op} null", wrap_dot(target.php_expr()?)), P::MultDiv)
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
                        wrap_mult(left.php_expr()?),
                        wrap_mult(right.php_expr()?)
                    ),
                    P::MultDiv,
                )
            }
            PanExpr::IsType { value, check } => {
                let function = match check {
                    TypeCheck::Str => "is_string",
                    TypeCheck::Int => "is_int",
                    TypeCheck::Bool => "is_bool",
                    TypeCheck::List => "is_array",
                };
                (format!("{function}({})", value.php_expr()?.0), P::Arrow)
            }
            PanExpr::NotOmitted(_) => {
                return Err(EmitError::not_supported("omitted arguments", PHP));
            }
            PanExpr::Await(_) => return Err(EmitError::not_supported("await", PHP)),
            PanExpr::HardCoded(hard) => match &hard.php {
                Some((render, prec)) => (render(), *prec),
                None => return Err(EmitError::missing("HardCodedExpr", PHP)),
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
        Statement::Expr(expr) => w.line0(format!("{};", expr.php_expr()?.0)),
        Statement::HardCoded(hard) => match &hard.php {
            HardCoded::Missing => return Err(EmitError::missing("HardCodedStatement", PHP)),
            HardCoded::Omitted => {}
            HardCoded::Code(code) => w.line0(code),
        },
        Statement::Raise(raise) => {
            let message = match &raise.message {
                RaiseMessage::Text(text) => php_str(text),
                RaiseMessage::Expr(expr) => expr.php_expr()?.0,
            };
            w.line0(format!("throw new {}({message});", raise.ctor_for(PHP)));
        }
        Statement::Return(value) => {
            if value.is_omit() {
                w.line0("return;");
            } else {
                w.line0(format!("return {};", value.php_expr()?.0));
            }
        }
        Statement::Assign(assign) => {
            let Some(value) = &assign.value else {
                return Err(EmitError::not_supported("declaring a variable without a value", PHP));
            };
            if let Some(ty) = &assign.declared_type {
                w.line0(format!("/** @var {} */", ty.php_types()?.doc));
            }
            w.line0(format!(
                "{} = {};",
                assign.target.php_expr()?.0,
                value.php_expr()?.0
            ));
        }
        Statement::ListAppend(append) => w.line0(format!(
            "{}[] = {};",
            wrap_dot(append.list.php_expr()?),
            append.value.php_expr()?.0
        )),
        Statement::DictBuilder(builder) => {
            if builder.entries.iter().any(|e| e.allow_omit) {
                return Err(EmitError::not_supported("omittable dict builder entries", PHP));
            }
            let dict_type = CrossType::Dict(
                Box::new(builder.key_type.clone()),
                Box::new(builder.value_type.clone()),
            );
            w.line0(format!("/** @var {} */", dict_type.php_types()?.doc));
            let mut parts = Vec::with_capacity(builder.entries.len());
            for entry in &builder.entries {
                parts.push(format!("{} => {}", php_str(&entry.key), entry.value.php_expr()?.0));
            }
            w.line0(format!("${} = [{}];", builder.var, parts.join(", ")));
        }
        Statement::Conditional(cond) => {
            w.line0(format!("if ({}) {{", cond.expr.php_expr()?.0));
            write_block(&cond.body, &mut w.with_more_indent())?;
            for (expr, body) in &cond.elifs {
                w.line0(format!("}} elseif ({}) {{", expr.php_expr()?.0));
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
                "foreach ({} as {}) {{",
                looped.iterable.php_expr()?.0,
                looped.var.php_expr()?.0
            ));
            write_block(&looped.body, &mut w.with_more_indent())?;
            w.line0("}");
            w.blank();
        }
        Statement::DictLoop(looped) => {
            let mut assign_to = looped.value.php_expr()?.0;
            if let Some(key) = &looped.key {
                assign_to = format!("{} => {assign_to}", key.php_expr()?.0);
            }
            w.line0(format!(
                "foreach ({} as {assign_to}) {{",
                looped.iterable.php_expr()?.0
            ));
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

fn write_try(block: &TryCatchBlock, w: &mut FileWriter<'_>) -> Result<()> {
    block.check_has_handlers()?;
    w.line0("try {");
    write_block(&block.body, &mut w.with_more_indent())?;
    for arm in &block.catches {
        let class = arm.classes.php.as_deref().unwrap_or("\\Exception");
        let var = arm.var.as_deref().unwrap_or("_");
        w.line0(format!("}} catch ({class} ${var}) {{"));
        write_block(&arm.body, &mut w.with_more_indent())?;
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
    if func.is_async {
        return Err(EmitError::not_supported("async functions", PHP));
    }
    if !func.overloads.is_empty() {
        return Err(EmitError::not_supported("function overloads", PHP));
    }
    if !func.kwargs.is_empty() {
        return Err(EmitError::not_supported("keyword arguments", PHP));
    }

    if !func.docstring.is_empty() {
        for line in doc_block(&func.docstring) {
            w.line0(line);
        }
    }

    let mut prefix: Vec<&str> = Vec::new();
    if func.is_abstract {
        prefix.push("abstract");
    }
    if func.is_static {
        prefix.push("static");
    }
    if func.is_method {
        prefix.push("public");
    }
    prefix.push("function");
    let name = if func.is_constructor {
        "__construct"
    } else {
        func.name.as_str()
    };
    w.line0(format!("{} {name}(", prefix.join(" ")));

    let last = func.pargs.len().saturating_sub(1);
    for (i, arg) in func.pargs.iter().enumerate() {
        let mut line = format!("${}", arg.name);
        if let Some(lang) = arg.ty.php_types()?.lang {
            line.insert_str(0, &format!("{lang} "));
        }
        if let Some(default) = &arg.default {
            line.push_str(" = ");
            line.push_str(&default.php_expr()?.0);
        }
        if i != last {
            line.push(',');
        }
        w.line1(line);
    }

    let mut ret = String::new();
    if !func.is_constructor {
        if let ReturnType::Type(ty) = &func.ret {
            if let Some(lang) = ty.php_types()?.lang {
                ret = format!(": {lang}");
            }
        }
    }
    if func.is_abstract {
        w.line0(format!("){ret};"));
    } else {
        w.line0(format!("){ret} {{"));
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
    if class.is_abstract {
        head.push_str("abstract ");
    }
    head.push_str("class ");
    head.push_str(&class.name);
    if let Some(parent) = &class.php_parent {
        head.push_str(" extends ");
        head.push_str(parent);
    }
    w.line0(format!("{head} {{"));

    let mut inner = w.with_more_indent();
    let mut need_blank = false;
    for prop in &class.properties {
        inner.line0(format!("/** @var {} */", prop.ty.php_types()?.doc));
        let mut line = format!("public ${}", prop.name);
        if let Some(default) = prop.default.as_ref().filter(|d| d.is_literal()) {
            line.push_str(" = ");
            line.push_str(&default.php_expr()?.0);
        }
        line.push(';');
        inner.line0(line);
        need_blank = true;
    }
    if let Some(ctor) = class.constructor_for(PHP)? {
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
    if !iface.properties.is_empty() {
        return Err(EmitError::not_supported("interface properties", PHP));
    }
    w.line0(format!("interface {} {{", iface.name));
    w.line0("}");
    Ok(())
}

/// Render a whole script as a PHP file.
pub(crate) fn emit(script: &Script, options: &RenderOptions) -> Result<String> {
    let mut out = String::new();
    let mut w = FileWriter::new(&mut out, &options.indent);

    w.line0("<?php");
    w.blank();

    if !script.file_comments.is_empty() {
        for comment in &script.file_comments {
            w.line0(format!("// {comment}").trim_end());
        }
        w.blank();
    }

    if let Some(namespace) = &options.php_namespace {
        w.line0(format!("namespace {namespace};"));
        w.blank();
    }

    // `use` lines are sorted by namespace; an alias is carried as the name.
    let mut uses: BTreeMap<String, Vec<Option<String>>> = BTreeMap::new();
    for spec in script.imports(PHP)? {
        let aliases = uses.entry(spec.module).or_default();
        if !aliases.contains(&spec.name) {
            aliases.push(spec.name);
        }
    }
    if !uses.is_empty() {
        for (module, mut aliases) in uses {
            aliases.sort();
            for alias in aliases {
                match alias {
                    Some(alias) => w.line0(format!("use {module} as {alias};")),
                    None => w.line0(format!("use {module};")),
                }
            }
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
        PanCall, await_, exacteq_, isint, isnull, not_, or_, pan, pan_omit, phpexpr,
    };
    use crate::stmt::{AcceptsStatements, ExceptionClasses};
    use crate::types::{CustomType, dictof, lit, listof, mapof, maybe, omittable, setof};

    fn types(t: &CrossType) -> (Option<String>, String) {
        let rendered = t.php_types().unwrap();
        (rendered.lang, rendered.doc)
    }

    fn expr(e: &PanExpr) -> String {
        e.php_expr().unwrap().0
    }

    fn render(block: &Statements) -> Result<String> {
        let mut out = String::new();
        write_block(block, &mut FileWriter::new(&mut out, "    "))?;
        Ok(out)
    }

    #[test]
    fn test_types() {
        assert_eq!(types(&CrossType::Any), (None, "mixed".to_string()));
        assert_eq!(
            types(&CrossType::Bool),
            (Some("bool".to_string()), "boolean".to_string())
        );
        assert_eq!(
            types(&listof(CrossType::Str)),
            (Some("array".to_string()), "string[]".to_string())
        );
        assert_eq!(
            types(&listof(maybe(CrossType::Str))),
            (Some("array".to_string()), "mixed".to_string())
        );
        assert_eq!(
            types(&dictof(CrossType::Str, CrossType::Num)),
            (Some("array".to_string()), "int[]".to_string())
        );
        assert_eq!(types(&maybe(CrossType::Num)), (None, "null|int".to_string()));
        assert_eq!(
            types(&lit(["a", "b"])),
            (Some("string".to_string()), "string".to_string())
        );
        assert_eq!(
            types(&lit::<crate::types::LiteralValue>(["a".into(), 1.into(), true.into()])),
            (Some("mixed".to_string()), "bool|int|string".to_string())
        );
        assert_eq!(
            types(&mapof(CrossType::Str, CrossType::Num)).1,
            "\\Ds\\Map"
        );
    }

    #[test]
    fn test_unsupported_types() {
        assert!(matches!(
            setof(CrossType::Str).php_types(),
            Err(EmitError::NotSupported { .. })
        ));
        assert!(omittable(CrossType::Str).php_types().is_err());
        let custom: CrossType = CustomType::new().php(Some("\\DateTime"), "\\DateTime").into();
        assert_eq!(
            types(&custom),
            (Some("\\DateTime".to_string()), "\\DateTime".to_string())
        );
        let ts_only: CrossType = CustomType::new().typescript("Date").into();
        assert_eq!(
            ts_only.php_types().unwrap_err().to_string(),
            "CustomType was not given a PHP implementation"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr(&pan("")), "''");
        assert_eq!(expr(&pan("it's")), "'it\\'s'");
        assert_eq!(expr(&pan(false)), "false");
        assert_eq!(expr(&pan(Option::<&str>::None)), "null");
        assert!(pan_omit().php_expr().is_err());
    }

    #[test]
    fn test_access_and_calls() {
        let obj = PanExpr::var("obj", None);
        assert_eq!(expr(&obj.clone().getprop("name", CrossType::Str)), "$obj->name");
        assert_eq!(expr(&PanExpr::prop("name", CrossType::Str)), "$this->name");
        assert_eq!(
            expr(&obj.clone().call_method("save", vec![pan(1)])),
            "$obj->save(1)"
        );
        assert_eq!(
            expr(&PanCall::construct("Pet").arg("Rex").into()),
            "new Pet('Rex')"
        );
        let d = PanExpr::var("d", Some(dictof(CrossType::Str, CrossType::Num)));
        assert_eq!(expr(&d.getitem_or("k", 0)), "$d['k'] ?? 0");
        assert_eq!(expr(&phpexpr("$a + $b").getprop("x", CrossType::Any)), "($a + $b)->x");
    }

    #[test]
    fn test_string_builder_concatenates() {
        let name = PanExpr::var("name", Some(CrossType::Str));
        let e = PanExpr::string_builder(["Hello, ".into(), name.into(), "!".into()]);
        assert_eq!(expr(&e), "'Hello, ' . $name . '!'");
    }

    #[test]
    fn test_boolean_logic() {
        let x = PanExpr::var("x", None);
        assert_eq!(expr(&or_([x.clone()])), "(bool)$x");
        assert_eq!(expr(&not_(isnull(x.clone()))), "$x !== null");
        assert_eq!(expr(&not_(exacteq_(x.clone(), pan(1)))), "$x !== 1");
        assert_eq!(expr(&isint(x.clone())), "is_int($x)");
        assert!(matches!(
            await_(x).php_expr(),
            Err(EmitError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_try_catch() {
        let mut block = Statements::new();
        block.with_try(|t| {
            t.also_return(pan(1));
            t.with_catch(Some("e"), ExceptionClasses::any().php("\\TypeError"), |c| {
                c.also_return(pan(2));
            });
            t.with_catch(None, ExceptionClasses::any(), |_| {});
            t.with_finally(|f| f.remark("done")).unwrap();
        });
        assert_eq!(
            render(&block).unwrap(),
            "try {\n    return 1;\n} catch (\\TypeError $e) {\n    return 2;\n} catch (\\Exception $_) {\n} finally {\n    // done\n}\n"
        );
    }

    #[test]
    fn test_declaration_needs_value() {
        let mut block = Statements::new();
        block.also_declare("x", CrossType::Num, None::<PanExpr>);
        assert!(matches!(
            render(&block),
            Err(EmitError::NotSupported { .. })
        ));

        let mut block = Statements::new();
        block.also_declare("x", listof(CrossType::Num), pan(Option::<i32>::None));
        assert_eq!(render(&block).unwrap(), "/** @var int[] */\n$x = null;\n");
    }
}
