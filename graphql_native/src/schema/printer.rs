//! Rendering of types into GraphQL IDL, and of values into GraphQL literals.

use std::{borrow::Cow, fmt, sync::Arc};

use indexmap::IndexMap;
use itertools::Itertools as _;
use serde_json::Value as JsonValue;

use crate::{
    ast::InputValue,
    error::SchemaError,
    schema::{
        meta::{Argument, Arguments, ContainerMeta, Field, MetaType, TypeRef, WrapMode},
        model::Schema,
    },
};

/// Argument lists and object literals longer than this go multi-line.
const INLINE_MAX: usize = 3;

/// Layout of rendered text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    /// Indentation level of the outermost line.
    pub indent: usize,
    /// Text repeated once per indentation level.
    pub indent_string: Cow<'static, str>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            indent_string: Cow::Borrowed("  "),
        }
    }
}

impl RenderOptions {
    /// No indentation at all, line breaks are kept.
    pub fn compact() -> Self {
        Self {
            indent: 0,
            indent_string: Cow::Borrowed(""),
        }
    }

    /// Sets the indentation level of the outermost line.
    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the text of one indentation level.
    #[must_use]
    pub fn indent_string(mut self, indent_string: impl Into<Cow<'static, str>>) -> Self {
        self.indent_string = indent_string.into();
        self
    }

    fn prefix(&self, level: usize) -> String {
        self.indent_string.repeat(level)
    }
}

/// Renders types, fields and arguments as GraphQL IDL, and input values as
/// GraphQL literals.
///
/// Lazy type references are resolved through the schema, if any. A
/// detached printer only renders what is already resolved.
#[derive(Clone, Debug)]
pub struct Printer<'a> {
    schema: Option<&'a Schema>,
    options: RenderOptions,
}

impl<'a> Printer<'a> {
    /// Printer over the types of `schema`.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema: Some(schema),
            options: RenderOptions::default(),
        }
    }

    /// Printer without schema.
    pub fn detached() -> Self {
        Self {
            schema: None,
            options: RenderOptions::default(),
        }
    }

    /// Sets the layout.
    #[must_use]
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// `schema {` followed by every registered type one level deeper, then
    /// `}`.
    pub fn print_schema(&self) -> Result<String, SchemaError> {
        let indent = self.options.indent;
        let mut lines = vec![format!("{}schema {{", self.options.prefix(indent))];
        for ty in self.schema.into_iter().flat_map(Schema::iter) {
            lines.push(self.type_idl(ty, indent + 1)?);
        }
        lines.push(format!("{}}}", self.options.prefix(indent)));
        Ok(lines.join("\n"))
    }

    /// IDL definition of `ty`.
    ///
    /// Wrappers have no definition of their own and render as their name.
    pub fn print_type(&self, ty: &MetaType) -> Result<String, SchemaError> {
        self.type_idl(ty, self.options.indent)
    }

    /// `name(arguments): Type`
    pub fn print_field(&self, field: &Field) -> Result<String, SchemaError> {
        self.field_idl(field, self.options.indent)
    }

    /// `name: Type`, followed by ` = default` if any.
    pub fn print_argument(&self, argument: &Argument) -> Result<String, SchemaError> {
        self.argument_idl(argument, self.options.indent)
    }

    /// Parenthesized argument definitions, empty if there are none.
    pub fn print_arguments(&self, arguments: &Arguments) -> Result<String, SchemaError> {
        self.arguments_idl(arguments, self.options.indent)
    }

    /// `value` written as a literal of type `ty`.
    pub fn print_literal(&self, ty: &MetaType, value: &InputValue) -> Result<String, SchemaError> {
        self.literal(ty, value, self.options.indent)
    }

    /// Parenthesized argument values for a query, keyed by argument attribute
    /// name; empty if there are none.
    pub fn print_argument_values(
        &self,
        arguments: &Arguments,
        values: &IndexMap<String, InputValue>,
    ) -> Result<String, SchemaError> {
        if values.is_empty() {
            return Ok(String::new());
        }
        let indent = self.options.indent;
        let inline = values.len() <= INLINE_MAX;
        let items = values
            .iter()
            .map(|(name, value)| -> Result<String, SchemaError> {
                let argument = arguments.get(name).ok_or_else(|| {
                    let container = arguments.container().cloned().unwrap_or_default();
                    SchemaError::missing_attribute(&container, name)
                })?;
                let arg_type = self.resolve(&argument.arg_type)?;
                let literal = self.literal(&arg_type, value, if inline { 0 } else { indent })?;
                Ok(format!("{}: {literal}", argument.wire_name()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(if inline {
            format!("({})", items.join(", "))
        } else {
            self.multiline("(", ")", &items, indent + 2, indent + 1)
        })
    }

    fn resolve(&self, type_ref: &TypeRef) -> Result<Arc<MetaType>, SchemaError> {
        match (self.schema, type_ref) {
            (_, TypeRef::Resolved(ty)) => Ok(ty.clone()),
            (Some(schema), _) => schema.resolve(type_ref),
            (None, _) => Err(SchemaError::UnresolvedType(type_ref.name().into())),
        }
    }

    fn multiline(
        &self,
        open: &str,
        close: &str,
        items: &[String],
        level: usize,
        close_level: usize,
    ) -> String {
        let prefix = self.options.prefix(level);
        let mut s = format!("{open}\n");
        for item in items {
            s.push_str(&prefix);
            s.push_str(item);
            s.push('\n');
        }
        s.push_str(&self.options.prefix(close_level));
        s.push_str(close);
        s
    }

    fn type_idl(&self, ty: &MetaType, indent: usize) -> Result<String, SchemaError> {
        let prefix = self.options.prefix(indent);
        let head = format!("{prefix}{} {}", ty.kind(), ty.name());
        Ok(match ty {
            MetaType::Scalar(_) => head,
            MetaType::Enum(e) => {
                let choice_prefix = self.options.prefix(indent + 1);
                let mut lines = vec![format!("{head} {{")];
                lines.extend(e.iter().map(|c| format!("{choice_prefix}{c}")));
                lines.push(format!("{prefix}}}"));
                lines.join("\n")
            }
            MetaType::Union(u) => format!("{head} = {}", u.iter().format(" | ")),
            MetaType::Object(c) | MetaType::Interface(c) | MetaType::InputObject(c) => {
                self.container_idl(head, c, indent)?
            }
            MetaType::Wrapped(w) => format!("{prefix}{}", w.name),
        })
    }

    fn container_idl(
        &self,
        head: String,
        container: &ContainerMeta,
        indent: usize,
    ) -> Result<String, SchemaError> {
        let mut first = head;
        if !container.interfaces().is_empty() {
            first.push_str(" implements ");
            first.push_str(&container.interfaces().iter().map(|i| i.name()).join(", "));
        }
        first.push_str(" {");

        let field_prefix = self.options.prefix(indent + 1);
        let mut lines = vec![first];
        for field in container.fields() {
            lines.push(format!("{field_prefix}{}", self.field_idl(field, indent)?));
        }
        lines.push(format!("{}}}", self.options.prefix(indent)));
        Ok(lines.join("\n"))
    }

    fn field_idl(&self, field: &Field, indent: usize) -> Result<String, SchemaError> {
        Ok(format!(
            "{}{}: {}",
            field.wire_name(),
            self.arguments_idl(&field.arguments, indent + 1)?,
            field.field_type,
        ))
    }

    fn arguments_idl(&self, arguments: &Arguments, indent: usize) -> Result<String, SchemaError> {
        if arguments.is_empty() {
            return Ok(String::new());
        }
        let items = arguments
            .iter()
            .map(|a| self.argument_idl(a, indent))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(if items.len() <= INLINE_MAX {
            format!("({})", items.join(", "))
        } else {
            self.multiline("(", ")", &items, indent + 1, indent)
        })
    }

    fn argument_idl(&self, argument: &Argument, indent: usize) -> Result<String, SchemaError> {
        let mut s = format!("{}: {}", argument.wire_name(), argument.arg_type);
        if let Some(default) = &argument.default_value {
            let arg_type = self.resolve(&argument.arg_type)?;
            s.push_str(" = ");
            s.push_str(&self.literal(&arg_type, default, indent)?);
        }
        Ok(s)
    }

    fn literal(
        &self,
        ty: &MetaType,
        value: &InputValue,
        indent: usize,
    ) -> Result<String, SchemaError> {
        match value {
            InputValue::Variable(name) => return Ok(format!("${name}")),
            InputValue::Null => return Ok("null".into()),
            _ => {}
        }
        let invalid = |reason: &'static str| {
            let json = value.to_json().unwrap_or(JsonValue::Null);
            SchemaError::invalid_value(ty.name(), &json, reason)
        };

        match ty {
            MetaType::Scalar(_) => Ok(match value.to_json() {
                Some(json) => json.to_string(),
                None => value.to_string(),
            }),
            MetaType::Enum(_) => match value {
                InputValue::Enum(e) => Ok(e.clone()),
                InputValue::Scalar(s) => s
                    .as_str()
                    .map(Into::into)
                    .ok_or_else(|| invalid("expected an enum value")),
                _ => Err(invalid("expected an enum value")),
            },
            MetaType::Union(_) => Err(invalid("unions have no literal form")),
            MetaType::Wrapped(w) => {
                let of_type = self.resolve(&w.of_type)?;
                match (w.mode, value) {
                    (WrapMode::List, InputValue::List(items)) => Ok(format!(
                        "[{}]",
                        items
                            .iter()
                            .map(|item| self.literal(&of_type, item, indent))
                            .collect::<Result<Vec<_>, _>>()?
                            .join(", "),
                    )),
                    _ => self.literal(&of_type, value, indent),
                }
            }
            MetaType::Object(c) | MetaType::Interface(c) | MetaType::InputObject(c) => {
                let InputValue::Object(entries) = value else {
                    return Err(invalid("expected an object"));
                };
                let items = entries
                    .iter()
                    .map(|(name, v)| -> Result<String, SchemaError> {
                        let field = c
                            .field(name)
                            .ok_or_else(|| SchemaError::missing_attribute(&c.name, name))?;
                        let field_type = self.resolve(&field.field_type)?;
                        let literal = self.literal(&field_type, v, indent)?;
                        Ok(format!("{}: {literal}", field.wire_name()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(if matches!(ty, MetaType::InputObject(_)) || items.len() <= INLINE_MAX {
                    format!("{{{}}}", items.join(", "))
                } else {
                    self.multiline("{", "}", &items, indent + 2, indent + 1)
                })
            }
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idl = Printer::new(self).print_schema().map_err(|_| fmt::Error)?;
        f.write_str(&idl)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idl = Printer::detached().print_field(self).map_err(|_| fmt::Error)?;
        f.write_str(&idl)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idl = Printer::detached().print_argument(self).map_err(|_| fmt::Error)?;
        f.write_str(&idl)
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idl = Printer::detached().print_arguments(self).map_err(|_| fmt::Error)?;
        f.write_str(&idl)
    }
}
