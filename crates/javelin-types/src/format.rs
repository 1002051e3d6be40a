//! Java-like, stable renderings of the type model, intended for diagnostics.

use std::fmt;

use crate::ty::{ClassType, FunctionType, Primitive, Reference, Type, Wildcard};

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.pkg.is_empty() {
            write!(f, "{}.", self.pkg)?;
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&component.name)?;
            if !component.type_args.is_empty() {
                f.write_str("<")?;
                for (j, arg) in component.type_args.iter().enumerate() {
                    if j > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?")?;
        if let Some(upper) = &self.upper {
            write!(f, " extends {upper}")?;
        }
        if let Some(lower) = &self.lower {
            write!(f, " super {lower}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Clazz(c) => write!(f, "{c}"),
            Reference::Array(element) => write!(f, "{element}[]"),
            Reference::Variable(name) => f.write_str(name),
            Reference::Wildcard(w) => write!(f, "{w}"),
            Reference::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_args.is_empty() {
            f.write_str("<")?;
            for (i, v) in self.type_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(v)?;
            }
            f.write_str("> ")?;
        }
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{p}"),
            Type::Reference(r) => write!(f, "{r}"),
            Type::Function(func) => write!(f, "{func}"),
        }
    }
}
