//! Typed argument values that fill a format URL's verbs and come back out of
//! an extraction.

use std::fmt;

/// One value bound to a verb.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Bool(bool),
    Int(i64),
    Char(char),
    Float(f64),
    /// Produced by the Unicode code-point verb, which carries no value back.
    Nil,
}

impl Arg {
    /// Short type name used in fill error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Bool(_) => "bool",
            Arg::Int(_) => "int",
            Arg::Char(_) => "char",
            Arg::Float(_) => "float",
            Arg::Nil => "nil",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Arg::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Char(c) => write!(f, "{}", c),
            Arg::Float(x) => write!(f, "{}", x),
            Arg::Nil => f.write_str("<nil>"),
        }
    }
}

/// Renders a list of args as `[a b c]`.
pub struct ArgList<'a>(pub &'a [Arg]);

impl fmt::Display for ArgList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str("]")
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

impl From<f64> for Arg {
    fn from(x: f64) -> Self {
        Arg::Float(x)
    }
}

impl From<f32> for Arg {
    fn from(x: f32) -> Self {
        Arg::Float(x as f64)
    }
}

macro_rules! int_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(n: $t) -> Self {
                    Arg::Int(n as i64)
                }
            }
        )*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);
