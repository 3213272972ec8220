use crate::objects::Dictionary;
use std::fmt;

/// Number of an indirect object. Everything this crate writes is generation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u16 {
        0
    }
}

impl From<u32> for ObjectId {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

/// The object kinds the writer emits
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// Text string; encoded and escaped on output
    String(String),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjectId),
}

impl Object {
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Object {
                fn from(value: $ty) -> Self {
                    Object::Integer(value as i64)
                }
            }
        )*
    };
}

integer_conversions!(i32, i64, u32, usize);

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Real(value)
    }
}

impl From<String> for Object {
    fn from(text: String) -> Self {
        Object::String(text)
    }
}

impl From<&str> for Object {
    fn from(text: &str) -> Self {
        Object::String(text.to_owned())
    }
}

impl<T: Into<Object>> From<Vec<T>> for Object {
    fn from(items: Vec<T>) -> Self {
        Object::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}
