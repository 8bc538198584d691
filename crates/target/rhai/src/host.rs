//! Host value graph walked by the stringifier.
//!
//! Unlike [`Value`], arrays and objects here are shared through `Rc`, so a
//! graph may contain the same node under several parents or even a cycle.
//! The allocation address of a node is its identity.

use indexmap::IndexMap;
use rhizome_tessera_ir::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type SharedArray = Rc<RefCell<Vec<HostValue>>>;
pub type SharedObject = Rc<RefCell<IndexMap<String, HostValue>>>;

#[derive(Clone, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    /// A symbol with its optional description.
    Symbol(Option<String>),
    Function,
    Array(SharedArray),
    Object(SharedObject),
    Ref(String),
    Unknown,
}

impl HostValue {
    pub fn array(items: impl IntoIterator<Item = HostValue>) -> Self {
        HostValue::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, HostValue)>) -> Self {
        HostValue::Object(Rc::new(RefCell::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )))
    }

    pub fn string(value: impl Into<String>) -> Self {
        HostValue::String(value.into())
    }

    /// Identity of a composite node, `None` for scalars.
    pub fn identity(&self) -> Option<usize> {
        match self {
            HostValue::Array(items) => Some(Rc::as_ptr(items) as *const () as usize),
            HostValue::Object(entries) => Some(Rc::as_ptr(entries) as *const () as usize),
            _ => None,
        }
    }
}

// Derived Debug would recurse forever on cyclic graphs.
impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => write!(f, "Undefined"),
            HostValue::Null => write!(f, "Null"),
            HostValue::Bool(b) => write!(f, "Bool({})", b),
            HostValue::Number(n) => write!(f, "Number({})", n),
            HostValue::BigInt(n) => write!(f, "BigInt({})", n),
            HostValue::String(s) => write!(f, "String({:?})", s),
            HostValue::Symbol(description) => write!(f, "Symbol({:?})", description),
            HostValue::Function => write!(f, "Function"),
            HostValue::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len={})", items.len()),
                Err(_) => write!(f, "Array(<borrowed>)"),
            },
            HostValue::Object(entries) => match entries.try_borrow() {
                Ok(entries) => f
                    .debug_tuple("Object")
                    .field(&entries.keys().collect::<Vec<_>>())
                    .finish(),
                Err(_) => write!(f, "Object(<borrowed>)"),
            },
            HostValue::Ref(path) => write!(f, "Ref({})", path),
            HostValue::Unknown => write!(f, "Unknown"),
        }
    }
}

impl From<&Value> for HostValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => HostValue::Null,
            Value::Bool(b) => HostValue::Bool(*b),
            Value::Number(n) => HostValue::Number(*n),
            Value::String(s) => HostValue::String(s.clone()),
            Value::Array(items) => HostValue::array(items.iter().map(HostValue::from)),
            Value::Object(map) => HostValue::object(
                map.iter()
                    .map(|(key, value)| (key.clone(), HostValue::from(value))),
            ),
            Value::Ref(path) => HostValue::Ref(path.clone()),
            Value::Unknown => HostValue::Unknown,
        }
    }
}

impl From<Value> for HostValue {
    fn from(value: Value) -> Self {
        HostValue::from(&value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Number(value)
    }
}

impl From<i32> for HostValue {
    fn from(value: i32) -> Self {
        HostValue::Number(value.into())
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::String(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::String(value)
    }
}
