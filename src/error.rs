use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// The kind of a dynamic value, as reported in type and shape failures.
///
/// `Absent` stands for a value that is not there at all (a missing object
/// field), which is distinct from an explicit JSON `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Absent,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn of(input: Option<&Value>) -> Self {
        match input {
            None => Kind::Absent,
            Some(Value::Null) => Kind::Null,
            Some(Value::Bool(_)) => Kind::Boolean,
            Some(Value::Number(_)) => Kind::Number,
            Some(Value::String(_)) => Kind::String,
            Some(Value::Array(_)) => Kind::Array,
            Some(Value::Object(_)) => Kind::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Absent => "absent",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structural shape a container decoder expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    Array,
    Object,
    Tuple { len: usize },
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Array => f.write_str("array"),
            Shape::Object => f.write_str("object"),
            Shape::Tuple { len } => write!(f, "array of length {}", len),
        }
    }
}

/// One step from the decode root towards the point of failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ErrorKind {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: Kind },

    #[error("expected literal {expected}, found {}", describe_value(.found))]
    ValueMismatch {
        expected: Value,
        found: Option<Value>,
    },

    #[error("expected {expected}, found {found}")]
    ShapeMismatch { expected: Shape, found: String },

    #[error("missing required field {field:?}")]
    MissingField { field: String },

    #[error("no alternative matched ({} tried)", .errors.len())]
    UnionExhausted { errors: Vec<DecodeError> },

    #[error("invalid timestamp {found}: {reason}")]
    InvalidTimestamp { found: String, reason: String },

    #[error("duplicate value, first seen at index {first}")]
    DuplicateValue { first: usize },

    #[error("duplicate key, first seen at index {first}")]
    DuplicateKey { first: usize },

    #[error("input nested deeper than {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize },
}

/// A structured decoding failure: what went wrong, and where in the input.
///
/// The path is relative to the decoder that produced the error; composite
/// decoders prepend their own field name or index as the error bubbles up.
///
/// ```
/// use json_decoder::{array, string, Decoder, PathSegment};
/// use serde_json::json;
///
/// let err = array(string()).decode(&json!(["a", 2])).unwrap_err();
/// assert_eq!(err.path, vec![PathSegment::Index(1)]);
/// assert_eq!("expected string, found number at $[1]", err.to_string());
/// ```
#[derive(Clone, Debug, PartialEq, Error, Serialize)]
#[error("{kind} at {}", render_path(.path))]
pub struct DecodeError {
    pub path: VecDeque<PathSegment>,
    #[serde(flatten)]
    pub kind: ErrorKind,
}

impl DecodeError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            path: VecDeque::new(),
            kind,
        }
    }

    pub fn type_mismatch(expected: &'static str, input: Option<&Value>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected,
            found: Kind::of(input),
        })
    }

    pub fn shape_mismatch(expected: Shape, input: Option<&Value>) -> Self {
        Self::new(ErrorKind::ShapeMismatch {
            expected,
            found: describe_shape(input),
        })
    }

    /// Prepends `segment` to this error's path.
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.push_front(segment.into());
        self
    }

    pub fn instance_path(&self) -> Vec<String> {
        self.path
            .iter()
            .map(|segment| match segment {
                PathSegment::Field(name) => name.clone(),
                PathSegment::Index(index) => index.to_string(),
            })
            .collect()
    }
}

fn render_path(path: &VecDeque<PathSegment>) -> String {
    let mut out = "$".to_owned();
    for segment in path {
        out.push_str(&segment.to_string());
    }
    out
}

fn describe_value(value: &Option<Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => Kind::Absent.to_string(),
    }
}

fn describe_shape(input: Option<&Value>) -> String {
    match input {
        Some(Value::Array(arr)) => format!("array of length {}", arr.len()),
        _ => Kind::of(input).to_string(),
    }
}
