use crate::{DecodeError, Decoder, ErrorKind, IntoDecoder, PathSegment, Shape};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Matches one exact value.
///
/// Numbers are compared by numeric value, so `literal(1)` accepts both `1`
/// and `1.0`, also inside arrays and objects. Everything else must be
/// structurally equal; there is no coercion between kinds.
#[derive(Clone, Debug)]
pub struct Literal<T> {
    expected: T,
    value: Value,
}

pub fn literal<T>(expected: T) -> Literal<T>
where
    T: Clone + Into<Value>,
{
    Literal {
        value: expected.clone().into(),
        expected,
    }
}

impl<T: Clone> Decoder for Literal<T> {
    type Output = T;

    fn decode_input(&self, input: Option<&Value>) -> Result<T, DecodeError> {
        match input {
            Some(value) if strict_eq(&self.value, value) => Ok(self.expected.clone()),
            _ => Err(DecodeError::new(ErrorKind::ValueMismatch {
                expected: self.value.clone(),
                found: input.cloned(),
            })),
        }
    }
}

fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| strict_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).map_or(false, |b| strict_eq(a, b)))
        }
        _ => a == b,
    }
}

#[derive(Clone, Debug)]
pub struct Tuple<A, B> {
    first: A,
    second: B,
}

/// Decodes a two-element array positionally.
pub fn tuple<A, B>(first: A, second: B) -> Tuple<A::Decoder, B::Decoder>
where
    A: IntoDecoder,
    B: IntoDecoder,
{
    Tuple {
        first: first.into_decoder(),
        second: second.into_decoder(),
    }
}

impl<A: Decoder, B: Decoder> Decoder for Tuple<A, B> {
    type Output = (A::Output, B::Output);

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        match input {
            Some(Value::Array(arr)) if arr.len() == 2 => {
                let first = self
                    .first
                    .decode(&arr[0])
                    .map_err(|err| err.at(PathSegment::Index(0)))?;
                let second = self
                    .second
                    .decode(&arr[1])
                    .map_err(|err| err.at(PathSegment::Index(1)))?;
                Ok((first, second))
            }
            _ => Err(DecodeError::shape_mismatch(Shape::Tuple { len: 2 }, input)),
        }
    }
}

/// A record whose fields all decode to the same type.
///
/// Fields are decoded in declaration order and the output holds exactly the
/// declared names. Input fields that are not declared are ignored. For
/// records with differently typed fields, see [`record!`][crate::record!].
#[derive(Clone, Debug)]
pub struct Record<D> {
    fields: Vec<(String, D)>,
}

pub fn record<K, S, I>(fields: I) -> Record<S::Decoder>
where
    K: Into<String>,
    S: IntoDecoder,
    I: IntoIterator<Item = (K, S)>,
{
    Record {
        fields: fields
            .into_iter()
            .map(|(name, schema)| (name.into(), schema.into_decoder()))
            .collect(),
    }
}

impl<D: Decoder> Decoder for Record<D> {
    type Output = BTreeMap<String, D::Output>;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        let object = expect_object(input)?;
        let mut out = BTreeMap::new();
        for (name, decoder) in &self.fields {
            out.insert(name.clone(), decode_field(object, name, decoder)?);
        }

        Ok(out)
    }
}

/// Returns the input as a JSON object, or a shape failure.
pub fn expect_object(input: Option<&Value>) -> Result<&Map<String, Value>, DecodeError> {
    match input {
        Some(Value::Object(obj)) => Ok(obj),
        _ => Err(DecodeError::shape_mismatch(Shape::Object, input)),
    }
}

/// Decodes field `name` of `object`, passing an absent input if the field is
/// missing. Failures are reported under the field's name; a missing field
/// the decoder does not accept is reported as [`ErrorKind::MissingField`].
pub fn decode_field<D: Decoder>(
    object: &Map<String, Value>,
    name: &str,
    decoder: &D,
) -> Result<D::Output, DecodeError> {
    let field = object.get(name);
    decoder.decode_input(field).map_err(|err| match field {
        Some(_) => err.at(name),
        None => DecodeError::new(ErrorKind::MissingField {
            field: name.to_owned(),
        })
        .at(name),
    })
}

/// Declares a struct together with the record decoder that produces it.
///
/// Each field names its type and the schema it is decoded with; the
/// compiler checks that the two agree. The generated `decoder()` function
/// resolves every field schema once, and decodes fields in declaration
/// order. Input fields not declared here are ignored.
///
/// A field is read from the input key of the same name, with any `r#`
/// prefix dropped. Write `name as "key"` to read it from a different key.
///
/// ```
/// use json_decoder::{array, boolean, number, option, record, string, Decoder};
/// use serde_json::json;
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct User {
///         id: f64 = number(),
///         username: String = string(),
///         phone_numbers: Vec<String> = array(string()),
///         ssn: Option<String> = option(string()),
///         is_banned as "isBanned": bool = boolean(),
///     }
/// }
///
/// let user = User::decoder()
///     .decode(&json!({
///         "id": 100,
///         "username": "Fred",
///         "phone_numbers": ["0123", "0987"],
///         "isBanned": false,
///         "extra": true,
///     }))
///     .unwrap();
///
/// assert_eq!(
///     User {
///         id: 100.0,
///         username: "Fred".to_owned(),
///         phone_numbers: vec!["0123".to_owned(), "0987".to_owned()],
///         ssn: None,
///         is_banned: false,
///     },
///     user
/// );
/// ```
#[macro_export]
macro_rules! record {
    (@key $field:ident) => {
        $crate::field_key(stringify!($field))
    };
    (@key $field:ident $key:literal) => {
        $key
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field_vis:vis $field:ident $(as $key:literal)? : $ty:ty = $schema:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($field_vis $field: $ty,)*
        }

        impl $name {
            #[allow(dead_code)]
            $vis fn decoder() -> impl $crate::Decoder<Output = $name> {
                $(let $field = $crate::decoder($schema);)*
                $crate::from_fn(move |input: ::std::option::Option<&$crate::Value>| {
                    let object = $crate::expect_object(input)?;
                    ::std::result::Result::Ok($name {
                        $($field: $crate::decode_field(
                            object,
                            $crate::record!(@key $field $($key)?),
                            &$field,
                        )?,)*
                    })
                })
            }
        }
    };
}

#[doc(hidden)]
pub fn field_key(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{boolean, number, option, string, undef, Kind};
    use serde_json::json;

    #[test]
    fn literal_exact() {
        assert_eq!("a", literal("a").decode(&json!("a")).unwrap());
        assert_eq!(3, literal(3).decode(&json!(3.0)).unwrap());
        assert!(literal(true).decode(&json!(true)).unwrap());

        assert_eq!(
            ErrorKind::ValueMismatch {
                expected: json!("a"),
                found: Some(json!("b")),
            },
            literal("a").decode(&json!("b")).unwrap_err().kind
        );

        // no coercion between kinds
        assert!(literal("1").decode(&json!(1)).is_err());
        assert!(literal(json!(null)).decode_absent().is_err());
    }

    #[test]
    fn literal_nested_numbers() {
        let origin = literal(json!({ "at": [0, 1], "tag": "o" }));
        assert!(origin.decode(&json!({ "at": [0.0, 1.0], "tag": "o" })).is_ok());

        assert!(origin.decode(&json!({ "at": [0, 1, 2], "tag": "o" })).is_err());
        assert!(origin.decode(&json!({ "at": [0, 1], "tag": "p" })).is_err());
        assert!(origin.decode(&json!({ "at": [0, 1] })).is_err());
        assert!(origin
            .decode(&json!({ "at": [0, 1], "tag": "o", "extra": 1 }))
            .is_err());
    }

    #[test]
    fn tuple_pair() {
        let pair = tuple(number(), string());
        assert_eq!((1.0, "a".to_owned()), pair.decode(&json!([1, "a"])).unwrap());

        let err = pair.decode(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Index(1)]);
        assert_eq!(
            ErrorKind::TypeMismatch {
                expected: "string",
                found: Kind::Number,
            },
            err.kind
        );
    }

    #[test]
    fn tuple_fails_fast() {
        let err = tuple(number(), string()).decode(&json!(["x", 2])).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Index(0)]);
    }

    #[test]
    fn tuple_wrong_shape() {
        for input in &[json!([]), json!([1]), json!([1, "a", 3]), json!({})] {
            match tuple(number(), string()).decode(input).unwrap_err().kind {
                ErrorKind::ShapeMismatch { expected, .. } => {
                    assert_eq!(Shape::Tuple { len: 2 }, expected)
                }
                kind => panic!("unexpected error kind: {:?}", kind),
            }
        }
    }

    #[test]
    fn record_homogeneous() {
        let flags = record(vec![("read", boolean()), ("write", boolean())]);

        let out = flags
            .decode(&json!({ "read": true, "write": false, "exec": true }))
            .unwrap();
        assert_eq!(
            vec![("read".to_owned(), true), ("write".to_owned(), false)]
                .into_iter()
                .collect::<BTreeMap<_, _>>(),
            out
        );
    }

    #[test]
    fn record_missing_field() {
        let flags = record(vec![("read", boolean()), ("write", boolean())]);

        let err = flags.decode(&json!({ "read": true })).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Field("write".to_owned())]);
        assert_eq!(
            ErrorKind::MissingField {
                field: "write".to_owned()
            },
            err.kind
        );
    }

    #[test]
    fn record_accepts_absent_fields_when_decoder_does() {
        let shape = record(vec![("gone", undef())]);
        assert_eq!(1, shape.decode(&json!({})).unwrap().len());

        let err = shape.decode(&json!({ "gone": 1 })).unwrap_err();
        assert_eq!(err.path, vec![PathSegment::Field("gone".to_owned())]);
    }

    #[test]
    fn record_not_an_object() {
        for input in &[json!(null), json!([]), json!("x")] {
            match record(vec![("a", number())]).decode(input).unwrap_err().kind {
                ErrorKind::ShapeMismatch { expected, .. } => assert_eq!(Shape::Object, expected),
                kind => panic!("unexpected error kind: {:?}", kind),
            }
        }
    }

    record! {
        #[derive(Debug, PartialEq)]
        struct Account {
            id: f64 = number(),
            kind: &'static str = "admin",
            location: (f64, f64) = (number(), number()),
            nickname: Option<String> = option(string()),
        }
    }

    #[test]
    fn record_macro() {
        let account = Account::decoder()
            .decode(&json!({
                "id": 1,
                "kind": "admin",
                "location": [52.1, 4.3],
                "ignored": [1, 2, 3],
            }))
            .unwrap();

        assert_eq!(
            Account {
                id: 1.0,
                kind: "admin",
                location: (52.1, 4.3),
                nickname: None,
            },
            account
        );
    }

    record! {
        #[derive(Debug, PartialEq)]
        struct Attachment {
            r#type: String = string(),
            content_type as "content-type": String = string(),
            is_inline as "isInline": Option<bool> = option(boolean()),
        }
    }

    #[test]
    fn record_macro_keys() {
        let attachment = Attachment::decoder()
            .decode(&json!({
                "type": "file",
                "content-type": "text/plain",
                "isInline": true,
            }))
            .unwrap();

        assert_eq!(
            Attachment {
                r#type: "file".to_owned(),
                content_type: "text/plain".to_owned(),
                is_inline: Some(true),
            },
            attachment
        );

        let err = Attachment::decoder()
            .decode(&json!({ "type": "file", "content_type": "text/plain" }))
            .unwrap_err();

        assert_eq!(err.path, vec![PathSegment::Field("content-type".to_owned())]);
        assert_eq!(
            ErrorKind::MissingField {
                field: "content-type".to_owned()
            },
            err.kind
        );

        let err = Attachment::decoder()
            .decode(&json!({ "r#type": "file", "content-type": "text/plain" }))
            .unwrap_err();

        assert_eq!(err.path, vec![PathSegment::Field("type".to_owned())]);
    }

    #[test]
    fn record_macro_paths() {
        let err = Account::decoder()
            .decode(&json!({ "id": 1, "kind": "admin", "location": [52.1, "x"] }))
            .unwrap_err();

        assert_eq!(
            err.path,
            vec![PathSegment::Field("location".to_owned()), PathSegment::Index(1)]
        );

        let err = Account::decoder()
            .decode(&json!({ "id": 1, "location": [0, 0] }))
            .unwrap_err();

        assert_eq!(
            ErrorKind::MissingField {
                field: "kind".to_owned()
            },
            err.kind
        );
    }
}
