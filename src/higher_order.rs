use crate::{
    expect_object, tuple, DecodeError, Decoded, Decoder, ErrorKind, IntoDecoder, Shape, Tuple,
};
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

pub trait Alternatives {
    type Output;

    fn decode_first(&self, input: Option<&Value>) -> Result<Self::Output, Vec<DecodeError>>;
}

pub trait IntoAlternatives {
    type Alternatives: Alternatives;

    fn into_alternatives(self) -> Self::Alternatives;
}

impl<D: Decoder> Alternatives for Vec<D> {
    type Output = D::Output;

    fn decode_first(&self, input: Option<&Value>) -> Result<D::Output, Vec<DecodeError>> {
        let mut errors = Vec::with_capacity(self.len());
        for decoder in self {
            match decoder.decode_input(input) {
                Ok(out) => return Ok(out),
                Err(err) => errors.push(err),
            }
        }

        Err(errors)
    }
}

impl<S: IntoDecoder> IntoAlternatives for Vec<S> {
    type Alternatives = Vec<S::Decoder>;

    fn into_alternatives(self) -> Self::Alternatives {
        self.into_iter().map(IntoDecoder::into_decoder).collect()
    }
}

macro_rules! alternatives {
    ($first:ident $(, $rest:ident)+) => {
        impl<$first: Decoder, $($rest: Decoder<Output = $first::Output>),+> Alternatives
            for ($first, $($rest),+)
        {
            type Output = $first::Output;

            #[allow(non_snake_case)]
            fn decode_first(
                &self,
                input: Option<&Value>,
            ) -> Result<Self::Output, Vec<DecodeError>> {
                let ($first, $($rest),+) = self;
                let mut errors = Vec::new();

                match $first.decode_input(input) {
                    Ok(out) => return Ok(out),
                    Err(err) => errors.push(err),
                }
                $(
                    match $rest.decode_input(input) {
                        Ok(out) => return Ok(out),
                        Err(err) => errors.push(err),
                    }
                )+

                Err(errors)
            }
        }

        impl<$first: IntoDecoder, $($rest: IntoDecoder),+> IntoAlternatives for ($first, $($rest),+)
        where
            $(<$rest as IntoDecoder>::Decoder: Decoder<Output = Decoded<$first>>,)+
        {
            type Alternatives = ($first::Decoder, $($rest::Decoder),+);

            #[allow(non_snake_case)]
            fn into_alternatives(self) -> Self::Alternatives {
                let ($first, $($rest),+) = self;
                ($first.into_decoder(), $($rest.into_decoder()),+)
            }
        }
    };
}

alternatives!(A, B);
alternatives!(A, B, C);
alternatives!(A, B, C, D);
alternatives!(A, B, C, D, E);
alternatives!(A, B, C, D, E, F);
alternatives!(A, B, C, D, E, F, G);
alternatives!(A, B, C, D, E, F, G, H);

#[derive(Clone, Debug)]
pub struct Union<A> {
    alternatives: A,
}

/// Tries each alternative in the order given and returns the first success.
///
/// Order decides precedence: an input accepted by several alternatives is
/// decoded by the earliest one. If all of them fail, the error is
/// [`ErrorKind::UnionExhausted`] carrying each alternative's failure.
///
/// ```
/// use json_decoder::{number, string, union, Decoder};
/// use serde_json::json;
///
/// let id = union((string(), number().map(|n| n.to_string())));
///
/// assert_eq!("abc", id.decode(&json!("abc")).unwrap());
/// assert_eq!("42", id.decode(&json!(42)).unwrap());
/// assert!(id.decode(&json!(null)).is_err());
/// ```
pub fn union<A: IntoAlternatives>(alternatives: A) -> Union<A::Alternatives> {
    Union {
        alternatives: alternatives.into_alternatives(),
    }
}

impl<A: Alternatives> Decoder for Union<A> {
    type Output = A::Output;

    fn decode_input(&self, input: Option<&Value>) -> Result<A::Output, DecodeError> {
        self.alternatives
            .decode_first(input)
            .map_err(|errors| DecodeError::new(ErrorKind::UnionExhausted { errors }))
    }
}

#[derive(Clone, Debug)]
pub struct Optional<D> {
    decoder: D,
}

/// Decodes an absent value as `None`, and anything else with `decoder`.
///
/// Absence is checked first, so `None` is produced even when `decoder`
/// would itself accept an absent value. Note that JSON `null` is not
/// absent; combine with [`nil`][crate::nil] to accept it.
pub fn option<S: IntoDecoder>(decoder: S) -> Optional<S::Decoder> {
    Optional {
        decoder: decoder.into_decoder(),
    }
}

impl<D: Decoder> Decoder for Optional<D> {
    type Output = Option<D::Output>;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        match input {
            None => Ok(None),
            Some(value) => self.decoder.decode(value).map(Some),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Array<D> {
    decoder: D,
}

pub fn array<S: IntoDecoder>(decoder: S) -> Array<S::Decoder> {
    Array {
        decoder: decoder.into_decoder(),
    }
}

impl<D: Decoder> Decoder for Array<D> {
    type Output = Vec<D::Output>;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        let arr = expect_array(input)?;
        arr.iter()
            .enumerate()
            .map(|(i, value)| self.decoder.decode(value).map_err(|err| err.at(i)))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct Set<D> {
    decoder: D,
}

pub fn set<S: IntoDecoder>(decoder: S) -> Set<S::Decoder> {
    Set {
        decoder: decoder.into_decoder(),
    }
}

impl<D> Decoder for Set<D>
where
    D: Decoder,
    D::Output: PartialEq,
{
    type Output = Vec<D::Output>;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        let arr = expect_array(input)?;
        let mut out: Vec<D::Output> = Vec::with_capacity(arr.len());
        for (i, value) in arr.iter().enumerate() {
            let element = self.decoder.decode(value).map_err(|err| err.at(i))?;
            if let Some(first) = out.iter().position(|seen| *seen == element) {
                return Err(DecodeError::new(ErrorKind::DuplicateValue { first }).at(i));
            }

            out.push(element);
        }

        Ok(out)
    }
}

#[derive(Clone, Debug)]
pub struct Map<K, V> {
    entry: Tuple<K, V>,
}

/// Decodes an array of `[key, value]` pairs into a map.
///
/// A key that decodes equal to an earlier one is rejected with
/// [`ErrorKind::DuplicateKey`].
pub fn map<K: IntoDecoder, V: IntoDecoder>(key: K, value: V) -> Map<K::Decoder, V::Decoder> {
    Map {
        entry: tuple(key, value),
    }
}

impl<K, V> Decoder for Map<K, V>
where
    K: Decoder,
    K::Output: Ord,
    V: Decoder,
{
    type Output = BTreeMap<K::Output, V::Output>;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        let arr = expect_array(input)?;
        let mut entries = BTreeMap::new();
        for (i, value) in arr.iter().enumerate() {
            let (k, v) = self.entry.decode(value).map_err(|err| err.at(i))?;
            match entries.entry(k) {
                Entry::Occupied(seen) => {
                    let (first, _) = seen.get();
                    return Err(DecodeError::new(ErrorKind::DuplicateKey { first: *first }).at(i));
                }
                Entry::Vacant(slot) => {
                    slot.insert((i, v));
                }
            }
        }

        Ok(entries.into_iter().map(|(k, (_, v))| (k, v)).collect())
    }
}

#[derive(Clone, Debug)]
pub struct Dict<D> {
    decoder: D,
}

pub fn dict<S: IntoDecoder>(decoder: S) -> Dict<S::Decoder> {
    Dict {
        decoder: decoder.into_decoder(),
    }
}

impl<D: Decoder> Decoder for Dict<D> {
    type Output = BTreeMap<String, D::Output>;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        let object = expect_object(input)?;
        object
            .iter()
            .map(|(key, value)| {
                self.decoder
                    .decode(value)
                    .map(|decoded| (key.clone(), decoded))
                    .map_err(|err| err.at(key.as_str()))
            })
            .collect()
    }
}

fn expect_array(input: Option<&Value>) -> Result<&Vec<Value>, DecodeError> {
    match input {
        Some(Value::Array(arr)) => Ok(arr),
        _ => Err(DecodeError::shape_mismatch(Shape::Array, input)),
    }
}
