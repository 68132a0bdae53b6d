use crate::DecodeError;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// An input of `None` means the value is absent, as with a missing field.
pub trait Decoder {
    type Output;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError>;

    fn decode(&self, input: &Value) -> Result<Self::Output, DecodeError> {
        self.decode_input(Some(input))
    }

    fn decode_absent(&self) -> Result<Self::Output, DecodeError> {
        self.decode_input(None)
    }

    fn map<F, U>(self, f: F) -> Mapped<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Mapped { decoder: self, f }
    }

    fn boxed<'a>(self) -> BoxDecoder<'a, Self::Output>
    where
        Self: Sized + Send + Sync + 'a,
    {
        Box::new(self)
    }
}

pub type BoxDecoder<'a, T> = Box<dyn Decoder<Output = T> + Send + Sync + 'a>;

impl<'a, D: Decoder + ?Sized> Decoder for &'a D {
    type Output = D::Output;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        (**self).decode_input(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Output = D::Output;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        (**self).decode_input(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Arc<D> {
    type Output = D::Output;

    fn decode_input(&self, input: Option<&Value>) -> Result<Self::Output, DecodeError> {
        (**self).decode_input(input)
    }
}

/// Wraps a plain function as a [`Decoder`].
///
/// ```
/// use json_decoder::{from_fn, number, Decoder};
/// use serde_json::json;
///
/// let port = from_fn(|input| {
///     let n = number().decode_input(input)?;
///     Ok(n as u16)
/// });
///
/// assert_eq!(8080, port.decode(&json!(8080)).unwrap());
/// ```
pub fn from_fn<F, T>(f: F) -> FnDecoder<F, T>
where
    F: Fn(Option<&Value>) -> Result<T, DecodeError>,
{
    FnDecoder {
        f,
        output: PhantomData,
    }
}

pub struct FnDecoder<F, T> {
    f: F,
    output: PhantomData<fn() -> T>,
}

impl<F: Clone, T> Clone for FnDecoder<F, T> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            output: PhantomData,
        }
    }
}

impl<F, T> fmt::Debug for FnDecoder<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDecoder")
    }
}

impl<F, T> Decoder for FnDecoder<F, T>
where
    F: Fn(Option<&Value>) -> Result<T, DecodeError>,
{
    type Output = T;

    fn decode_input(&self, input: Option<&Value>) -> Result<T, DecodeError> {
        (self.f)(input)
    }
}

#[derive(Clone, Debug)]
pub struct Mapped<D, F> {
    decoder: D,
    f: F,
}

impl<D, F, U> Decoder for Mapped<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> U,
{
    type Output = U;

    fn decode_input(&self, input: Option<&Value>) -> Result<U, DecodeError> {
        self.decoder.decode_input(input).map(&self.f)
    }
}
