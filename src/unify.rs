use crate::{literal, record, tuple, Decoder, Literal, Record, Tuple};
use std::collections::BTreeMap;

/// Anything that can stand in for a decoder in a schema.
///
/// A schema is either a [`Decoder`] itself, or one of the literal forms:
///
/// * text (`&'static str` or `String`) decodes by exact equality, as
///   [`literal`] does;
/// * a pair `(A, B)` of schemas decodes a two-element array, as [`tuple`]
///   does;
/// * a map of field names to schemas decodes an object, as [`record`] does.
///
/// Each form is a distinct Rust type, so a schema always resolves to exactly
/// one of them. The resolved decoder's output type is [`Decoded<S>`].
pub trait IntoDecoder {
    type Decoder: Decoder;

    fn into_decoder(self) -> Self::Decoder;
}

/// The type a schema decodes to.
///
/// ```
/// use json_decoder::{Decoded, NumberDecoder};
///
/// let _: Decoded<(&'static str, NumberDecoder)> = ("point", 1.5);
/// ```
pub type Decoded<S> = <<S as IntoDecoder>::Decoder as Decoder>::Output;

impl<D: Decoder> IntoDecoder for D {
    type Decoder = D;

    fn into_decoder(self) -> D {
        self
    }
}

impl IntoDecoder for &'static str {
    type Decoder = Literal<&'static str>;

    fn into_decoder(self) -> Self::Decoder {
        literal(self)
    }
}

impl IntoDecoder for String {
    type Decoder = Literal<String>;

    fn into_decoder(self) -> Self::Decoder {
        literal(self)
    }
}

impl<A: IntoDecoder, B: IntoDecoder> IntoDecoder for (A, B) {
    type Decoder = Tuple<A::Decoder, B::Decoder>;

    fn into_decoder(self) -> Self::Decoder {
        tuple(self.0, self.1)
    }
}

impl<S: IntoDecoder> IntoDecoder for BTreeMap<String, S> {
    type Decoder = Record<S::Decoder>;

    fn into_decoder(self) -> Self::Decoder {
        record(self)
    }
}

/// Resolves a schema into its decoder.
///
/// Decoders pass through unchanged; literal forms are resolved recursively,
/// so schemas nest to any depth without explicit wrapping.
///
/// ```
/// use json_decoder::{array, decoder, number, Decoder};
/// use serde_json::json;
///
/// let tagged = decoder(("point", (number(), array(number()))));
///
/// assert_eq!(
///     ("point", (1.0, vec![2.0, 3.0])),
///     tagged.decode(&json!(["point", [1, [2, 3]]])).unwrap()
/// );
/// ```
pub fn decoder<S: IntoDecoder>(schema: S) -> S::Decoder {
    schema.into_decoder()
}
