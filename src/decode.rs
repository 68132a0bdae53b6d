use crate::{DecodeError, Decoder, ErrorKind, PathSegment};
use serde_json::Value;

/// Limits applied by [`decode`] before a decoder runs.
///
/// A `max_depth` of zero, the default, means no limit.
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
    max_depth: usize,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes `instance` with `decoder` after checking it against `options`.
///
/// The depth check runs before any decoding work, so oversized input is
/// turned away cheaply. An instance nested deeper than `max_depth` fails
/// with [`ErrorKind::MaxDepthExceeded`], pointing at the first container
/// past the limit.
///
/// ```
/// use json_decoder::{array, decode, number, DecodeOptions};
/// use serde_json::json;
///
/// let options = DecodeOptions::new().with_max_depth(2);
/// let grid = array(array(number()));
///
/// assert!(decode(&grid, &json!([[1, 2], [3]]), &options).is_ok());
/// assert!(decode(&array(number()), &json!([[[1]]]), &options).is_err());
/// ```
pub fn decode<D: Decoder>(
    decoder: &D,
    instance: &Value,
    options: &DecodeOptions,
) -> Result<D::Output, DecodeError> {
    if options.max_depth != 0 {
        let mut checker = DepthChecker {
            max_depth: options.max_depth,
            instance_tokens: vec![],
        };

        checker.check(instance)?;
    }

    decoder.decode(instance)
}

struct DepthChecker {
    max_depth: usize,
    instance_tokens: Vec<PathSegment>,
}

impl DepthChecker {
    fn check(&mut self, instance: &Value) -> Result<(), DecodeError> {
        match instance {
            Value::Array(arr) => {
                self.enter()?;
                for (i, sub_instance) in arr.iter().enumerate() {
                    self.instance_tokens.push(PathSegment::Index(i));
                    self.check(sub_instance)?;
                    self.instance_tokens.pop();
                }
            }
            Value::Object(obj) => {
                self.enter()?;
                for (name, sub_instance) in obj {
                    self.instance_tokens.push(PathSegment::Field(name.clone()));
                    self.check(sub_instance)?;
                    self.instance_tokens.pop();
                }
            }
            _ => {}
        }

        Ok(())
    }

    // Containers are one level deeper than the tokens leading to them.
    fn enter(&self) -> Result<(), DecodeError> {
        if self.instance_tokens.len() == self.max_depth {
            Err(DecodeError {
                path: self.instance_tokens.iter().cloned().collect(),
                kind: ErrorKind::MaxDepthExceeded {
                    max_depth: self.max_depth,
                },
            })
        } else {
            Ok(())
        }
    }
}
