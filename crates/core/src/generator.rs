//! The `Generator` trait that every field generator implements.
//!
//! The trait is object-safe so generators can be used as `dyn Generator` for
//! runtime switching between noise-based and displacement-based fields.

use crate::error::FieldError;
use crate::field::Field;
use serde_json::Value;

/// Core trait for scalar field generators.
///
/// A generator owns its output [`Field`] and fills it completely on each
/// [`generate`](Generator::generate) call. Generation is deterministic given
/// the seed and parameters the generator was built with.
pub trait Generator {
    /// Fills the output field. Runs to completion; there is no partial state.
    fn generate(&mut self) -> Result<(), FieldError>;

    /// The scalar field output, values in [0, 1].
    fn field(&self) -> &Field;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal generator that writes a constant, used to verify object safety.
    struct ConstantGenerator {
        field: Field,
        level: f64,
    }

    impl ConstantGenerator {
        fn new(level: f64) -> Self {
            Self {
                field: Field::new(4, 4).unwrap(),
                level,
            }
        }
    }

    impl Generator for ConstantGenerator {
        fn generate(&mut self) -> Result<(), FieldError> {
            let level = self.level;
            self.field.data_mut().iter_mut().for_each(|v| *v = level);
            Ok(())
        }

        fn field(&self) -> &Field {
            &self.field
        }

        fn params(&self) -> Value {
            json!({"level": self.level})
        }

        fn param_schema(&self) -> Value {
            json!({
                "level": {
                    "type": "number",
                    "default": 0.0,
                    "description": "Constant written to every cell"
                }
            })
        }
    }

    #[test]
    fn generator_trait_is_object_safe() {
        let mut generator: Box<dyn Generator> = Box::new(ConstantGenerator::new(0.25));
        generator.generate().unwrap();
        assert_eq!(generator.field().width(), 4);
        assert!(generator.field().data().iter().all(|&v| v == 0.25));
    }

    #[test]
    fn params_and_schema_are_json_objects() {
        let generator = ConstantGenerator::new(0.5);
        assert_eq!(generator.params()["level"], 0.5);
        assert_eq!(generator.param_schema()["level"]["type"], "number");
    }
}
