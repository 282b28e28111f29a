pub mod rules;
pub mod validator;

pub use rules::{is_valid_image_name, ValidationRule, IMAGE_NAME_PATTERN};
pub use validator::{validate, Validator};
