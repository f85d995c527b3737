pub mod validator;

pub use validator::{SearchModeValidator, SqlDialect};
