//! Command implementations.

mod generate;

pub use generate::{
    GenerateArgs,
    GenerateOptions,
    Invocation,
    generate,
    strip_trailing_separator,
};
