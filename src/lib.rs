#![doc = include_str!("../README.md")]

/// Command implementations and argument types.
///
/// # Example: Stamping a file from `build.rs`
///
/// Add `gitrev` as a build dependency in your `Cargo.toml`:
///
/// ```toml
/// [build-dependencies]
/// gitrev = "0.1"
/// ```
///
/// Then in your `build.rs`:
///
/// ```no_run
/// use gitrev::commands::{
///     GenerateOptions,
///     Invocation,
///     generate,
/// };
///
/// fn main() {
///     let cwd = std::env::current_dir().unwrap();
///     let out_dir = std::env::var("OUT_DIR").unwrap();
///     let invocation = Invocation::new(
///         ".",
///         "src/revision.rs.in",
///         format!("{}/revision.rs", out_dir),
///         &cwd,
///     );
///     if let Err(e) = generate(&invocation, &GenerateOptions::default()) {
///         println!("cargo:warning=gitrev failed: {}", e);
///     }
///     println!("cargo:rerun-if-changed=src/revision.rs.in");
///     println!("cargo:rerun-if-changed=.git/HEAD");
///     println!("cargo:rerun-if-changed=.git/refs");
/// }
/// ```
pub mod commands;
/// Error taxonomy.
pub mod error;
/// Git queries.
pub mod git;
/// Placeholder substitution.
pub mod template;
/// Banner and usage text.
pub mod usage;

#[cfg(test)]
mod test_support;
