//! Bind command-line arguments onto strongly-typed structs.
//!
//! Parsing runs in two stages:
//! - [`tokenizer`] turns argv into a name → raw value map (`--name=value`,
//!   `-n=value`, bare `--flag`), with no knowledge of the target type
//! - [`binder`] resolves short aliases, rejects unknown names, applies defaults
//!   and coerces each value to its declared [`ArgType`]
//!
//! The target type supplies its [`Definition`] and builds itself from the bound
//! values through the [`Args`] trait, usually via `#[derive(Args)]`.
//!
//! # Example
//!
//! ```
//! use argbind::Args;
//!
//! #[derive(Debug, Args)]
//! struct Typed {
//!     #[arg(short = "i", default = 0)]
//!     int: i64,
//!     #[arg(default = "hello")]
//!     string: String,
//!     #[arg(default)]
//!     array: Vec<String>,
//! }
//!
//! let args = Typed::parse_from(["script", "-i=5", "--array=beep", "--array=boop"]).unwrap();
//! assert_eq!(args.int, 5);
//! assert_eq!(args.string, "hello");
//! assert_eq!(args.array, ["beep", "boop"]);
//! ```

pub mod binder;
mod bound;
mod definition;
mod error;
pub mod tokenizer;
mod value;

pub use bound::BoundArgs;
pub use definition::{ArgBuilder, ArgDef, Definition, DefinitionBuilder, arg};
pub use error::{DefinitionError, ParseError, ParseResult, Shape};
pub use tokenizer::{RawArgs, RawValue, Token, tokenize};
pub use value::{ArgType, ArgValue, Value};

pub use argbind_macros::Args;

/// A type that can be built from command-line arguments.
///
/// `definition` is the descriptor provider and `hydrate` the constructor;
/// `hydrate` also runs the type's post-load hooks.
pub trait Args: Sized {
    /// The ordered argument descriptors and post-load hooks for this type.
    fn definition() -> Result<Definition, DefinitionError>;

    /// Build an instance from values bound against [`Args::definition`].
    fn hydrate(bound: BoundArgs) -> ParseResult<Self>;

    /// Parse a full argv, including the program name at index 0.
    fn parse_from<I, S>(argv: I) -> ParseResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let def = Self::definition()?;
        let bound = bind(argv.into_iter().skip(1), &def)?;
        Self::hydrate(bound)
    }

    /// Parse the arguments of the current process.
    fn from_env() -> ParseResult<Self> {
        Self::parse_from(std::env::args())
    }
}

/// Parse a full argv (program name at index 0) into `T`.
pub fn parse<T: Args>(argv: &[impl AsRef<str>]) -> ParseResult<T> {
    T::parse_from(argv)
}

/// Parse any argv iterator (program name first) into `T`.
pub fn parse_from<T, I, S>(argv: I) -> ParseResult<T>
where
    T: Args,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    T::parse_from(argv)
}

/// Tokenize and bind arguments that follow the program name.
pub fn bind<I, S>(args: I, def: &Definition) -> ParseResult<BoundArgs>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let raw = tokenize(args);
    tracing::debug!(names = raw.len(), "tokenized arguments");
    binder::bind(raw, def)
}
