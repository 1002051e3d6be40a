use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypeError>;

/// A generic binding could not be constructed: either the two class types do
/// not share a base identity, or a type variable would have to take two
/// different values within one binding computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BindError(pub String);

/// Domain failures of the resolution engine.
///
/// Contract violations (e.g. handing [`crate::bind_function`] parameter lists
/// that are not arity compatible) are programming errors and panic instead;
/// they are never represented here and never caught internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The class loader could not resolve a referenced class. Propagated to
    /// the caller unchanged; the engine performs no fallback.
    #[error("class not found: {class}")]
    ClassNotFound { class: String },

    /// All three overload resolution phases were exhausted.
    #[error("method not found: {signature} in {receiver}")]
    MethodNotFound { signature: String, receiver: String },

    /// No class in the owner's hierarchy declares the field.
    #[error("field not found: {name} in {owner}")]
    FieldNotFound { name: String, owner: String },

    #[error(transparent)]
    Bind(#[from] BindError),
}
