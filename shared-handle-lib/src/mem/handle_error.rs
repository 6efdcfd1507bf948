use core::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The handle was dereferenced while it owned nothing.
    NullDereference,
}

impl Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleError::NullDereference => "null dereference",
        })
    }
}

impl std::error::Error for HandleError {}
