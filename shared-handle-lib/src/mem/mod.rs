pub mod handle;
pub mod handle_error;
pub mod share;

pub use self::{
    handle::{AtomicHandle, LocalHandle, SharedHandle},
    handle_error::HandleError,
    share::{Atomic, Local, Share},
};
