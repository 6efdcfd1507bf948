use core::{
    fmt,
    mem::swap,
    ops::Deref,
    ptr::null,
};

use super::{
    handle_error::HandleError,
    share::{Atomic, Local, Share},
};

/// A handle sharing ownership of a heap-allocated `T` with other handles.
///
/// A handle is either EMPTY or OWNING. Every OWNING handle holds one owner count of its
/// object; the object is dropped when the last owner releases it, by drop, `reset`, or
/// being assigned over.
pub struct SharedHandle<T, S: Share = Atomic> {
    ptr: Option<S::Ptr<T>>,
}

pub type AtomicHandle<T> = SharedHandle<T, Atomic>;

pub type LocalHandle<T> = SharedHandle<T, Local>;

impl<T, S: Share> SharedHandle<T, S> {
    /// An EMPTY handle.
    #[inline(always)]
    pub const fn new() -> Self {
        Self { ptr: None }
    }
    pub fn from_value(value: T) -> Self {
        Self {
            ptr: Some(S::new(value)),
        }
    }
    pub fn from_box(value: Box<T>) -> Self {
        Self {
            ptr: Some(S::from_box(value)),
        }
    }
    /// Takes ownership of a raw pointer. A null pointer gives an EMPTY handle.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or come from `Box::into_raw`, and nothing else may own it.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        if ptr.is_null() {
            Self::new()
        } else {
            Self::from_box(Box::from_raw(ptr))
        }
    }
    /// The address of the object, or null when EMPTY.
    #[inline(always)]
    pub fn get(&self) -> *const T {
        match &self.ptr {
            Some(ptr) => S::as_ptr(ptr),
            None => null(),
        }
    }
    #[inline(always)]
    pub fn as_ref(&self) -> Option<&T> {
        match &self.ptr {
            Some(ptr) => Some(S::object(ptr)),
            None => None,
        }
    }
    #[inline(always)]
    pub fn is_some(&self) -> bool {
        self.ptr.is_some()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }
    pub fn try_deref(&self) -> Result<&T, HandleError> {
        self.as_ref().ok_or(HandleError::NullDereference)
    }
    /// The number of handles owning the same object, `0` when EMPTY.
    pub fn use_count(&self) -> usize {
        match &self.ptr {
            Some(ptr) => S::count(ptr),
            None => 0,
        }
    }
    /// `true` if both handles own the same object or both are EMPTY.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.ptr, &other.ptr) {
            (Some(a), Some(b)) => S::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
    /// Shares the object of `other`, releasing the current one.
    pub fn assign(&mut self, other: &Self) -> &mut Self {
        if !self.ptr_eq(other) {
            self.ptr = other.ptr.clone();
        }
        self
    }
    /// Moves the object of `source` into `self`, releasing the current one. `source` becomes
    /// EMPTY and the owner count of the moved object does not change.
    pub fn assign_move(&mut self, source: &mut Self) -> &mut Self {
        self.ptr = source.ptr.take();
        self
    }
    /// Moves the object out, leaving `self` EMPTY.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.ptr.take(),
        }
    }
    pub fn reset(&mut self) {
        self.ptr = None;
    }
    /// Releases the current object and owns `value` alone.
    pub fn reset_with(&mut self, value: T) {
        self.ptr = Some(S::new(value));
    }
    pub fn reset_box(&mut self, value: Box<T>) {
        self.ptr = Some(S::from_box(value));
    }
    /// # Safety
    ///
    /// The same contract as `from_raw`.
    pub unsafe fn reset_raw(&mut self, ptr: *mut T) {
        *self = Self::from_raw(ptr);
    }
    #[inline(always)]
    pub fn swap(&mut self, other: &mut Self) {
        swap(&mut self.ptr, &mut other.ptr);
    }
}

impl<T, S: Share> Default for SharedHandle<T, S> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Share> Clone for SharedHandle<T, S> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            ptr: self.ptr.clone(),
        }
    }
    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T, S: Share> From<T> for SharedHandle<T, S> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T, S: Share> From<&SharedHandle<T, S>> for bool {
    #[inline(always)]
    fn from(handle: &SharedHandle<T, S>) -> Self {
        handle.is_some()
    }
}

/// Panics with `HandleError::NullDereference` when EMPTY. Use `try_deref` to get the error
/// as a value.
impl<T, S: Share> Deref for SharedHandle<T, S> {
    type Target = T;
    fn deref(&self) -> &T {
        match self.try_deref() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, S: Share> PartialEq for SharedHandle<T, S> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T, S: Share> Eq for SharedHandle<T, S> {}

impl<T: fmt::Debug, S: Share> fmt::Debug for SharedHandle<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ref() {
            Some(value) => f
                .debug_struct("SharedHandle")
                .field("value", value)
                .field("use_count", &self.use_count())
                .finish(),
            None => f.write_str("SharedHandle(EMPTY)"),
        }
    }
}
