use std::{rc::Rc, sync::Arc};

/// A shared-ownership primitive. `Ptr<T>` is one owner counter allocation holding the boxed
/// object, so an owner either has both or neither and the object keeps the address it was
/// boxed at.
pub trait Share {
    // required:
    type Ptr<T>: Clone;
    fn from_box<T>(value: Box<T>) -> Self::Ptr<T>;
    fn object<T>(ptr: &Self::Ptr<T>) -> &T;
    /// The number of live owners.
    fn count<T>(ptr: &Self::Ptr<T>) -> usize;
    /// `true` if both owners share one counter.
    fn ptr_eq<T>(a: &Self::Ptr<T>, b: &Self::Ptr<T>) -> bool;
    // optional:
    #[inline(always)]
    fn new<T>(value: T) -> Self::Ptr<T> {
        Self::from_box(Box::new(value))
    }
    #[inline(always)]
    fn as_ptr<T>(ptr: &Self::Ptr<T>) -> *const T {
        Self::object(ptr)
    }
}

/// Atomic owner counter. Owners can be cloned and dropped on different threads.
#[derive(Debug, Clone)]
pub struct Atomic();

impl Share for Atomic {
    type Ptr<T> = Arc<Box<T>>;
    #[inline(always)]
    fn from_box<T>(value: Box<T>) -> Arc<Box<T>> {
        Arc::new(value)
    }
    #[inline(always)]
    fn object<T>(ptr: &Arc<Box<T>>) -> &T {
        ptr
    }
    #[inline(always)]
    fn count<T>(ptr: &Arc<Box<T>>) -> usize {
        Arc::strong_count(ptr)
    }
    #[inline(always)]
    fn ptr_eq<T>(a: &Arc<Box<T>>, b: &Arc<Box<T>>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

/// Non-atomic owner counter, confined to one thread.
#[derive(Debug, Clone)]
pub struct Local();

impl Share for Local {
    type Ptr<T> = Rc<Box<T>>;
    #[inline(always)]
    fn from_box<T>(value: Box<T>) -> Rc<Box<T>> {
        Rc::new(value)
    }
    #[inline(always)]
    fn object<T>(ptr: &Rc<Box<T>>) -> &T {
        ptr
    }
    #[inline(always)]
    fn count<T>(ptr: &Rc<Box<T>>) -> usize {
        Rc::strong_count(ptr)
    }
    #[inline(always)]
    fn ptr_eq<T>(a: &Rc<Box<T>>, b: &Rc<Box<T>>) -> bool {
        Rc::ptr_eq(a, b)
    }
}
