//! Observable value holder.
//!
//! [`Observable`] owns a value and at most one listener. Every
//! [`Observable::replace`] stores the new value and then invokes the
//! listener synchronously, so by the time `replace` returns the listener
//! has seen the value that is now current.

use std::fmt;
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No subscriber registered for store changes")]
    NoSubscriber,
}

/// Change listener, called with the freshly stored value
pub type Listener<T> = Box<dyn FnMut(&T) + Send + Sync>;

pub struct Observable<T> {
    value: T,
    listener: Option<Listener<T>>,
}

/// The users list shared between controller and view
pub type UserStore = Observable<Vec<User>>;

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            listener: None,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Register the listener, replacing any previous one.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&T) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn has_subscriber(&self) -> bool {
        self.listener.is_some()
    }

    /// Store `value`, then notify the listener exactly once.
    ///
    /// Without a listener the value is still stored and
    /// [`StoreError::NoSubscriber`] is returned.
    pub fn replace(&mut self, value: T) -> Result<(), StoreError> {
        self.value = value;

        match self.listener.as_mut() {
            Some(listener) => {
                listener(&self.value);
                Ok(())
            }
            None => Err(StoreError::NoSubscriber),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("has_subscriber", &self.has_subscriber())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_replace_notifies_once_before_returning() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut store = Observable::new(0);
        {
            let calls = calls.clone();
            let seen = seen.clone();
            store.subscribe(move |value: &i32| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(*value);
            });
        }

        store.replace(7).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![7]);

        store.replace(9).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*store.get(), 9);
    }

    #[test]
    fn test_replace_without_subscriber_stores_and_fails() {
        let mut store: Observable<Vec<i32>> = Observable::default();
        assert!(!store.has_subscriber());

        let result = store.replace(vec![1, 2]);
        assert_eq!(result, Err(StoreError::NoSubscriber));
        assert_eq!(store.get(), &vec![1, 2]);
    }

    #[test]
    fn test_subscribe_overwrites_previous_listener() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut store = Observable::new(String::new());
        {
            let first = first.clone();
            store.subscribe(move |_: &String| {
                first.fetch_add(1, Ordering::SeqCst);
            });
        }
        {
            let second = second.clone();
            store.subscribe(move |_: &String| {
                second.fetch_add(1, Ordering::SeqCst);
            });
        }

        store.replace("changed".to_string()).unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
