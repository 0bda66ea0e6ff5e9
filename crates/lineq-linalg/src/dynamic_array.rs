//! Growable contiguous array with explicit capacity management.
//!
//! `DynamicArray` backs right-hand-side and solution vectors as well as the
//! sparse term lists produced by the equation parser. Unlike a bare `Vec`,
//! its logical capacity follows a fixed geometric policy (×1.5) so growth
//! behaviour is the same on every allocator.

use std::ops::{Index, IndexMut};
use std::slice;

use crate::error::{LinalgError, LinalgResult};

/// Capacity handed out to an empty array on first growth.
const MIN_CAPACITY: usize = 2;

/// Growable array with `len <= capacity` and ×1.5 expansion.
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
    /// Elements; only the first `data.len()` are live.
    data: Vec<T>,
    /// Logical capacity.
    capacity: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with the minimum capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty array able to hold `capacity` elements before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Current logical capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends an element, growing the capacity by half when full.
    pub fn push(&mut self, value: T) {
        if self.data.len() >= self.capacity {
            self.reserve_to(grown_capacity(self.capacity).max(self.data.len() + 1));
        }
        self.data.push(value);
    }

    /// Raises the capacity to `new_capacity`.
    ///
    /// Requests smaller than the current length are ignored, as are requests
    /// that would not increase the capacity.
    pub fn reserve_to(&mut self, new_capacity: usize) {
        if new_capacity < self.data.len() || new_capacity <= self.capacity {
            return;
        }
        self.data.reserve_exact(new_capacity - self.data.len());
        self.capacity = new_capacity;
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> LinalgResult<&T> {
        let len = self.data.len();
        self.data
            .get(index)
            .ok_or(LinalgError::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> LinalgResult<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(LinalgError::IndexOutOfRange { index, len })
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> LinalgResult<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Swaps two elements in place.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfRange`] if either index is past the end.
    pub fn swap(&mut self, a: usize, b: usize) -> LinalgResult<()> {
        let len = self.data.len();
        for index in [a, b] {
            if index >= len {
                return Err(LinalgError::IndexOutOfRange { index, len });
            }
        }
        self.data.swap(a, b);
        Ok(())
    }

    /// Removes every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterates mutably over the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T: Clone + Default> DynamicArray<T> {
    /// Creates an array of `len` default values.
    ///
    /// The capacity equals `len`, or the minimum capacity when `len` is zero.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        let capacity = if len > 0 { len } else { MIN_CAPACITY };
        let mut data = Vec::with_capacity(capacity);
        data.resize(len, T::default());
        Self { data, capacity }
    }

    /// Overwrites every live element with the default value.
    pub fn fill_default(&mut self) {
        self.data.fill(T::default());
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Overwrites every live element with `value`.
    pub fn fill(&mut self, value: &T) {
        self.data.fill(value.clone());
    }
}

/// Next capacity under the ×1.5 growth policy.
fn grown_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        MIN_CAPACITY
    } else {
        capacity * 3 / 2
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    /// Arrays compare by contents; capacity is not observable equality.
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`. Use [`DynamicArray::get`] for checked access.
    fn index(&self, index: usize) -> &Self::Output {
        let len = self.data.len();
        match self.data.get(index) {
            Some(value) => value,
            None => panic!("{}", LinalgError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(value) => value,
            None => panic!("{}", LinalgError::IndexOutOfRange { index, len }),
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(data: Vec<T>) -> Self {
        let capacity = data.len().max(MIN_CAPACITY);
        let mut data = data;
        data.reserve_exact(capacity - data.len());
        Self { data, capacity }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}
