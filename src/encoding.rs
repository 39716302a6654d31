//! Primitive encodings everything else is built from.
//!
//! * [`select`] is the two-way choice behind every truth value.
//! * [`List`] is an immutable, singly-linked sequence with structural sharing:
//!   `cons` never touches its tail and `append` shares its second operand.
//! * [`Numeral`] is a non-negative integer with truncated subtraction and the
//!   total ordering derived from it.
//!
//! All operations are total over finite lists and non-negative numerals.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ------------- Truth -------------
/// Returns `on_true` when `condition` holds, otherwise `on_false`.
/// Works for any payload, not just primitives.
pub fn select<T>(condition: bool, on_true: T, on_false: T) -> T {
    if condition { on_true } else { on_false }
}

// ------------- List -------------
struct Node<T> {
    head: T,
    tail: List<T>,
}

/// A persistent cons list. Cloning a list is cheap: it only bumps a
/// reference count on the first node.
pub struct List<T> {
    first: Option<Arc<Node<T>>>,
}

impl<T> List<T> {
    /// The unique empty list.
    pub fn nil() -> Self {
        Self { first: None }
    }
    /// Prepends `head` to `tail`; `tail` stays untouched and is shared.
    pub fn cons(head: T, tail: &List<T>) -> Self {
        Self {
            first: Some(Arc::new(Node { head, tail: tail.clone() })),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
    pub fn head(&self) -> Option<&T> {
        self.first.as_ref().map(|node| &node.head)
    }
    pub fn tail(&self) -> Option<&List<T>> {
        self.first.as_ref().map(|node| &node.tail)
    }
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.first.as_deref() }
    }
    /// Right-associative fold: `[a, b, c]` folds to `f(a, f(b, f(c, acc)))`.
    pub fn fold<B, F>(&self, acc: B, mut f: F) -> B
    where
        F: FnMut(&T, B) -> B,
    {
        let elements: Vec<&T> = self.iter().collect();
        elements.into_iter().rev().fold(acc, |acc, element| f(element, acc))
    }
    /// Number of elements, counted by folding.
    pub fn len(&self) -> usize {
        self.fold(0, |_, count| count + 1)
    }
    /// The `n`th element, or `None` once the list is exhausted.
    pub fn nth(&self, n: usize) -> Option<&T> {
        let mut current = self;
        for _ in 0..n {
            current = current.tail()?;
        }
        current.head()
    }
    pub fn map<U, F>(&self, mut f: F) -> List<U>
    where
        F: FnMut(&T) -> U,
    {
        self.fold(List::nil(), |element, mapped| List::cons(f(element), &mapped))
    }
}

impl<T: Clone> List<T> {
    /// `self` followed by `other`. The result shares every node of `other`.
    pub fn append(&self, other: &List<T>) -> List<T> {
        self.fold(other.clone(), |element, appended| List::cons(element.clone(), &appended))
    }
    /// Picks elements by position: the result holds `nth(i)` for every `i` in
    /// `order`, with `None` where `i` runs past the end.
    pub fn reorder(&self, order: &List<usize>) -> List<Option<T>> {
        order.map(|&position| self.nth(position).cloned())
    }
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        Self { first: self.first.clone() }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::nil()
    }
}

// Dropping a long list node by node would otherwise recurse once per element.
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        let mut next = self.first.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.tail.first.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}
impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}
impl<T: Ord> Ord for List<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for element in self.iter() {
            element.hash(state);
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let elements: Vec<T> = iter.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(List::nil(), |tail, head| List::cons(head, &tail))
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let elements: Vec<String> = self.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", elements.join(", "))
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.tail.first.as_deref();
            &node.head
        })
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(List::from)
    }
}

// ------------- Numeral -------------
/// A non-negative integer. Subtraction truncates at zero, so no operation
/// can ever produce a negative numeral.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Numeral(u64);

impl Numeral {
    pub const ZERO: Numeral = Numeral(0);

    /// Converts a host integer, clamping negatives to zero.
    pub fn uint(n: i64) -> Self {
        Self(n.max(0) as u64)
    }
    pub fn value(&self) -> u64 {
        self.0
    }
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
    pub fn succ(self) -> Self {
        Self(self.0.saturating_add(1))
    }
    /// The predecessor; the predecessor of zero is zero.
    pub fn pred(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
    /// `self` raised to `exponent`.
    pub fn exp(self, exponent: Self) -> Self {
        let exponent = u32::try_from(exponent.0).unwrap_or(u32::MAX);
        Self(self.0.saturating_pow(exponent))
    }
    pub fn is_le(self, other: Self) -> bool {
        (self - other).is_zero()
    }
    pub fn is_ge(self, other: Self) -> bool {
        other.is_le(self)
    }
    /// Equality derived from ordering: `m <= n` and `n <= m`.
    pub fn is_eq(self, other: Self) -> bool {
        self.is_le(other) && other.is_le(self)
    }
    pub fn is_lt(self, other: Self) -> bool {
        self.is_le(other) && !other.is_le(self)
    }
    pub fn is_gt(self, other: Self) -> bool {
        other.is_lt(self)
    }
}

impl ops::Add for Numeral {
    type Output = Numeral;
    fn add(self, other: Numeral) -> Numeral {
        Numeral(self.0.saturating_add(other.0))
    }
}
impl ops::Mul for Numeral {
    type Output = Numeral;
    fn mul(self, other: Numeral) -> Numeral {
        Numeral(self.0.saturating_mul(other.0))
    }
}
// truncated subtraction
impl ops::Sub for Numeral {
    type Output = Numeral;
    fn sub(self, other: Numeral) -> Numeral {
        Numeral(self.0.saturating_sub(other.0))
    }
}

impl From<u64> for Numeral {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
