//! Linear membership tests over slices.

/// Returns the index of the first element of `set` equal to `item`.
///
/// # Examples
///
/// ```
/// assert_eq!(chemu::position(&["C", "H", "O"], &"O"), Some(2));
/// assert_eq!(chemu::position(&[1, 2, 3], &4), None);
/// ```
pub fn position<T: PartialEq>(set: &[T], item: &T) -> Option<usize> {
    set.iter().position(|x| x == item)
}

/// Returns `true` if `set` holds an element equal to `item`.
pub fn contains<T: PartialEq>(set: &[T], item: &T) -> bool {
    position(set, item).is_some()
}

/// Appends `item` to `vec` unless an equal element is already there.
///
/// Returns whether `item` was appended.
///
/// # Examples
///
/// ```
/// let mut indexes = vec![4, 8];
/// assert!(chemu::push_unique(&mut indexes, 15));
/// assert!(!chemu::push_unique(&mut indexes, 8));
/// assert_eq!(indexes, [4, 8, 15]);
/// ```
pub fn push_unique<T: PartialEq>(vec: &mut Vec<T>, item: T) -> bool {
    if contains(vec, &item) {
        return false;
    }
    vec.push(item);
    true
}
