//! Ordered-sequence helpers used by the structural edit operations

/// Move the element at `from` to position `to`
///
/// Both indices are clamped into `[0, len - 1]`, so an out-of-range target
/// lands on the nearest end. The operation is a pure permutation: no
/// element is duplicated, dropped, or modified. Empty sequences are left
/// untouched.
///
/// # Parameters
/// * `items` - The sequence to reorder in place
/// * `from` - Current index of the element to move
/// * `to` - Requested destination index
///
/// # Returns
/// * `true` if the order changed
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    let Some(last) = items.len().checked_sub(1) else {
        return false;
    };

    let from = from.min(last);
    let to = to.min(last);
    if from == to {
        return false;
    }

    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Move the element at `index` one step towards the front
pub fn move_up<T>(items: &mut Vec<T>, index: usize) -> bool {
    move_item(items, index, index.saturating_sub(1))
}

/// Move the element at `index` one step towards the back
pub fn move_down<T>(items: &mut Vec<T>, index: usize) -> bool {
    move_item(items, index, index.saturating_add(1))
}

/// Remove the element at `index`, or do nothing if it is out of range
pub fn remove_item<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index < items.len() {
        Some(items.remove(index))
    } else {
        None
    }
}
