//! Association reconciliation
//!
//! Compares the desired membership of a many-to-many association with
//! the observed one and produces the add/remove delta that the
//! association endpoints expect.

use std::collections::BTreeSet;
use std::fmt;

/// Identifiers to associate and disassociate.
///
/// Both sets are sorted and duplicate-free so the request bodies built
/// from them are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDelta {
    /// In desired but not in observed
    pub to_add: BTreeSet<i64>,
    /// In observed but not in desired
    pub to_remove: BTreeSet<i64>,
}

impl MembershipDelta {
    /// True when at least one side of the delta is non-empty.
    pub fn changed(&self) -> bool {
        !self.to_add.is_empty() || !self.to_remove.is_empty()
    }

    /// Identifiers to add, in ascending order.
    pub fn additions(&self) -> Vec<i64> {
        self.to_add.iter().copied().collect()
    }

    /// Identifiers to remove, in ascending order.
    pub fn removals(&self) -> Vec<i64> {
        self.to_remove.iter().copied().collect()
    }

    /// Apply the delta to an observed membership.
    pub fn apply<I: IntoIterator<Item = i64>>(&self, observed: I) -> BTreeSet<i64> {
        let mut result: BTreeSet<i64> = observed
            .into_iter()
            .filter(|id| !self.to_remove.contains(id))
            .collect();
        result.extend(self.to_add.iter().copied());
        result
    }
}

impl fmt::Display for MembershipDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.to_add.len(), self.to_remove.len())
    }
}

/// Compute the membership delta that turns `observed` into `desired`.
///
/// Order and duplicates in the inputs are irrelevant.
pub fn reconcile<D, O>(desired: D, observed: O) -> MembershipDelta
where
    D: IntoIterator<Item = i64>,
    O: IntoIterator<Item = i64>,
{
    let desired: BTreeSet<i64> = desired.into_iter().collect();
    let observed: BTreeSet<i64> = observed.into_iter().collect();

    MembershipDelta {
        to_add: desired.difference(&observed).copied().collect(),
        to_remove: observed.difference(&desired).copied().collect(),
    }
}

/// Outcome of reconciling a single-valued association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleValueChange {
    /// Desired and observed agree
    Unchanged,
    /// Associate the given id, replacing any observed one
    Set(i64),
    /// Drop the observed association with the given id
    Clear(i64),
}

impl SingleValueChange {
    /// Id to associate, if any.
    pub fn to_set(self) -> Option<i64> {
        match self {
            Self::Set(id) => Some(id),
            _ => None,
        }
    }

    /// Id to disassociate, if any.
    pub fn to_clear(self) -> Option<i64> {
        match self {
            Self::Clear(id) => Some(id),
            _ => None,
        }
    }

    /// True for anything but [`SingleValueChange::Unchanged`].
    pub fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Reconcile an optional single-valued association.
///
/// The API reports "unset" as `0`, so `Some(0)` is treated like `None`
/// on both sides.
pub fn reconcile_single_valued(desired: Option<i64>, observed: Option<i64>) -> SingleValueChange {
    let desired = desired.filter(|id| *id != 0);
    let observed = observed.filter(|id| *id != 0);

    match (desired, observed) {
        (Some(d), Some(o)) if d == o => SingleValueChange::Unchanged,
        (Some(d), _) => SingleValueChange::Set(d),
        (None, Some(o)) => SingleValueChange::Clear(o),
        (None, None) => SingleValueChange::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i64]) -> BTreeSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_reconcile_both_directions() {
        let delta = reconcile([2, 3, 4], [1, 2, 3]);
        assert_eq!(delta.to_add, set(&[4]));
        assert_eq!(delta.to_remove, set(&[1]));
        assert!(delta.changed());
    }

    #[test]
    fn test_reconcile_identity() {
        let delta = reconcile([5, 1, 3], [3, 5, 1]);
        assert!(!delta.changed());
        assert_eq!(delta, MembershipDelta::default());
    }

    #[test]
    fn test_reconcile_owner_scenarios() {
        let delta = reconcile([100, 300], [0]);
        assert_eq!(delta.additions(), vec![100, 300]);
        assert_eq!(delta.removals(), vec![0]);
        assert!(delta.changed());

        let delta = reconcile([], [100, 300]);
        assert!(delta.to_add.is_empty());
        assert_eq!(delta.removals(), vec![100, 300]);

        assert!(!reconcile([7], [7]).changed());
    }

    #[test]
    fn test_reconcile_ignores_duplicates() {
        let delta = reconcile([2, 2, 3, 3], [1, 1, 2]);
        assert_eq!(delta.additions(), vec![3]);
        assert_eq!(delta.removals(), vec![1]);
    }

    #[test]
    fn test_delta_sides_are_disjoint() {
        let delta = reconcile([3, 4, 9, 10], [1, 2, 3, 9]);
        assert!(delta.to_add.is_disjoint(&delta.to_remove));
    }

    #[test]
    fn test_apply_yields_desired() {
        let observed = [10, 20, 30];
        let desired = [20, 40];
        let delta = reconcile(desired, observed);
        assert_eq!(delta.apply(observed), set(&desired));
    }

    #[test]
    fn test_display() {
        assert_eq!(reconcile([2, 3], [1]).to_string(), "+2 -1");
    }

    #[test]
    fn test_single_valued() {
        assert_eq!(reconcile_single_valued(None, None), SingleValueChange::Unchanged);
        assert_eq!(reconcile_single_valued(Some(4), Some(4)), SingleValueChange::Unchanged);
        assert_eq!(reconcile_single_valued(Some(4), None), SingleValueChange::Set(4));
        assert_eq!(reconcile_single_valued(Some(4), Some(3)), SingleValueChange::Set(4));
        assert_eq!(reconcile_single_valued(None, Some(3)), SingleValueChange::Clear(3));
    }

    #[test]
    fn test_single_valued_zero_means_unset() {
        assert_eq!(reconcile_single_valued(Some(0), None), SingleValueChange::Unchanged);
        assert_eq!(reconcile_single_valued(None, Some(0)), SingleValueChange::Unchanged);
        assert_eq!(reconcile_single_valued(Some(0), Some(5)), SingleValueChange::Clear(5));
    }

    #[test]
    fn test_single_valued_accessors() {
        let set = SingleValueChange::Set(9);
        assert_eq!(set.to_set(), Some(9));
        assert_eq!(set.to_clear(), None);
        assert!(set.changed());

        let clear = SingleValueChange::Clear(2);
        assert_eq!(clear.to_clear(), Some(2));
        assert_eq!(clear.to_set(), None);

        assert!(!SingleValueChange::Unchanged.changed());
    }
}
