//! Recovery from a desynchronized cart cache.
//!
//! The entries and their mirror live under independently expiring keys. When
//! the entries are gone but the mirror survived, the mirror is the only copy
//! of the cart and the entries are rebuilt from it before any mutation runs.

use crate::cart::entry::{unproject, CartEntry};
use crate::cart::store::CartSnapshot;
use crate::error::CartError;

/// The entry list a mutation should operate on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled {
    pub entries: Vec<CartEntry>,
    /// True when `entries` were rebuilt from the mirror and must be committed.
    pub rebuilt: bool,
}

/// Decide which entry list is authoritative for the next mutation.
///
/// - entries present and non-empty: used as is.
/// - entries empty or absent, mirror non-empty: rebuilt from the mirror,
///   skipping lines without a positive quantity.
/// - entries committed but empty, mirror empty: a real empty cart.
/// - no committed entries and no mirror lines: [`CartError::EmptyCart`].
pub fn reconcile(snapshot: CartSnapshot) -> Result<Reconciled, CartError> {
    let CartSnapshot { entries, lines } = snapshot;
    let lines = lines.unwrap_or_default();

    match entries {
        Some(entries) if !entries.is_empty() => Ok(Reconciled {
            entries,
            rebuilt: false,
        }),
        _ if !lines.is_empty() => Ok(Reconciled {
            entries: unproject(&lines),
            rebuilt: true,
        }),
        Some(entries) => Ok(Reconciled {
            entries,
            rebuilt: false,
        }),
        None => Err(CartError::EmptyCart),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::entry::project;
    use crate::money::{Currency, Money};
    use crate::product::ProductSnapshot;

    fn entries() -> Vec<CartEntry> {
        vec![CartEntry::new(
            ProductSnapshot::new("X", "Thing", Money::new(100, Currency::USD)),
            4,
        )]
    }

    #[test]
    fn test_populated_entries_win() {
        let e = entries();
        let reconciled = reconcile(CartSnapshot {
            entries: Some(e.clone()),
            lines: Some(Vec::new()),
        })
        .unwrap();

        assert_eq!(reconciled.entries, e);
        assert!(!reconciled.rebuilt);
    }

    #[test]
    fn test_rebuild_from_mirror_when_entries_absent() {
        let e = entries();
        let reconciled = reconcile(CartSnapshot {
            entries: None,
            lines: Some(project(&e)),
        })
        .unwrap();

        assert_eq!(reconciled.entries, e);
        assert!(reconciled.rebuilt);
    }

    #[test]
    fn test_rebuild_from_mirror_when_entries_empty() {
        let e = entries();
        let reconciled = reconcile(CartSnapshot {
            entries: Some(Vec::new()),
            lines: Some(project(&e)),
        })
        .unwrap();

        assert!(reconciled.rebuilt);
        assert_eq!(reconciled.entries[0].quantity, 4);
    }

    #[test]
    fn test_rebuild_skips_lines_without_quantity() {
        let mut e = entries();
        e.push(CartEntry::new(
            ProductSnapshot::new("Y", "Other", Money::new(100, Currency::USD)),
            1,
        ));
        let mut lines = project(&e);
        lines[1].quantity = 0;

        let reconciled = reconcile(CartSnapshot {
            entries: None,
            lines: Some(lines),
        })
        .unwrap();

        assert!(reconciled.rebuilt);
        assert_eq!(reconciled.entries.len(), 1);
        assert!(reconciled.entries.iter().all(|entry| entry.quantity >= 1));
    }

    #[test]
    fn test_committed_empty_cart() {
        let reconciled = reconcile(CartSnapshot {
            entries: Some(Vec::new()),
            lines: None,
        })
        .unwrap();

        assert!(reconciled.entries.is_empty());
        assert!(!reconciled.rebuilt);
    }

    #[test]
    fn test_nothing_cached_is_empty_cart() {
        assert!(matches!(
            reconcile(CartSnapshot::default()),
            Err(CartError::EmptyCart)
        ));
        assert!(matches!(
            reconcile(CartSnapshot {
                entries: None,
                lines: Some(Vec::new()),
            }),
            Err(CartError::EmptyCart)
        ));
    }
}
