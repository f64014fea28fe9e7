//! Train/validation split by recording user.
//!
//! Splitting by user keeps one person's recordings out of both sides, so
//! validation measures generalisation to new signers. Samples without a
//! user form a single group of their own.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

/// Sample indices on each side of a split, ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSplit {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Assign whole users to train or validation.
///
/// Users are shuffled with `rng`; `floor(users * val_fraction)` of them, and
/// at least one when `val_fraction > 0`, go to validation. At least one user
/// always stays in train.
pub fn split_by_user<R: Rng + ?Sized>(
    users: &[Option<String>],
    val_fraction: f64,
    rng: &mut R,
) -> UserSplit {
    // group indices by user, in order of first appearance
    let mut order: Vec<Option<&str>> = Vec::new();
    let mut groups: HashMap<Option<&str>, Vec<usize>> = HashMap::new();
    for (index, user) in users.iter().enumerate() {
        let key = user.as_deref();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(index);
    }

    let n_users = order.len();
    let mut n_val = if val_fraction > 0.0 {
        ((n_users as f64 * val_fraction).floor() as usize).max(1)
    } else {
        0
    };
    if n_val >= n_users {
        if n_users > 0 {
            warn!(
                users = n_users,
                requested = n_val,
                "not enough users for a validation split, keeping one user in train"
            );
        }
        n_val = n_users.saturating_sub(1);
    }

    order.shuffle(rng);
    let (train_users, val_users) = order.split_at(n_users - n_val);

    UserSplit {
        train: gather(train_users, &groups),
        validation: gather(val_users, &groups),
    }
}

fn gather<'u>(
    keys: &[Option<&'u str>],
    groups: &HashMap<Option<&'u str>, Vec<usize>>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = keys
        .iter()
        .filter_map(|k| groups.get(k))
        .flatten()
        .copied()
        .collect();
    indices.sort_unstable();
    indices
}
