//! Previous/next post resolution.
//!
//! Posts are placed on a timeline ordered by first publication date, ties
//! broken by document id, undated posts last. A post's "prev" is the one
//! published immediately before it and its "next" the one immediately after.

use crate::dates;
use crate::types::{Neighbors, Post, PostLink};
use std::collections::HashMap;

/// Indices of `posts` in timeline order.
pub fn timeline(posts: &[Post]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..posts.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&posts[a], &posts[b]);
        dates::compare_published(
            a.first_publication_date.as_deref(),
            b.first_publication_date.as_deref(),
        )
        .then_with(|| a.id.cmp(&b.id))
    });
    order
}

/// Neighbors of every post, keyed by uid.
pub fn resolve_all(posts: &[Post]) -> HashMap<String, Neighbors> {
    let order = timeline(posts);
    let link = |i: usize| PostLink {
        uid: posts[i].uid.clone(),
        title: posts[i].title.clone(),
    };

    order
        .iter()
        .enumerate()
        .map(|(pos, &idx)| {
            let prev = pos.checked_sub(1).map(|p| link(order[p]));
            let next = order.get(pos + 1).map(|&n| link(n));
            (posts[idx].uid.clone(), Neighbors { prev, next })
        })
        .collect()
}

/// Neighbors of the post with `uid`. Unknown uids have none.
pub fn resolve(posts: &[Post], uid: &str) -> Neighbors {
    resolve_all(posts).remove(uid).unwrap_or_default()
}
