use std::collections::HashMap;

use traceit_types::Comment;

/// One comment plus its direct replies, in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

/// The discussion forest for one report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentThread {
    pub roots: Vec<CommentNode>,
    len: usize,
}

/// Assemble the flat per-report comment list into a forest.
///
/// Single linear pass: group ids under their parent id, then materialize
/// recursively from the roots. Sibling order is the backend's array order.
/// Depth is unbounded.
///
/// A comment whose parent id matches nothing in the list (the parent was
/// filtered out upstream, or the fetch raced a deletion) is promoted to a
/// root: the forest must account for every input comment exactly once.
/// Likewise a parent cycle (malformed data, the backend never produces
/// one) is broken at its first member in array order; that member becomes
/// a root and the rest of the cycle hangs beneath it.
pub fn build_thread(comments: &[Comment]) -> CommentThread {
    if comments.is_empty() {
        return CommentThread::default();
    }

    let known: HashMap<&str, usize> = comments
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.id.as_str(), idx))
        .collect();

    // Group child indices under their parent index, keeping array order.
    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut root_indices = Vec::new();
    let mut parent_of: Vec<Option<usize>> = vec![None; comments.len()];

    for (idx, comment) in comments.iter().enumerate() {
        let parent_idx = comment
            .parent_comment_id
            .as_deref()
            .and_then(|pid| known.get(pid).copied())
            // Self-referencing ids would otherwise recurse forever.
            .filter(|&pidx| pidx != idx);

        match parent_idx {
            Some(pidx) => {
                children.entry(pidx).or_default().push(idx);
                parent_of[idx] = Some(pidx);
            }
            None => root_indices.push(idx),
        }
    }

    // Cycle members are unreachable from every root. Detach each one from
    // its parent and promote it, then re-check what it now reaches.
    let mut reachable = vec![false; comments.len()];
    mark_reachable(&root_indices, &children, &mut reachable);
    for idx in 0..comments.len() {
        if reachable[idx] {
            continue;
        }
        if let Some(pidx) = parent_of[idx] {
            if let Some(siblings) = children.get_mut(&pidx) {
                siblings.retain(|&child| child != idx);
            }
        }
        root_indices.push(idx);
        mark_reachable(&[idx], &children, &mut reachable);
    }
    root_indices.sort_unstable();

    let roots = root_indices
        .into_iter()
        .map(|idx| materialize(idx, comments, &children))
        .collect();

    CommentThread {
        roots,
        len: comments.len(),
    }
}

fn mark_reachable(from: &[usize], children: &HashMap<usize, Vec<usize>>, reachable: &mut [bool]) {
    let mut stack = from.to_vec();
    while let Some(idx) = stack.pop() {
        if reachable[idx] {
            continue;
        }
        reachable[idx] = true;
        if let Some(kids) = children.get(&idx) {
            stack.extend(kids.iter().copied());
        }
    }
}

fn materialize(
    idx: usize,
    comments: &[Comment],
    children: &HashMap<usize, Vec<usize>>,
) -> CommentNode {
    let replies = children
        .get(&idx)
        .map(|child_indices| {
            child_indices
                .iter()
                .map(|&child| materialize(child, comments, children))
                .collect()
        })
        .unwrap_or_default();

    CommentNode {
        comment: comments[idx].clone(),
        replies,
    }
}

impl CommentThread {
    /// Total number of comments in the forest.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pre-order traversal over every node in the forest.
    pub fn flatten(&self) -> Vec<&CommentNode> {
        let mut out = Vec::with_capacity(self.len);
        for root in &self.roots {
            root.collect_preorder(&mut out);
        }
        out
    }

    /// Find a node by comment id anywhere in the forest.
    pub fn find(&self, id: &str) -> Option<&CommentNode> {
        self.flatten().into_iter().find(|n| n.comment.id == id)
    }

    /// Deepest nesting level; 0 for an empty thread, 1 for flat.
    pub fn max_depth(&self) -> usize {
        self.roots.iter().map(CommentNode::depth).max().unwrap_or(0)
    }
}

impl CommentNode {
    fn collect_preorder<'a>(&'a self, out: &mut Vec<&'a CommentNode>) {
        out.push(self);
        for reply in &self.replies {
            reply.collect_preorder(out);
        }
    }

    fn depth(&self) -> usize {
        1 + self
            .replies
            .iter()
            .map(CommentNode::depth)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use traceit_types::{CommentAuthor, Role};

    fn comment(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.to_string(),
            report_id: "r1".to_string(),
            parent_comment_id: parent.map(|p| p.to_string()),
            content: format!("comment {}", id),
            author: CommentAuthor {
                id: "u1".to_string(),
                email: "a@campus.edu".to_string(),
                role: Role::Student,
            },
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn flat_ids(thread: &CommentThread) -> Vec<String> {
        thread
            .flatten()
            .into_iter()
            .map(|n| n.comment.id.clone())
            .collect()
    }

    #[test]
    fn empty_list_builds_empty_thread() {
        let thread = build_thread(&[]);
        assert!(thread.is_empty());
        assert_eq!(thread.max_depth(), 0);
    }

    #[test]
    fn preorder_flatten_preserves_every_id_exactly_once() {
        let comments = vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", None),
            comment("d", Some("b")),
            comment("e", Some("a")),
        ];
        let thread = build_thread(&comments);

        let mut ids = flat_ids(&thread);
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(thread.len(), comments.len());
    }

    #[test]
    fn null_parent_appears_as_root() {
        let comments = vec![comment("a", None), comment("b", Some("a"))];
        let thread = build_thread(&comments);

        assert_eq!(thread.roots.len(), 1);
        assert_eq!(thread.roots[0].comment.id, "a");
    }

    #[test]
    fn reply_nests_under_its_parent_not_as_sibling() {
        let comments = vec![comment("a", None), comment("b", Some("a"))];
        let thread = build_thread(&comments);

        let a = thread.find("a").unwrap();
        assert_eq!(a.replies.len(), 1);
        assert_eq!(a.replies[0].comment.id, "b");
        // b must not also show up as a root
        assert!(thread.roots.iter().all(|r| r.comment.id != "b"));
    }

    #[test]
    fn reply_to_reply_nests_two_levels_deep() {
        let comments = vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
        ];
        let thread = build_thread(&comments);

        assert_eq!(thread.max_depth(), 3);
        let b = thread.find("b").unwrap();
        assert_eq!(b.replies[0].comment.id, "c");
    }

    #[test]
    fn sibling_order_follows_array_order() {
        let comments = vec![
            comment("root", None),
            comment("r1", Some("root")),
            comment("r2", Some("root")),
            comment("r3", Some("root")),
        ];
        let thread = build_thread(&comments);

        let replies: Vec<_> = thread.roots[0]
            .replies
            .iter()
            .map(|n| n.comment.id.as_str())
            .collect();
        assert_eq!(replies, vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn orphaned_reply_is_promoted_to_root() {
        // Parent never fetched: the node still has to appear somewhere.
        let comments = vec![comment("a", None), comment("b", Some("missing"))];
        let thread = build_thread(&comments);

        assert_eq!(thread.roots.len(), 2);
        assert_eq!(flat_ids(&thread).len(), 2);
    }

    #[test]
    fn self_referencing_comment_does_not_recurse() {
        let comments = vec![comment("a", Some("a"))];
        let thread = build_thread(&comments);

        assert_eq!(thread.roots.len(), 1);
        assert!(thread.roots[0].replies.is_empty());
    }

    #[test]
    fn mutual_parent_cycle_keeps_both_comments() {
        // a and b claim each other as parent; neither may be dropped.
        let comments = vec![comment("a", Some("b")), comment("b", Some("a"))];
        let thread = build_thread(&comments);

        let mut ids = flat_ids(&thread);
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(thread.roots.len(), 1);
        assert_eq!(thread.roots[0].comment.id, "a");
        assert_eq!(thread.roots[0].replies[0].comment.id, "b");
    }

    #[test]
    fn three_way_parent_cycle_keeps_every_comment() {
        let comments = vec![
            comment("a", Some("c")),
            comment("b", Some("a")),
            comment("c", Some("b")),
        ];
        let thread = build_thread(&comments);

        let mut ids = flat_ids(&thread);
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(thread.max_depth(), 3);
    }

    #[test]
    fn deep_chain_builds_without_depth_limit() {
        let mut comments = vec![comment("c0", None)];
        for i in 1..50 {
            comments.push(comment(&format!("c{}", i), Some(&format!("c{}", i - 1))));
        }
        let thread = build_thread(&comments);

        assert_eq!(thread.max_depth(), 50);
        assert_eq!(thread.len(), 50);
    }

    #[test]
    fn find_locates_nested_nodes() {
        let comments = vec![
            comment("a", None),
            comment("b", Some("a")),
            comment("c", Some("b")),
        ];
        let thread = build_thread(&comments);

        assert!(thread.find("c").is_some());
        assert!(thread.find("zz").is_none());
    }
}
