use std::collections::HashSet;

use traceit_types::Comment;

use super::assembler::CommentThread;

/// Aggregates the browsing view shows per report ("Discussion (n)").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadStats {
    pub total: usize,
    pub top_level: usize,
    pub replies: usize,
    pub participants: usize,
    pub max_depth: usize,
}

impl ThreadStats {
    pub fn from_comments(comments: &[Comment], thread: &CommentThread) -> Self {
        let top_level = comments.iter().filter(|c| c.is_top_level()).count();
        let participants: HashSet<&str> =
            comments.iter().map(|c| c.author.id.as_str()).collect();

        ThreadStats {
            total: comments.len(),
            top_level,
            replies: comments.len() - top_level,
            participants: participants.len(),
            max_depth: thread.max_depth(),
        }
    }
}
