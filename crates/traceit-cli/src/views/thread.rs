use owo_colors::OwoColorize;
use traceit_engine::{build_thread, AuthorBadge, CommentNode};
use traceit_types::Comment;

use super::format_relative_time;

/// Render the full discussion forest, two spaces of indent per reply
/// level. `highlight` marks one comment id (a freshly posted one) with a
/// leading `>`.
pub fn render_thread(comments: &[Comment], report_owner_id: &str, highlight: Option<&str>) -> String {
    let thread = build_thread(comments);
    if thread.is_empty() {
        return "No comments yet.\n".to_string();
    }

    let mut out = String::new();
    for root in &thread.roots {
        render_node(&mut out, root, 0, report_owner_id, highlight);
    }
    out
}

fn render_node(
    out: &mut String,
    node: &CommentNode,
    depth: usize,
    report_owner_id: &str,
    highlight: Option<&str>,
) {
    let indent = "  ".repeat(depth);
    let marker = if highlight == Some(node.comment.id.as_str()) {
        "> "
    } else {
        ""
    };
    out.push_str(&format!(
        "{}{}{} {} {}\n",
        indent,
        marker,
        badge_label(&node.comment, report_owner_id),
        node.comment.author.email,
        format_relative_time(node.comment.created_at).bright_black(),
    ));
    out.push_str(&format!("{}  {}\n", indent, node.comment.content));

    for reply in &node.replies {
        render_node(out, reply, depth + 1, report_owner_id, highlight);
    }
}

fn badge_label(comment: &Comment, report_owner_id: &str) -> String {
    let badge = AuthorBadge::classify(comment, report_owner_id);
    match badge {
        AuthorBadge::Admin => format!("[{}]", badge.label().red()),
        AuthorBadge::Owner => format!("[{}]", badge.label().yellow()),
        AuthorBadge::Student => format!("[{}]", badge.label().cyan()),
    }
}
