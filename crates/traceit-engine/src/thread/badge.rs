use traceit_types::{Comment, Role};

/// Label shown next to a commenter's name.
///
/// Evaluated independently per comment: admin wins over owner, owner is
/// whoever created the report under discussion, everyone else is a
/// student. Never inherited down a reply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorBadge {
    Admin,
    Owner,
    Student,
}

impl AuthorBadge {
    pub fn classify(comment: &Comment, report_owner_id: &str) -> Self {
        if comment.author.role == Role::Admin {
            AuthorBadge::Admin
        } else if comment.author.id == report_owner_id {
            AuthorBadge::Owner
        } else {
            AuthorBadge::Student
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthorBadge::Admin => "Admin",
            AuthorBadge::Owner => "Owner",
            AuthorBadge::Student => "Student",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use traceit_types::CommentAuthor;

    fn comment_by(user_id: &str, role: Role) -> Comment {
        Comment {
            id: "c1".to_string(),
            report_id: "r1".to_string(),
            parent_comment_id: None,
            content: "hi".to_string(),
            author: CommentAuthor {
                id: user_id.to_string(),
                email: "x@campus.edu".to_string(),
                role,
            },
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn admin_role_wins_even_for_the_owner() {
        let c = comment_by("owner-id", Role::Admin);
        assert_eq!(AuthorBadge::classify(&c, "owner-id"), AuthorBadge::Admin);
    }

    #[test]
    fn report_creator_is_owner() {
        let c = comment_by("owner-id", Role::Student);
        assert_eq!(AuthorBadge::classify(&c, "owner-id"), AuthorBadge::Owner);
    }

    #[test]
    fn everyone_else_is_student() {
        let c = comment_by("someone", Role::Student);
        assert_eq!(AuthorBadge::classify(&c, "owner-id"), AuthorBadge::Student);
    }
}
