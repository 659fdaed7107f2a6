/// An inbound chat command from an approver. Commands are colon-delimited
/// with a case-insensitive verb: `approve:<postId>`, `change:<postId>[:<feedback>]`,
/// `pause:<postId>` and `reject:<postId>`. Anything else is `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Approve { post_id: String },
    RequestChange { post_id: String, feedback: Option<String> },
    Pause { post_id: String },
    Reject { post_id: String },
    Unknown { raw: String },
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let mut parts = trimmed.splitn(3, ':');
        let verb = parts.next().unwrap_or("").trim().to_lowercase();
        let post_id = parts.next().map(|p| p.trim().to_string());
        // Feedback may itself contain colons, splitn keeps the remainder intact.
        let rest = parts.next().map(|p| p.trim().to_string());

        let post_id = match post_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Self::Unknown {
                    raw: trimmed.to_string(),
                }
            }
        };

        match verb.as_str() {
            "approve" => Self::Approve { post_id },
            "change" => Self::RequestChange {
                post_id,
                feedback: rest.filter(|f| !f.is_empty()),
            },
            "pause" => Self::Pause { post_id },
            "reject" => Self::Reject { post_id },
            _ => Self::Unknown {
                raw: trimmed.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_approve_commands() {
        assert_eq!(
            Command::parse("approve:post123"),
            Command::Approve {
                post_id: "post123".into()
            }
        );
        assert_eq!(
            Command::parse("  APPROVE:post123  "),
            Command::Approve {
                post_id: "post123".into()
            }
        );
    }

    #[test]
    fn it_parses_change_requests_with_and_without_feedback() {
        assert_eq!(
            Command::parse("change:post123"),
            Command::RequestChange {
                post_id: "post123".into(),
                feedback: None
            }
        );
        assert_eq!(
            Command::parse("change:post123:"),
            Command::RequestChange {
                post_id: "post123".into(),
                feedback: None
            }
        );
        assert_eq!(
            Command::parse("change:post123:please fix the headline"),
            Command::RequestChange {
                post_id: "post123".into(),
                feedback: Some("please fix the headline".into())
            }
        );
    }

    #[test]
    fn feedback_keeps_its_own_colons() {
        assert_eq!(
            Command::parse("change:post123:fix this: and that: too"),
            Command::RequestChange {
                post_id: "post123".into(),
                feedback: Some("fix this: and that: too".into())
            }
        );
    }

    #[test]
    fn it_parses_pause_and_reject() {
        assert_eq!(
            Command::parse("Pause:p1"),
            Command::Pause {
                post_id: "p1".into()
            }
        );
        assert_eq!(
            Command::parse("reject:p1"),
            Command::Reject {
                post_id: "p1".into()
            }
        );
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(
            Command::parse("hello there"),
            Command::Unknown {
                raw: "hello there".into()
            }
        );
        assert_eq!(
            Command::parse("approve:"),
            Command::Unknown {
                raw: "approve:".into()
            }
        );
        assert_eq!(
            Command::parse("publish:p1"),
            Command::Unknown {
                raw: "publish:p1".into()
            }
        );
        assert_eq!(Command::parse(""), Command::Unknown { raw: "".into() });
    }
}
