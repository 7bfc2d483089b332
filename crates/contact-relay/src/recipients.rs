/// Mailbox and subject label a reason-code is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipientRule {
    pub mailbox: &'static str,
    pub subject: &'static str,
}

const SUPPORT: &str = "support@parfumis.com";
const INFO: &str = "info@parfumis.com";
const MARKETING: &str = "marketing@parfumis.com";

const RULES: [(&str, RecipientRule); 6] = [
    (
        "issue",
        RecipientRule {
            mailbox: SUPPORT,
            subject: "Issue Report",
        },
    ),
    (
        "general",
        RecipientRule {
            mailbox: SUPPORT,
            subject: "General Inquiry",
        },
    ),
    (
        "host",
        RecipientRule {
            mailbox: INFO,
            subject: "Host Parfumis Request",
        },
    ),
    (
        "buy",
        RecipientRule {
            mailbox: INFO,
            subject: "Purchase Interest",
        },
    ),
    (
        "ad",
        RecipientRule {
            mailbox: MARKETING,
            subject: "Advertising Inquiry",
        },
    ),
    (
        "request",
        RecipientRule {
            mailbox: INFO,
            subject: "Parfum Request",
        },
    ),
];

/// Used for reason-codes outside the table.
pub const FALLBACK: RecipientRule = RecipientRule {
    mailbox: INFO,
    subject: "Contact Form Submission",
};

pub fn recipient_for(reason: &str) -> RecipientRule {
    RULES
        .iter()
        .find(|(code, _)| *code == reason)
        .map(|(_, rule)| *rule)
        .unwrap_or(FALLBACK)
}
