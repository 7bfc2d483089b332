use std::collections::BTreeMap;

use super::{CONTACT_REASON_KEY, Flow, FlowCatalog, InitialStep, ReasonOption, Step, StepKind};

const BUSINESS_TYPES: [&str; 4] = ["Retail", "Hospitality", "Entertainment", "Other"];

fn endpoint(code: &str) -> String {
    format!("/submitContact?type={code}")
}

fn contact_steps(first: &str, last: &str, phone: &str) -> Vec<Step> {
    vec![
        Step::new(first, StepKind::Text, "firstName"),
        Step::new(last, StepKind::Text, "lastName"),
        Step::new(phone, StepKind::Tel, "phone"),
        Step::new("Email Address:", StepKind::Email, "email"),
    ]
}

fn flow(code: &str, mut steps: Vec<Step>, rest: impl IntoIterator<Item = Step>) -> Flow {
    steps.extend(rest);
    Flow {
        endpoint: endpoint(code),
        steps,
    }
}

fn standard_contact() -> Vec<Step> {
    contact_steps("First Name:", "Last Name:", "Phone Number:")
}

impl FlowCatalog {
    /// The contact flows offered on the Parfumis contact page.
    pub fn builtin() -> Self {
        let initial = InitialStep {
            question: "Why are you contacting us?".into(),
            name: CONTACT_REASON_KEY.into(),
            options: [
                ("Report Issue", "issue"),
                ("General Inquiry", "general"),
                ("Parfum Request", "request"),
                ("Host Parfumis", "host"),
                ("Buy Parfumis", "buy"),
                ("Parfumis Ads", "ad"),
            ]
            .into_iter()
            .map(|(label, value)| ReasonOption {
                label: label.into(),
                value: value.into(),
            })
            .collect(),
        };

        let mut flows = BTreeMap::new();
        flows.insert(
            "issue".to_string(),
            flow(
                "issue",
                contact_steps(
                    "Please provide your first name:",
                    "Please provide your last name:",
                    "Contact Phone Number:",
                ),
                [
                    Step::new("Location of the issue:", StepKind::Text, "location"),
                    Step::new("Date of the incident:", StepKind::Date, "date"),
                    Step::new("Time of the incident:", StepKind::Time, "time"),
                    Step::new("Nature of the issue:", StepKind::Radio, "issueType").with_options([
                        "Payment Issue",
                        "Machine Malfunction",
                        "Other",
                    ]),
                    Step::new(
                        "Please describe the issue in detail:",
                        StepKind::Textarea,
                        "issueDescription",
                    ),
                ],
            ),
        );
        flows.insert(
            "host".to_string(),
            flow(
                "host",
                standard_contact(),
                [
                    Step::new("Business Name:", StepKind::Text, "businessName"),
                    Step::new("Business Address:", StepKind::Text, "address"),
                    Step::new("Type of Business:", StepKind::Select, "businessType")
                        .with_options(BUSINESS_TYPES),
                    Step::new("Average Daily Traffic:", StepKind::Number, "dailyVisitors"),
                ],
            ),
        );
        flows.insert(
            "buy".to_string(),
            flow(
                "buy",
                standard_contact(),
                [
                    Step::new(
                        "Business Name (if applicable):",
                        StepKind::Text,
                        "businessName",
                    ),
                    Step::new(
                        "Please explain your interest in purchasing a Parfumis machine:",
                        StepKind::Textarea,
                        "purchaseInterest",
                    ),
                ],
            ),
        );
        flows.insert(
            "ad".to_string(),
            flow(
                "ad",
                standard_contact(),
                [
                    Step::new("Business Name:", StepKind::Text, "businessName"),
                    Step::new("Type of Business:", StepKind::Select, "businessType")
                        .with_options(BUSINESS_TYPES),
                    Step::new(
                        "Proposed Advertising Budget Per Month",
                        StepKind::Number,
                        "adBudget",
                    ),
                ],
            ),
        );
        flows.insert(
            "request".to_string(),
            flow(
                "request",
                standard_contact(),
                [Step::new(
                    "Which fragrance are you requesting?",
                    StepKind::Text,
                    "requestedParfum",
                )],
            ),
        );
        flows.insert(
            "general".to_string(),
            flow(
                "general",
                standard_contact(),
                [Step::new(
                    "How can we assist you?",
                    StepKind::Textarea,
                    "inquiry",
                )],
            ),
        );

        FlowCatalog { initial, flows }
    }
}
