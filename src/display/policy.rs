//! Policy display formatting

use crate::models::TIMESTAMP_FORMAT;
use crate::retention::{format_span, Policy, RuleKind};

/// Format the rules of a policy with their cutoffs
pub fn format_policy(policy: &Policy) -> String {
    if policy.is_empty() {
        return "No retention rules configured.".to_string();
    }

    let kind_width = policy
        .rules()
        .iter()
        .map(|r| r.kind().to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    if let Some(first) = policy.rules().first() {
        output.push_str(&format!(
            "Retention policy as of {}\n\n",
            first.reference_time().format(TIMESTAMP_FORMAT)
        ));
    }
    output.push_str(&format!(
        "{:<kind_width$}  {:>8}  {:<19}  {}\n",
        "Keep",
        "Within",
        "Since",
        "Description",
        kind_width = kind_width,
    ));
    output.push_str(&format!(
        "{:-<kind_width$}  {:->8}  {:-<19}  {:-<11}\n",
        "",
        "",
        "",
        "",
        kind_width = kind_width,
    ));

    for rule in policy.rules() {
        let description = match rule.kind() {
            RuleKind::KeepAll => "every archive".to_string(),
            RuleKind::Binned(shape) => format!("one archive per {} bin", shape),
        };
        output.push_str(&format!(
            "{:<kind_width$}  {:>8}  {:<19}  {}\n",
            rule.kind().to_string(),
            format_span(rule.duration()),
            rule.min_time().format(TIMESTAMP_FORMAT).to_string(),
            description,
            kind_width = kind_width,
        ));
    }

    output
}
