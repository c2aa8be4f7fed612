use crate::classifier::{pages, round_hours, rule_for, ClassifiedIssue};
use crate::types::{Category, Frequency, Phase, Priority, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub hours: f64,
    pub frequency: Frequency,
    pub phase: Phase,
    /// Plan month (1-12) for a scheduled occurrence; `None` on templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_affected: Option<u32>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        category: Category,
        priority: Priority,
        hours: f64,
        frequency: Frequency,
        phase: Phase,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category,
            priority,
            hours,
            frequency,
            phase,
            month: None,
            pages_affected: None,
        }
    }

    /// A copy of this task pinned to a plan month.
    pub fn occurrence(&self, month: u8) -> Self {
        Self {
            month: Some(month),
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

struct Group<'a> {
    category: Category,
    severity: Severity,
    issues: Vec<&'a ClassifiedIssue>,
}

/// Merge classified issues into one-time remediation tasks.
///
/// One task per `(category, severity)` pair. Output is ordered critical →
/// important → medium; ties keep category-name order. That order is what the
/// summary and the CSV show, so keep it stable.
pub fn synthesize(issues: &[ClassifiedIssue]) -> Vec<Task> {
    let mut groups: Vec<Group> = Vec::new();
    for issue in issues {
        match groups
            .iter_mut()
            .find(|g| g.category == issue.category && g.severity == issue.severity)
        {
            Some(g) => g.issues.push(issue),
            None => groups.push(Group {
                category: issue.category,
                severity: issue.severity,
                issues: vec![issue],
            }),
        }
    }

    groups.sort_by(|a, b| {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    groups.iter().map(task_for_group).collect()
}

fn task_for_group(group: &Group) -> Task {
    // Counts come straight from the audit API; saturate instead of overflowing.
    let affected = group
        .issues
        .iter()
        .fold(0u32, |acc, i| acc.saturating_add(i.affected_count));
    // A finding reported with no count still stands for one unit of work.
    let units = group
        .issues
        .iter()
        .fold(0u32, |acc, i| acc.saturating_add(i.units()));
    let hours = round_hours(group.issues.iter().map(|i| i.estimated_hours).sum());

    let mut kinds: Vec<&str> = Vec::new();
    for issue in &group.issues {
        if !kinds.contains(&issue.kind.as_str()) {
            kinds.push(&issue.kind);
        }
    }

    let title = match kinds.as_slice() {
        [kind] => match rule_for(kind) {
            Some(rule) => rule.render_title(units),
            None => format!("Investigate and resolve {} on {}", humanize(kind), pages(units)),
        },
        _ => {
            let labels: Vec<String> = kinds
                .iter()
                .map(|k| rule_for(k).map(|r| r.label.to_string()).unwrap_or_else(|| humanize(k)))
                .collect();
            format!(
                "Fix {} {} {} issues: {}",
                units,
                group.severity,
                group.category.label(),
                labels.join(", ")
            )
        }
    };

    let description = group
        .issues
        .iter()
        .filter(|i| !i.description.is_empty())
        .map(|i| i.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    Task {
        title,
        description,
        category: group.category,
        priority: group.severity.into(),
        hours,
        frequency: Frequency::Once,
        phase: Phase::Build,
        month: None,
        pages_affected: (affected > 0).then_some(affected),
    }
}

fn humanize(kind: &str) -> String {
    let words = kind.replace('_', " ");
    if words.trim().is_empty() {
        "unclassified issue".to_string()
    } else {
        words
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::RawIssue;
    use crate::classifier::classify_all;
    use std::collections::HashSet;

    fn raw(kind: &str, count: u32) -> RawIssue {
        RawIssue {
            issue_type: kind.to_string(),
            affected_count: count,
            description: format!("{count} x {kind}"),
        }
    }

    #[test]
    fn single_kind_group_uses_its_template() {
        let tasks = synthesize(&classify_all(&[raw("missing_title", 12)]));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Add unique, optimized title tags to 12 pages");
        assert_eq!(tasks[0].priority, Priority::Critical);
        assert_eq!(tasks[0].frequency, Frequency::Once);
        assert_eq!(tasks[0].pages_affected, Some(12));
        assert_eq!(tasks[0].hours, 6.0);
    }

    #[test]
    fn same_kind_issues_merge_counts() {
        let tasks = synthesize(&classify_all(&[raw("missing_title", 2), raw("missing_titles", 3)]));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Add unique, optimized title tags to 5 pages");
    }

    #[test]
    fn mixed_kinds_use_category_title() {
        let tasks = synthesize(&classify_all(&[
            raw("missing_meta_description", 5),
            raw("missing_h1", 4),
        ]));
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].title,
            "Fix 9 important on-page issues: meta descriptions, H1 headings"
        );
    }

    #[test]
    fn output_sorted_by_severity_then_category() {
        let tasks = synthesize(&classify_all(&[
            raw("missing_alt_text", 4),
            raw("slow_page", 3),
            raw("missing_title", 1),
            raw("thin_content", 3),
            raw("broken_links", 2),
            raw("missing_meta_description", 5),
        ]));
        let order: Vec<(Priority, Category)> =
            tasks.iter().map(|t| (t.priority, t.category)).collect();
        assert_eq!(
            order,
            vec![
                (Priority::Critical, Category::OnPage),
                (Priority::Critical, Category::Technical),
                (Priority::Important, Category::OnPage),
                (Priority::Important, Category::Performance),
                (Priority::Medium, Category::Content),
                (Priority::Medium, Category::OnPage),
            ]
        );
    }

    #[test]
    fn merge_preserves_hours_and_bounds_task_count() {
        let raws = vec![
            raw("broken_links", 7),
            raw("server_errors", 2),
            raw("no_https", 0),
            raw("missing_alt_text", 9),
            raw("large_images", 4),
            raw("mystery", 3),
            raw("mystery_two", 1),
        ];
        let classified = classify_all(&raws);
        let tasks = synthesize(&classified);

        let pairs: HashSet<(Category, Severity)> =
            classified.iter().map(|c| (c.category, c.severity)).collect();
        assert!(tasks.len() <= pairs.len());

        let issue_hours: f64 = classified.iter().map(|c| c.estimated_hours).sum();
        let task_hours: f64 = tasks.iter().map(|t| t.hours).sum();
        assert!((issue_hours - task_hours).abs() < 0.05);
    }

    #[test]
    fn binary_issue_title_has_no_count() {
        let tasks = synthesize(&classify_all(&[raw("no_https", 0)]));
        assert_eq!(tasks[0].title, "Migrate the site to HTTPS and redirect all HTTP URLs");
        assert_eq!(tasks[0].pages_affected, None);
    }

    #[test]
    fn unknown_kind_gets_generic_title() {
        let tasks = synthesize(&classify_all(&[raw("hreflang_conflict", 1)]));
        assert_eq!(tasks[0].title, "Investigate and resolve hreflang conflict on 1 page");
        assert_eq!(tasks[0].category, Category::Other);
    }

    #[test]
    fn zero_count_title_names_one_page() {
        let tasks = synthesize(&classify_all(&[raw("broken_links", 0)]));
        assert_eq!(tasks[0].title, "Fix broken links on 1 page");
        assert_eq!(tasks[0].hours, 0.3);
        assert_eq!(tasks[0].pages_affected, None);

        let tasks = synthesize(&classify_all(&[raw("mystery", 0)]));
        assert_eq!(tasks[0].title, "Investigate and resolve mystery on 1 page");
    }

    #[test]
    fn mixed_group_counts_zero_count_issues_once() {
        let tasks = synthesize(&classify_all(&[
            raw("missing_h1", 0),
            raw("missing_meta_description", 0),
        ]));
        assert_eq!(
            tasks[0].title,
            "Fix 2 important on-page issues: H1 headings, meta descriptions"
        );
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let tasks = synthesize(&classify_all(&[
            raw("broken_links", 3_000_000_000),
            raw("broken_links", 3_000_000_000),
        ]));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].pages_affected, Some(u32::MAX));
        assert_eq!(
            tasks[0].title,
            format!("Fix broken links on {} pages", u32::MAX)
        );
    }

    #[test]
    fn empty_input_yields_no_tasks() {
        assert!(synthesize(&[]).is_empty());
    }
}
