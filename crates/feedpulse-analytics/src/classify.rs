//! Title classification against configured label rules.

use feedpulse_core::LabelRules;

/// Label applied when no style rule matches a title. Keyword rules get
/// no fallback: a title about nothing configured is simply untagged.
const PLAIN_STYLE_LABEL: &str = "style:plain-statement";

/// Substring classifier built from injected [`LabelRules`].
///
/// Each rule is an independent membership test: a title carrying any of
/// a rule's trigger substrings gets that rule's label. Labels are
/// prefixed with their group (`keyword:` / `style:`) so both groups can
/// share one correlation pass without colliding.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<(String, Vec<String>)>,
    style_rule_count: usize,
}

impl Classifier {
    #[must_use]
    pub fn from_rules(rules: &LabelRules) -> Self {
        let mut prefixed = Vec::with_capacity(rules.style.len() + rules.keyword.len());
        for rule in &rules.style {
            prefixed.push((format!("style:{}", rule.label), rule.triggers.clone()));
        }
        for rule in &rules.keyword {
            prefixed.push((format!("keyword:{}", rule.label), rule.triggers.clone()));
        }
        Self {
            rules: prefixed,
            style_rule_count: rules.style.len(),
        }
    }

    /// All labels whose triggers appear in `title`. At most one label
    /// per rule, regardless of how many of its triggers match.
    #[must_use]
    pub fn labels(&self, title: &str) -> Vec<String> {
        let mut labels = Vec::new();
        let mut style_matched = false;

        for (i, (label, triggers)) in self.rules.iter().enumerate() {
            if triggers.iter().any(|t| title.contains(t.as_str())) {
                if i < self.style_rule_count {
                    style_matched = true;
                }
                labels.push(label.clone());
            }
        }

        if !style_matched && self.style_rule_count > 0 {
            labels.push(PLAIN_STYLE_LABEL.to_string());
        }

        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedpulse_core::LabelRule;

    fn rule(label: &str, triggers: &[&str]) -> LabelRule {
        LabelRule {
            label: label.to_string(),
            triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn classifier() -> Classifier {
        Classifier::from_rules(&LabelRules {
            keyword: vec![
                rule("deepseek", &["DeepSeek", "deepseek"]),
                rule("ocr", &["OCR"]),
            ],
            style: vec![
                rule("question", &["?"]),
                rule("comparison", &["vs", "VS"]),
                rule("hands-on", &["tested", "I tried"]),
            ],
        })
    }

    #[test]
    fn keyword_trigger_applies_prefixed_label() {
        let labels = classifier().labels("DeepSeek ships a new release");
        assert!(labels.contains(&"keyword:deepseek".to_string()), "{labels:?}");
    }

    #[test]
    fn multiple_rules_can_match_one_title() {
        let labels = classifier().labels("DeepSeek OCR vs the field: tested");
        assert!(labels.contains(&"keyword:deepseek".to_string()));
        assert!(labels.contains(&"keyword:ocr".to_string()));
        assert!(labels.contains(&"style:comparison".to_string()));
        assert!(labels.contains(&"style:hands-on".to_string()));
    }

    #[test]
    fn rule_matches_at_most_once() {
        // Both triggers of "deepseek" present; label appears once.
        let labels = classifier().labels("DeepSeek or deepseek");
        let count = labels.iter().filter(|l| *l == "keyword:deepseek").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn unmatched_style_falls_back_to_plain() {
        let labels = classifier().labels("A quiet release note");
        assert!(labels.contains(&PLAIN_STYLE_LABEL.to_string()), "{labels:?}");
    }

    #[test]
    fn matched_style_suppresses_plain_fallback() {
        let labels = classifier().labels("Is this the best model?");
        assert!(labels.contains(&"style:question".to_string()));
        assert!(!labels.contains(&PLAIN_STYLE_LABEL.to_string()));
    }

    #[test]
    fn keyword_match_alone_still_gets_plain_style() {
        let labels = classifier().labels("OCR accuracy deep dive");
        assert!(labels.contains(&"keyword:ocr".to_string()));
        assert!(labels.contains(&PLAIN_STYLE_LABEL.to_string()));
    }

    #[test]
    fn matching_is_case_sensitive_per_trigger() {
        // Only "OCR" is configured; lowercase should not match.
        let labels = classifier().labels("ocr in the wild");
        assert!(!labels.iter().any(|l| l == "keyword:ocr"), "{labels:?}");
    }

    #[test]
    fn no_style_rules_means_no_fallback() {
        let c = Classifier::from_rules(&LabelRules {
            keyword: vec![rule("ocr", &["OCR"])],
            style: vec![],
        });
        let labels = c.labels("nothing in particular");
        assert!(labels.is_empty(), "{labels:?}");
    }
}
