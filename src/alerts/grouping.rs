use std::str::FromStr;

use thiserror::Error;

/// Label of the bucket collecting devices that match no configured group.
pub const OTHER_GROUP: &str = "Other";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GroupRuleError {
    #[error("empty group label in {0:?}")]
    EmptyLabel(String),
    #[error("group label {0:?} is reserved for unmatched devices")]
    Reserved(String),
    #[error("group label {0:?} is listed more than once")]
    Duplicate(String),
}

/// A named group of devices, e.g. a region or an office.
///
/// A device belongs to a group when its display name starts with the group
/// label (ignoring ASCII case) followed by the end of the name or any
/// non-alphanumeric character. So `US` takes `"US – Huron"` and
/// `"US Office - Room D"` but not `"USB dock"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub label: String,
    pub emoji: Option<String>,
}

impl GroupRule {
    pub fn new(label: impl Into<String>, emoji: Option<&str>) -> Self {
        Self {
            label: label.into(),
            emoji: emoji.map(String::from),
        }
    }

    pub fn matches(&self, device_name: &str) -> bool {
        let name = device_name.trim_start();
        let label_len = self.label.len();
        match name.get(..label_len) {
            Some(prefix) if prefix.eq_ignore_ascii_case(&self.label) => name[label_len..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric()),
            _ => false,
        }
    }
}

impl FromStr for GroupRule {
    type Err = GroupRuleError;

    /// Parses `label` or `label=emoji`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, emoji) = match s.split_once('=') {
            Some((label, emoji)) => (label.trim(), Some(emoji.trim()).filter(|e| !e.is_empty())),
            None => (s.trim(), None),
        };
        if label.is_empty() {
            return Err(GroupRuleError::EmptyLabel(s.to_string()));
        }
        if label.eq_ignore_ascii_case(OTHER_GROUP) {
            return Err(GroupRuleError::Reserved(label.to_string()));
        }
        Ok(GroupRule::new(label, emoji))
    }
}

/// Parses a comma-separated list of `label[=emoji]` entries, keeping order.
pub fn parse_group_rules(raw: &str) -> Result<Vec<GroupRule>, GroupRuleError> {
    let mut rules: Vec<GroupRule> = Vec::new();
    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let rule = entry.parse::<GroupRule>()?;
        if rules.iter().any(|r| r.label.eq_ignore_ascii_case(&rule.label)) {
            return Err(GroupRuleError::Duplicate(rule.label));
        }
        rules.push(rule);
    }
    Ok(rules)
}

/// Position of the group a device name belongs to.
///
/// Total: names matching none of `rules` map to `rules.len()`, the slot of
/// the [`OTHER_GROUP`] bucket.
pub fn group_index(device_name: &str, rules: &[GroupRule]) -> usize {
    rules
        .iter()
        .position(|r| r.matches(device_name))
        .unwrap_or(rules.len())
}

/// Label of the group a device name belongs to.
pub fn group_label<'a>(device_name: &str, rules: &'a [GroupRule]) -> &'a str {
    rules
        .get(group_index(device_name, rules))
        .map_or(OTHER_GROUP, |r| r.label.as_str())
}
