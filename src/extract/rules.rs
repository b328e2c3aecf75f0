//! Labeled extraction rules for `Recent Stats` blocks.
//!
//! Each rule pairs a `label: <number>` pattern with the field it fills.
//! Rules are evaluated per line in order; a normal rule overwrites whatever
//! the field held (last match wins), a fallback rule only fires while its
//! field is still unset.

use regex::Regex;

/// Decimal number with optional sign, fraction and exponent.
pub const NUMBER: &str = r"[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?";

/// Fields of a stats block that rules can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsField {
    MonsterHp,
    GradNorm,
    Loss,
    ReturnMean,
}

impl StatsField {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            StatsField::MonsterHp => 0,
            StatsField::GradNorm => 1,
            StatsField::Loss => 2,
            StatsField::ReturnMean => 3,
        }
    }
}

/// Values collected so far for one block; `None` means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldValues([Option<f64>; StatsField::COUNT]);

impl FieldValues {
    pub fn get(&self, field: StatsField) -> Option<f64> {
        self.0[field.index()]
    }

    pub fn set(&mut self, field: StatsField, value: f64) {
        self.0[field.index()] = Some(value);
    }
}

/// One `label: <number>` extraction rule.
#[derive(Debug, Clone)]
pub struct FieldRule {
    label: &'static str,
    pattern: Regex,
    field: StatsField,
    fallback: bool,
}

impl FieldRule {
    pub fn new(label: &'static str, field: StatsField) -> Self {
        let pattern = Regex::new(&format!(r"{}:\s*({})", regex::escape(label), NUMBER))
            .expect("field rule pattern is valid");
        Self {
            label,
            pattern,
            field,
            fallback: false,
        }
    }

    /// Only fire while the target field is still unset.
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Value captured on `line`, if the label is present and parses.
    pub fn capture(&self, line: &str) -> Option<f64> {
        let text = self.pattern.captures(line)?.get(1)?.as_str();
        match text.parse::<f64>() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(label = self.label, text, %err, "skipping unparseable value");
                None
            }
        }
    }
}

/// Rules for the `my_main Recent Stats` block, in evaluation order.
///
/// `td_error_abs` stands in for the loss only when no `loss_td` has been
/// seen yet in the block.
pub fn recent_stats_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new("monster_last_hp_mean", StatsField::MonsterHp),
        FieldRule::new("grad_norm", StatsField::GradNorm),
        FieldRule::new("loss_td", StatsField::Loss),
        FieldRule::new("td_error_abs", StatsField::Loss).as_fallback(),
        FieldRule::new("return_mean", StatsField::ReturnMean),
    ]
}

/// Apply every rule to one line, updating `values` in place.
pub fn apply(rules: &[FieldRule], line: &str, values: &mut FieldValues) {
    for rule in rules {
        if rule.fallback && values.get(rule.field).is_some() {
            continue;
        }
        if let Some(value) = rule.capture(line) {
            values.set(rule.field, value);
        }
    }
}
