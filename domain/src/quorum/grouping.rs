//! Equivalence-class partitioning of extracted answers.
//!
//! Answers are grouped with a representative-per-class strategy in
//! first-seen order: each answer joins the first existing group whose
//! representative it is equivalent to, otherwise it starts a new group.
//!
//! The comparator is not guaranteed to be transitive, so the partition
//! depends on model order. Order is therefore fixed to the order in which
//! models were supplied, which makes the result reproducible.

use crate::answer::extraction::ExtractedAnswer;
use crate::answer::value::AnswerValue;

/// A group of models whose answers the comparator judges equal.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerGroup {
    /// Extracted text of the answer that created the group
    pub representative: String,
    /// Normalized value of the representative
    pub value: AnswerValue,
    /// Member models, in first-seen order (the representative's model first)
    pub models: Vec<String>,
}

impl AnswerGroup {
    fn new(model: &str, text: &str, value: AnswerValue) -> Self {
        Self {
            representative: text.to_string(),
            value,
            models: vec![model.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Partition the non-null answers into equivalence groups.
///
/// Answers with `value == None` are skipped.
pub fn partition_answers(answers: &[ExtractedAnswer]) -> Vec<AnswerGroup> {
    partition_answers_with(answers, AnswerValue::is_equivalent)
}

/// Partition with an explicit comparator.
pub fn partition_answers_with<F>(answers: &[ExtractedAnswer], equivalent: F) -> Vec<AnswerGroup>
where
    F: Fn(&AnswerValue, &AnswerValue) -> bool,
{
    let mut groups: Vec<AnswerGroup> = Vec::new();

    for answer in answers {
        let Some(text) = answer.value.as_deref() else {
            continue;
        };
        let value = AnswerValue::parse(text);

        match groups.iter_mut().find(|g| equivalent(&g.value, &value)) {
            Some(group) => group.models.push(answer.model.clone()),
            None => groups.push(AnswerGroup::new(&answer.model, text, value)),
        }
    }

    groups
}

/// The largest group; ties go to the group created first.
pub fn largest_group(groups: &[AnswerGroup]) -> Option<&AnswerGroup> {
    groups.iter().fold(None, |best: Option<&AnswerGroup>, group| match best {
        Some(b) if b.len() >= group.len() => Some(b),
        _ => Some(group),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(model: &str, value: Option<&str>) -> ExtractedAnswer {
        ExtractedAnswer {
            model: model.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn test_groups_equivalent_answers() {
        let answers = vec![
            answer("a", Some("3")),
            answer("b", Some("3.0")),
            answer("c", Some("4")),
            answer("d", None),
        ];
        let groups = partition_answers(&answers);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].models, vec!["a", "b"]);
        assert_eq!(groups[0].representative, "3");
        assert_eq!(groups[1].models, vec!["c"]);
    }

    #[test]
    fn test_null_answers_never_grouped() {
        let answers = vec![answer("a", None), answer("b", None)];
        assert!(partition_answers(&answers).is_empty());
    }

    #[test]
    fn test_largest_group_tie_goes_to_first() {
        let answers = vec![
            answer("a", Some("1")),
            answer("b", Some("2")),
            answer("c", Some("2")),
            answer("d", Some("1")),
        ];
        let groups = partition_answers(&answers);
        let largest = largest_group(&groups).unwrap();
        assert_eq!(largest.representative, "1");
        assert_eq!(largest.models, vec!["a", "d"]);
    }

    #[test]
    fn test_largest_group_empty() {
        assert!(largest_group(&[]).is_none());
    }

    /// Numbers within 1 of each other: 1~2 and 2~3, but not 1~3.
    fn within_one(a: &AnswerValue, b: &AnswerValue) -> bool {
        match (a, b) {
            (AnswerValue::Number(x), AnswerValue::Number(y)) => {
                let diff = x.checked_sub(*y).map(|d| d.numer().abs() <= d.denom());
                diff.unwrap_or(false)
            }
            _ => false,
        }
    }

    #[test]
    fn test_intransitive_comparator_is_order_dependent() {
        let forward = vec![
            answer("a", Some("1")),
            answer("b", Some("2")),
            answer("c", Some("3")),
        ];
        let groups = partition_answers_with(&forward, within_one);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].models, vec!["a", "b"]);
        assert_eq!(groups[1].models, vec!["c"]);

        let middle_first = vec![
            answer("b", Some("2")),
            answer("a", Some("1")),
            answer("c", Some("3")),
        ];
        let groups = partition_answers_with(&middle_first, within_one);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].models, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_membership_is_decided_against_representative_only() {
        // "x = 2" normalizes to 2 and joins the "2" group; the later "2.0"
        // is compared with the representative "2", not with "x = 2".
        let answers = vec![
            answer("a", Some("2")),
            answer("b", Some("x = 2")),
            answer("c", Some("2.0")),
        ];
        let groups = partition_answers(&answers);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].models, vec!["a", "b", "c"]);
    }
}
