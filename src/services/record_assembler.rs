//! 题目组装
//!
//! 问题面第 i 行 ↔ 答案面第 i 行。问题多于答案时，多出的问题直接丢弃。

use crate::models::QaRecord;
use crate::services::text_cleaner::clean_text;

/// 一组图片的配对结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedRecords {
    /// 按行号排列的题目，下标即行号
    pub records: Vec<QaRecord>,
    /// 没有对应答案而被丢弃的问题数
    pub dropped_questions: usize,
}

/// 按行号配对并清理
pub fn pair_records(questions: &[String], answers: &[String]) -> PairedRecords {
    let records: Vec<QaRecord> = questions
        .iter()
        .zip(answers)
        .map(|(question, answer)| QaRecord::new(clean_text(question), clean_text(answer)))
        .collect();

    PairedRecords {
        dropped_questions: questions.len() - records.len(),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_surplus_questions_are_dropped() {
        let questions = lines(&["Q1", "Q2", "Q3", "Q4"]);
        let answers = lines(&["A1", "A2", "A3"]);

        let paired = pair_records(&questions, &answers);
        assert_eq!(paired.records.len(), 3);
        assert_eq!(paired.dropped_questions, 1);
        assert_eq!(paired.records[2], QaRecord::new("Q3", "A3"));
    }

    #[test]
    fn test_surplus_answers_are_ignored() {
        let paired = pair_records(&lines(&["Q1"]), &lines(&["A1", "A2"]));
        assert_eq!(paired.records, vec![QaRecord::new("Q1", "A1")]);
        assert_eq!(paired.dropped_questions, 0);
    }

    #[test]
    fn test_both_sides_are_cleaned() {
        let paired = pair_records(
            &lines(&["Quelle est la capitale de la France ? 101"]),
            &lines(&["Paris101"]),
        );
        assert_eq!(
            paired.records,
            vec![QaRecord::new("Quelle est la capitale de la France ?", "Paris")]
        );
    }

    #[test]
    fn test_no_answers() {
        let paired = pair_records(&lines(&["Q1", "Q2"]), &[]);
        assert!(paired.records.is_empty());
        assert_eq!(paired.dropped_questions, 2);
    }
}
