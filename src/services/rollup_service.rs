use std::collections::BTreeSet;

use crate::models::domain::{ExamResult, Student};
use crate::models::dto::request::TopicFilter;
use crate::models::dto::stats::{
    BucketCount, ExamStats, LeaderboardEntry, RankBadge, ScoreBucket, TopicExamAverage, TopicStats,
};
use crate::services::exam_stats_service::ExamStatsService;
use crate::services::mastery_service::{format_tenths, mean, round_to_tenth, MasteryService};

/// Class-wide numbers for the teacher analytics page.
pub struct RollupService;

impl RollupService {
    /// Mean mastery over every topic the student has a record for; `0.0`
    /// when they have none.
    pub fn student_average_mastery(student: &Student) -> f64 {
        mean(
            student
                .topics_mastery
                .values()
                .map(|t| MasteryService::mastery_percentage(Some(t))),
        )
    }

    /// Students without any topic still count in the denominator.
    pub fn class_average_topic_score(students: &[Student]) -> String {
        format_tenths(mean(students.iter().map(Self::student_average_mastery)))
    }

    pub fn topic_attempts_total(students: &[Student]) -> u64 {
        students
            .iter()
            .flat_map(|s| s.topics_mastery.values())
            .map(|t| t.counts().total() as u64)
            .sum()
    }

    pub fn topic_stats(students: &[Student], filter: &TopicFilter) -> TopicStats {
        match filter {
            TopicFilter::All => TopicStats {
                filter: filter.clone(),
                total_students: students.len(),
                average_score: Self::class_average_topic_score(students),
                total_topic_questions: Self::topic_attempts_total(students),
            },
            TopicFilter::Topic(name) => {
                let records: Vec<_> = students.iter().filter_map(|s| s.topic(name)).collect();
                TopicStats {
                    filter: filter.clone(),
                    total_students: records.len(),
                    average_score: format_tenths(mean(
                        records.iter().map(|&t| MasteryService::mastery_percentage(Some(t))),
                    )),
                    total_topic_questions: records.iter().map(|t| t.counts().total() as u64).sum(),
                }
            }
        }
    }

    /// For "all" the average is a mean of per-student averages; for one
    /// topic it is the mean over every matching exam.
    pub fn exam_stats(students: &[Student], filter: &TopicFilter) -> ExamStats {
        match filter {
            TopicFilter::All => {
                let with_exams: Vec<&Student> =
                    students.iter().filter(|s| !s.exam_results.is_empty()).collect();
                ExamStats {
                    filter: filter.clone(),
                    total_students: with_exams.len(),
                    average_score: format_tenths(mean(
                        with_exams
                            .iter()
                            .map(|s| ExamStatsService::exam_average(&s.exam_results)),
                    )),
                    total_exams_taken: students.iter().map(|s| s.exam_results.len()).sum(),
                }
            }
            TopicFilter::Topic(_) => {
                let matching = Self::matching_exams(students, filter);
                let total_students = students
                    .iter()
                    .filter(|s| s.exam_results.iter().any(|e| filter.matches_exam(e)))
                    .count();
                ExamStats {
                    filter: filter.clone(),
                    total_students,
                    average_score: format_tenths(ExamStatsService::exam_average(&matching)),
                    total_exams_taken: matching.len(),
                }
            }
        }
    }

    pub fn matching_exams(students: &[Student], filter: &TopicFilter) -> Vec<ExamResult> {
        students
            .iter()
            .flat_map(|s| s.exam_results.iter())
            .filter(|e| filter.matches_exam(e))
            .cloned()
            .collect()
    }

    pub fn score_distribution(
        students: &[Student],
        filter: &TopicFilter,
        buckets: &[ScoreBucket],
    ) -> Vec<BucketCount> {
        ExamStatsService::score_distribution(&Self::matching_exams(students, filter), buckets)
    }

    /// Per-topic exam averages across the class, topics in name order.
    pub fn topic_exam_averages(students: &[Student]) -> Vec<TopicExamAverage> {
        let exams = Self::matching_exams(students, &TopicFilter::All);
        let topics: BTreeSet<&str> = exams
            .iter()
            .flat_map(|e| e.topics.iter().map(String::as_str))
            .collect();
        ExamStatsService::topic_exam_averages(&exams, topics)
    }

    pub fn mastery_leaderboard(students: &[Student], filter: &TopicFilter) -> Vec<LeaderboardEntry> {
        let scored = students.iter().filter_map(|s| match filter {
            TopicFilter::All if s.topics_mastery.is_empty() => None,
            TopicFilter::All => Some((s, Self::student_average_mastery(s))),
            TopicFilter::Topic(name) => s
                .topic(name)
                .map(|t| (s, MasteryService::mastery_percentage(Some(t)))),
        });
        Self::rank(scored.collect())
    }

    pub fn exam_leaderboard(students: &[Student], filter: &TopicFilter) -> Vec<LeaderboardEntry> {
        let scored = students.iter().filter_map(|s| {
            let scores: Vec<f64> = s
                .exam_results
                .iter()
                .filter(|e| filter.matches_exam(e))
                .map(|e| e.score)
                .collect();
            if scores.is_empty() {
                None
            } else {
                Some((s, mean(scores)))
            }
        });
        Self::rank(scored.collect())
    }

    /// Highest score first. Ties keep input order.
    fn rank(mut scored: Vec<(&Student, f64)>) -> Vec<LeaderboardEntry> {
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
            .into_iter()
            .enumerate()
            .map(|(i, (student, score))| LeaderboardEntry {
                rank: i + 1,
                badge: RankBadge::for_rank(i + 1),
                student_id: student.id.clone(),
                student_name: student.display_name().to_string(),
                score: round_to_tenth(score),
            })
            .collect()
    }
}
