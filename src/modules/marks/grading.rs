//! Score to letter grade mapping and the midterm/final combination.

/// Letter grade and grade point for a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grade {
    pub letter: &'static str,
    pub point: f64,
}

/// Maps a score in `[0, 100]` to its grade. Callers validate the range.
pub fn grade_of(marks: i32) -> Grade {
    let (letter, point) = match marks {
        ..=59 => ("F", 0.0),
        60..=69 => ("D", 1.7),
        70..=73 => ("C-", 2.0),
        74..=76 => ("C", 2.3),
        77..=79 => ("C+", 2.5),
        80..=83 => ("B-", 2.7),
        84..=86 => ("B", 3.0),
        87..=89 => ("B+", 3.3),
        90..=93 => ("A-", 3.5),
        94..=96 => ("A", 3.7),
        _ => ("A+", 4.0),
    };

    Grade { letter, point }
}

/// Weighted course result: 40% of the midterm plus 60% of the final, each
/// part rounded up on its own.
pub fn final_mark(midterm: i32, final_exam: i32) -> i32 {
    ceil_tenths(midterm * 4) + ceil_tenths(final_exam * 6)
}

// Non-negative inputs only.
fn ceil_tenths(value: i32) -> i32 {
    (value + 9) / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        let cases = [
            (0, "F", 0.0),
            (59, "F", 0.0),
            (60, "D", 1.7),
            (69, "D", 1.7),
            (70, "C-", 2.0),
            (73, "C-", 2.0),
            (74, "C", 2.3),
            (77, "C+", 2.5),
            (80, "B-", 2.7),
            (84, "B", 3.0),
            (87, "B+", 3.3),
            (90, "A-", 3.5),
            (94, "A", 3.7),
            (96, "A", 3.7),
            (97, "A+", 4.0),
            (100, "A+", 4.0),
        ];

        for (marks, letter, point) in cases {
            let grade = grade_of(marks);
            assert_eq!(grade.letter, letter, "letter for {marks}");
            assert_eq!(grade.point, point, "point for {marks}");
        }
    }

    #[test]
    fn test_final_mark_rounds_each_part_up() {
        assert_eq!(final_mark(80, 90), 86);
        // 0.4 * 81 = 32.4 -> 33, 0.6 * 77 = 46.2 -> 47
        assert_eq!(final_mark(81, 77), 80);
        assert_eq!(final_mark(0, 0), 0);
        assert_eq!(final_mark(100, 100), 100);
    }

    #[test]
    fn test_final_mark_never_exceeds_100() {
        for midterm in 0..=100 {
            for final_exam in 0..=100 {
                assert!(final_mark(midterm, final_exam) <= 100);
            }
        }
    }
}
