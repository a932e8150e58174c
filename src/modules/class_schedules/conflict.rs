use registrar_models::TimeSlot;

/// Two slots overlap when they fall on the same day and their half-open
/// `[start, end)` intervals intersect.
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.day_of_week == b.day_of_week && a.start_time < b.end_time && a.end_time > b.start_time
}

/// True if `candidate` overlaps any of the already booked slots.
pub fn has_conflict(existing: &[TimeSlot], candidate: &TimeSlot) -> bool {
    existing.iter().any(|slot| overlaps(slot, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use registrar_models::WeekDay;

    fn slot(day_of_week: WeekDay, start: (u32, u32), end: (u32, u32)) -> TimeSlot {
        TimeSlot {
            day_of_week,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_overlapping_slot_conflicts() {
        let booked = [slot(WeekDay::Monday, (9, 0), (10, 0))];
        assert!(has_conflict(
            &booked,
            &slot(WeekDay::Monday, (9, 30), (10, 30))
        ));
    }

    #[test]
    fn test_adjacent_slot_does_not_conflict() {
        let booked = [slot(WeekDay::Monday, (9, 0), (10, 0))];
        assert!(!has_conflict(
            &booked,
            &slot(WeekDay::Monday, (10, 0), (11, 0))
        ));
        assert!(!has_conflict(&booked, &slot(WeekDay::Monday, (8, 0), (9, 0))));
    }

    #[test]
    fn test_other_day_does_not_conflict() {
        let booked = [slot(WeekDay::Monday, (9, 0), (10, 0))];
        assert!(!has_conflict(
            &booked,
            &slot(WeekDay::Tuesday, (9, 0), (10, 0))
        ));
    }

    #[test]
    fn test_enclosing_slot_conflicts() {
        let booked = [
            slot(WeekDay::Sunday, (8, 0), (9, 0)),
            slot(WeekDay::Sunday, (13, 0), (13, 30)),
        ];
        assert!(has_conflict(
            &booked,
            &slot(WeekDay::Sunday, (12, 0), (14, 0))
        ));
    }

    #[test]
    fn test_no_bookings_never_conflicts() {
        assert!(!has_conflict(&[], &slot(WeekDay::Friday, (9, 0), (17, 0))));
    }
}
