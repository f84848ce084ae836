use time::OffsetDateTime;

/// Half-open interval intersection. Touching endpoints do not overlap: an
/// event ending exactly when another starts is not a clash. Every interval
/// comparison in the service reduces to this one test.
pub fn overlaps(
    a_start: OffsetDateTime,
    a_end: OffsetDateTime,
    b_start: OffsetDateTime,
    b_end: OffsetDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use time::OffsetDateTime;
    use time::macros::datetime;

    use super::overlaps;

    const T10: OffsetDateTime = datetime!(2026-03-01 10:00 UTC);
    const T11: OffsetDateTime = datetime!(2026-03-01 11:00 UTC);
    const T12: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);
    const T13: OffsetDateTime = datetime!(2026-03-01 13:00 UTC);

    #[test_case(T10, T12, T11, T13, true; "partial intersection")]
    #[test_case(T10, T13, T11, T12, true; "containment")]
    #[test_case(T10, T11, T11, T12, false; "touching endpoints")]
    #[test_case(T10, T11, T12, T13, false; "disjoint")]
    #[test_case(T10, T12, T10, T12, true; "identical")]
    fn overlap_cases(
        a_start: OffsetDateTime,
        a_end: OffsetDateTime,
        b_start: OffsetDateTime,
        b_end: OffsetDateTime,
        expected: bool,
    ) {
        assert_eq!(overlaps(a_start, a_end, b_start, b_end), expected);
        // Symmetric by construction
        assert_eq!(overlaps(b_start, b_end, a_start, a_end), expected);
    }
}
