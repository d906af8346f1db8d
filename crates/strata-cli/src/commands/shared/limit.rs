/// Keep at most `limit` leading items; no limit keeps everything.
#[must_use]
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<u32>) -> Vec<T> {
    if let Some(limit) = limit.and_then(|limit| usize::try_from(limit).ok()) {
        items.truncate(limit);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::apply_limit;

    #[test]
    fn limit_truncates_from_the_end() {
        assert_eq!(apply_limit(vec![1, 2, 3], Some(2)), vec![1, 2]);
    }

    #[test]
    fn limit_above_length_keeps_all() {
        assert_eq!(apply_limit(vec![1, 2, 3], Some(10)), vec![1, 2, 3]);
    }

    #[test]
    fn no_limit_keeps_all() {
        assert_eq!(apply_limit(vec![1, 2, 3], None), vec![1, 2, 3]);
    }

    #[test]
    fn zero_limit_empties() {
        assert!(apply_limit(vec![1, 2, 3], Some(0)).is_empty());
    }
}
