use crate::store::{BAD_VALS, Dataset, VIEWED};

/// Which records a session steps through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Every record in file order.
    ShowAll,
    /// Records not yet viewed.
    #[default]
    UnviewedOnly,
    /// Records flagged `bad_vals` and not yet viewed.
    UnviewedBadOnly,
}

impl FilterMode {
    /// Pick a mode from the command-line switches.
    ///
    /// `--show-all` wins; otherwise a dataset carrying `bad_vals` is narrowed
    /// to flagged records unless `--verbose` asks for every unviewed one.
    pub const fn from_flags(show_all: bool, verbose: bool, has_bad_vals: bool) -> Self {
        if show_all {
            Self::ShowAll
        } else if has_bad_vals && !verbose {
            Self::UnviewedBadOnly
        } else {
            Self::UnviewedOnly
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "all",
            Self::UnviewedOnly => "unviewed",
            Self::UnviewedBadOnly => "unviewed bad",
        }
    }

    fn accepts(self, dataset: &Dataset, row: usize) -> bool {
        match self {
            Self::ShowAll => true,
            Self::UnviewedOnly => !dataset.flag(row, VIEWED),
            Self::UnviewedBadOnly => dataset.flag(row, BAD_VALS) && !dataset.flag(row, VIEWED),
        }
    }
}

/// Dataset indices accepted by `mode`, in dataset order.
pub fn compute_filtered_indices(dataset: &Dataset, mode: FilterMode) -> Vec<usize> {
    (0..dataset.len())
        .filter(|&row| mode.accepts(dataset, row))
        .collect()
}

/// The ordered subsequence of records navigable in a session.
///
/// Built once; records viewed or edited during the session stay in the view
/// until it is rebuilt on the next load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    mode: FilterMode,
    indices: Vec<usize>,
}

impl FilteredView {
    pub fn build(dataset: &Dataset, mode: FilterMode) -> Self {
        Self {
            mode,
            indices: compute_filtered_indices(dataset, mode),
        }
    }

    pub const fn mode(&self) -> FilterMode {
        self.mode
    }

    pub const fn len(&self) -> usize {
        self.indices.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dataset index at a view position.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dataset(flags: &[(bool, bool)]) -> Dataset {
        let mut ds = Dataset::new(vec!["id".into(), VIEWED.into(), BAD_VALS.into()]);
        for (i, (viewed, bad)) in flags.iter().enumerate() {
            ds.push_row(vec![
                i.to_string(),
                crate::store::format_flag(*viewed).into(),
                crate::store::format_flag(*bad).into(),
            ]);
        }
        ds
    }

    #[test]
    fn test_show_all_returns_every_index() {
        let ds = dataset(&[(true, false), (false, true), (true, true)]);
        assert_eq!(compute_filtered_indices(&ds, FilterMode::ShowAll), vec![0, 1, 2]);
    }

    #[test]
    fn test_unviewed_only_keeps_order() {
        let ds = dataset(&[(false, false), (true, false), (false, true), (false, false)]);
        assert_eq!(
            compute_filtered_indices(&ds, FilterMode::UnviewedOnly),
            vec![0, 2, 3]
        );
    }

    #[test]
    fn test_unviewed_bad_only() {
        let ds = dataset(&[(false, true), (true, true), (false, false), (false, true)]);
        assert_eq!(
            compute_filtered_indices(&ds, FilterMode::UnviewedBadOnly),
            vec![0, 3]
        );
    }

    #[test]
    fn test_missing_viewed_column_counts_as_unviewed() {
        let mut ds = Dataset::new(vec!["id".into()]);
        ds.push_row(vec!["a".into()]);
        ds.push_row(vec!["b".into()]);
        assert_eq!(compute_filtered_indices(&ds, FilterMode::UnviewedOnly), vec![0, 1]);
    }

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(FilterMode::from_flags(true, false, true), FilterMode::ShowAll);
        assert_eq!(
            FilterMode::from_flags(false, false, true),
            FilterMode::UnviewedBadOnly
        );
        assert_eq!(FilterMode::from_flags(false, true, true), FilterMode::UnviewedOnly);
        assert_eq!(FilterMode::from_flags(false, false, false), FilterMode::UnviewedOnly);
    }

    #[test]
    fn test_view_positions_map_to_unviewed_rows() {
        let ds = dataset(&[(true, false), (false, false), (false, false)]);
        let view = FilteredView::build(&ds, FilterMode::UnviewedOnly);
        assert_eq!(view.get(0), Some(1));
        assert_eq!(view.get(1), Some(2));
        assert_eq!(view.get(2), None);
    }

    proptest! {
        #[test]
        fn prop_unviewed_view_matches_predicate(
            flags in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..40),
        ) {
            let ds = dataset(&flags);
            let view = compute_filtered_indices(&ds, FilterMode::UnviewedOnly);
            let expected: Vec<usize> = flags
                .iter()
                .enumerate()
                .filter(|(_, (viewed, _))| !viewed)
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(view, expected);
        }
    }
}
