/// Visual state of one progress marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerState {
    #[default]
    Pending,
    Active,
    Complete,
}

/// Progress indicator derived from the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    percent: f64,
    markers: Vec<MarkerState>,
}

impl Progress {
    /// Computes the bar percentage and marker states.
    ///
    /// The percentage is `min(current, last) / last * 100`; a single-step
    /// wizard is always complete. Marker `i` is active when it is the
    /// current marker and the wizard is not on its last step, complete when
    /// it precedes the current step or is the current marker on the last step.
    pub fn compute(
        current: usize,
        step_count: usize,
        marker_count: usize,
    ) -> Self {
        let last = step_count.saturating_sub(1);
        let safe_step = current.min(last);
        let percent = if last == 0 {
            100.0
        } else {
            safe_step as f64 / last as f64 * 100.0
        };

        let active_index = current.min(marker_count.saturating_sub(1));
        let on_last = current == last;
        let markers = (0..marker_count)
            .map(|i| {
                if i < safe_step || (on_last && i == active_index) {
                    MarkerState::Complete
                } else if i == active_index {
                    MarkerState::Active
                } else {
                    MarkerState::Pending
                }
            })
            .collect();

        Self { percent, markers }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Bar fill as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        (self.percent / 100.0) as f32
    }

    /// Value for the `--progress` custom property, e.g. `"25%"`.
    pub fn css_value(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn markers(&self) -> &[MarkerState] {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use MarkerState::{Active, Complete, Pending};

    #[test]
    fn first_step_is_zero_percent() {
        let progress = Progress::compute(0, 5, 5);

        assert_eq!(progress.percent(), 0.0);
        assert_eq!(progress.css_value(), "0%");
        assert_eq!(progress.markers(), [Active, Pending, Pending, Pending, Pending]);
    }

    #[test]
    fn middle_step_marks_previous_complete() {
        let progress = Progress::compute(2, 5, 5);

        assert_eq!(progress.css_value(), "50%");
        assert_eq!(progress.markers(), [Complete, Complete, Active, Pending, Pending]);
    }

    #[test]
    fn last_step_is_full_and_all_complete() {
        let progress = Progress::compute(4, 5, 5);

        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.fraction(), 1.0);
        assert_eq!(progress.markers(), [Complete; 5]);
    }

    #[test]
    fn fewer_markers_than_steps_clamps_active_marker() {
        let progress = Progress::compute(1, 5, 3);

        assert_eq!(progress.css_value(), "25%");
        assert_eq!(progress.markers(), [Complete, Active, Pending]);
    }

    #[test]
    fn completion_wins_over_clamped_active_marker() {
        let progress = Progress::compute(3, 5, 3);

        assert_eq!(progress.css_value(), "75%");
        assert_eq!(progress.markers(), [Complete, Complete, Complete]);
    }

    #[test]
    fn single_step_wizard_is_complete() {
        let progress = Progress::compute(0, 1, 1);

        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.markers(), [Complete]);
    }

    #[test]
    fn non_integral_percent_keeps_fraction() {
        let progress = Progress::compute(1, 4, 4);

        assert!(progress.css_value().starts_with("33.33"));
    }
}
