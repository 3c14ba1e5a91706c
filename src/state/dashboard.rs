use chrono::NaiveDate;

/// A goal-tracked metric such as calories or steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: u32,
    pub goal: u32,
    pub unit: &'static str,
}

impl Metric {
    /// Fraction of the goal reached, clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        (f64::from(self.value) / f64::from(self.goal)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseCard {
    pub icon: &'static str,
    pub amount: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanPreview {
    pub month: &'static str,
    pub week: &'static str,
    pub title: &'static str,
    pub progress: &'static str,
    pub next_exercise: &'static str,
}

/// Static content of the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub calories: Metric,
    pub steps: Metric,
    pub distance_km: f64,
    pub exercises: Vec<ExerciseCard>,
    pub plan: PlanPreview,
}

impl Dashboard {
    pub fn sample() -> Self {
        Self {
            calories: Metric {
                label: "Total Kilocalories",
                value: 1_883,
                goal: 2_500,
                unit: "Kcal",
            },
            steps: Metric {
                label: "Steps",
                value: 9_832,
                goal: 10_000,
                unit: "",
            },
            distance_km: 7.5,
            exercises: vec![
                ExerciseCard {
                    icon: "\u{2694}",
                    amount: "70 lbs",
                    title: "Dumbbell",
                },
                ExerciseCard {
                    icon: "\u{2692}",
                    amount: "235 Kcal",
                    title: "Treadmill",
                },
                ExerciseCard {
                    icon: "\u{223f}",
                    amount: "432 Kcal",
                    title: "Rope",
                },
            ],
            plan: PlanPreview {
                month: "December, 2024",
                week: "WEEK 1",
                title: "Body Weight",
                progress: "Workout 1 of 5",
                next_exercise: "Lower Strength",
            },
        }
    }
}

/// Home screen state: the date picker overlay is the only interactive part.
#[derive(Debug, Clone)]
pub struct HomeState {
    pub dashboard: Dashboard,
    pub selected_date: NaiveDate,
    pub calendar_open: bool,
    pub details_open: bool,
}

impl HomeState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            dashboard: Dashboard::sample(),
            selected_date: today,
            calendar_open: false,
            details_open: false,
        }
    }
}

/// Format with thousands separators, e.g. `1,883`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let d = Dashboard::sample();
        assert!((d.calories.progress() - 0.7532).abs() < 1e-9);
        let over = Metric {
            value: 12_000,
            ..d.steps.clone()
        };
        assert_eq!(over.progress(), 1.0);
        let no_goal = Metric { goal: 0, ..d.steps };
        assert_eq!(no_goal.progress(), 0.0);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_883), "1,883");
        assert_eq!(group_thousands(1_000_000), "1,000,000");
    }
}
