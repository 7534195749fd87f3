use strum::IntoEnumIterator;

use crate::BodyPart;

const CHEST: &[&str] = &[
    "Barbell Bench Press",
    "Dumbbell Bench Press",
    "Incline Bench Press",
    "Decline Bench Press",
    "Dumbbell Fly",
    "Cable Crossover",
    "Push-Up",
    "Diamond Push-Up",
    "Machine Chest Press",
    "Smith Machine Bench Press",
];

const BACK: &[&str] = &[
    "Pull-Up",
    "Barbell Row",
    "Dumbbell Row",
    "Seated Cable Row",
    "Lat Pulldown",
    "Straight-Arm Pulldown",
    "Deadlift",
    "Back Extension",
    "Reverse Fly",
    "T-Bar Row",
    "One-Arm Dumbbell Row",
];

const LEGS: &[&str] = &[
    "Squat",
    "Leg Press",
    "Leg Extension",
    "Leg Curl",
    "Lunge",
    "Bulgarian Split Squat",
    "Smith Machine Squat",
    "Hack Squat",
    "Seated Leg Extension",
    "Lying Leg Curl",
    "Standing Calf Raise",
    "Seated Calf Raise",
];

const SHOULDERS: &[&str] = &[
    "Straight-Arm Pulldown",
    "Reverse Fly",
    "Lateral Raise",
    "Seated Shoulder Press",
    "Standing Shoulder Press",
    "Face Pull",
    "Barbell Overhead Press",
    "Dumbbell Shoulder Press",
    "Arnold Press",
    "Front Raise",
    "Upright Row",
    "Shrug",
    "Cable Lateral Raise",
    "Machine Shoulder Press",
];

const ARMS: &[&str] = &[
    "Barbell Curl",
    "Dumbbell Curl",
    "Hammer Curl",
    "Concentration Curl",
    "Cable Curl",
    "Triceps Pushdown",
    "Dip",
    "Close-Grip Bench Press",
    "Overhead Triceps Extension",
    "One-Arm Dumbbell Triceps Extension",
    "Reverse Curl",
];

const GLUTES: &[&str] = &[
    "Glute Bridge",
    "Single-Leg Glute Bridge",
    "Hip Thrust",
    "Clamshell",
    "Donkey Kick",
    "Side-Lying Leg Raise",
    "Squat",
    "Bulgarian Split Squat",
    "Romanian Deadlift",
    "Sumo Squat",
    "Banded Hip Thrust",
    "Dumbbell Squat",
    "Dumbbell Deadlift",
    "Single-Leg Dumbbell Deadlift",
    "Belt Squat",
];

const CORE: &[&str] = &[
    "Crunch",
    "Plank",
    "Side Plank",
    "Russian Twist",
    "Hanging Leg Raise",
    "Side Crunch",
    "Sit-Up",
    "Reverse Crunch",
    "Mountain Climber",
    "Dead Bug",
    "Bird Dog",
    "Ab Wheel Rollout",
];

const CARDIO: &[&str] = &[
    "Running",
    "Elliptical",
    "Indoor Cycling",
    "Rowing Machine",
    "Jump Rope",
    "Stair Climber",
    "Swimming",
    "HIIT",
    "Burpee",
    "Jumping Jack",
    "High Knees",
    "Battle Rope",
];

const STRETCHING: &[&str] = &[
    "Full Body Stretch",
    "Leg Stretch",
    "Shoulder Stretch",
    "Back Stretch",
    "Chest Stretch",
    "Hip Stretch",
    "Foam Rolling",
    "Yoga",
    "Dynamic Stretching",
    "Static Stretching",
];

const OTHER: &[&str] = &[
    "Warm-Up",
    "Cool-Down",
    "Conditioning",
    "Functional Training",
];

/// Commonly performed exercises of a body part, in suggestion order.
#[must_use]
pub fn common_exercises(body_part: BodyPart) -> &'static [&'static str] {
    match body_part {
        BodyPart::Chest => CHEST,
        BodyPart::Back => BACK,
        BodyPart::Legs => LEGS,
        BodyPart::Shoulders => SHOULDERS,
        BodyPart::Arms => ARMS,
        BodyPart::Glutes => GLUTES,
        BodyPart::Core => CORE,
        BodyPart::Cardio => CARDIO,
        BodyPart::Stretching => STRETCHING,
        BodyPart::Other => OTHER,
    }
}

/// Body parts under which an exercise is listed. Some exercises appear under multiple body parts.
#[must_use]
pub fn body_parts_of(name: &str) -> Vec<BodyPart> {
    BodyPart::iter()
        .filter(|b| {
            common_exercises(*b)
                .iter()
                .any(|e| e.eq_ignore_ascii_case(name.trim()))
        })
        .collect()
}

/// Case-insensitive substring search over the whole catalog.
#[must_use]
pub fn search(query: &str) -> Vec<(BodyPart, &'static str)> {
    let query = query.trim().to_lowercase();
    BodyPart::iter()
        .flat_map(|b| common_exercises(b).iter().map(move |e| (b, *e)))
        .filter(|(_, e)| e.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_catalog_entries_unique_per_body_part() {
        for body_part in BodyPart::iter() {
            let exercises = common_exercises(body_part);
            assert!(!exercises.is_empty());
            assert_eq!(
                exercises.iter().collect::<HashSet<_>>().len(),
                exercises.len(),
                "duplicate exercise in {body_part}"
            );
        }
    }

    #[rstest]
    #[case("Plank", vec![BodyPart::Core])]
    #[case(" squat ", vec![BodyPart::Legs, BodyPart::Glutes])]
    #[case("Reverse Fly", vec![BodyPart::Back, BodyPart::Shoulders])]
    #[case("Juggling", vec![])]
    fn test_body_parts_of(#[case] name: &str, #[case] expected: Vec<BodyPart>) {
        assert_eq!(body_parts_of(name), expected);
    }

    #[test]
    fn test_search() {
        assert_eq!(
            search("curl"),
            vec![
                (BodyPart::Legs, "Leg Curl"),
                (BodyPart::Legs, "Lying Leg Curl"),
                (BodyPart::Arms, "Barbell Curl"),
                (BodyPart::Arms, "Dumbbell Curl"),
                (BodyPart::Arms, "Hammer Curl"),
                (BodyPart::Arms, "Concentration Curl"),
                (BodyPart::Arms, "Cable Curl"),
                (BodyPart::Arms, "Reverse Curl"),
            ]
        );
    }
}
