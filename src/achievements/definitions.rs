//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock requirement and the
//! bonus they are worth.

use serde::Serialize;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    // Streak achievements
    FirstWeek,
    UnstoppableMonth,
    Legend,

    // Habit creation achievements
    Collector,
    HabitMaster,
    Expert,

    // Completion achievements
    FirstSteps,
    Consistency,
    Unstoppable,
    Champion,

    // Points achievements
    Rookie,
    Competitor,
    Master,
    PointsLegend,
}

impl AchievementId {
    /// Get the string ID for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstWeek => "first_week",
            Self::UnstoppableMonth => "unstoppable_month",
            Self::Legend => "legend",
            Self::Collector => "collector",
            Self::HabitMaster => "habit_master",
            Self::Expert => "expert",
            Self::FirstSteps => "first_steps",
            Self::Consistency => "consistency",
            Self::Unstoppable => "unstoppable",
            Self::Champion => "champion",
            Self::Rookie => "rookie",
            Self::Competitor => "competitor",
            Self::Master => "master",
            Self::PointsLegend => "points_legend",
        }
    }
}

/// Achievement category for grouping in UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Streak,
    Habits,
    Completed,
    Points,
}

/// What a profile must reach to unlock an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Requirement {
    /// Best streak of at least n days
    Streak(u32),
    /// At least n habits created
    HabitsCreated(u32),
    /// At least n completions
    Completed(u32),
    /// At least n points
    Points(u32),
}

/// Achievement definition
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub points_bonus: u32,
}

/// All achievements, in display order
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstWeek,
        name: "First Week",
        description: "Keep a 7 day streak",
        category: AchievementCategory::Streak,
        requirement: Requirement::Streak(7),
        points_bonus: 50,
    },
    Achievement {
        id: AchievementId::UnstoppableMonth,
        name: "Unstoppable Month",
        description: "Keep a 30 day streak",
        category: AchievementCategory::Streak,
        requirement: Requirement::Streak(30),
        points_bonus: 200,
    },
    Achievement {
        id: AchievementId::Legend,
        name: "Legend",
        description: "Keep a 100 day streak",
        category: AchievementCategory::Streak,
        requirement: Requirement::Streak(100),
        points_bonus: 1000,
    },
    Achievement {
        id: AchievementId::Collector,
        name: "Collector",
        description: "Create 5 habits",
        category: AchievementCategory::Habits,
        requirement: Requirement::HabitsCreated(5),
        points_bonus: 100,
    },
    Achievement {
        id: AchievementId::HabitMaster,
        name: "Habit Master",
        description: "Create 10 habits",
        category: AchievementCategory::Habits,
        requirement: Requirement::HabitsCreated(10),
        points_bonus: 250,
    },
    Achievement {
        id: AchievementId::Expert,
        name: "Expert",
        description: "Create 20 habits",
        category: AchievementCategory::Habits,
        requirement: Requirement::HabitsCreated(20),
        points_bonus: 500,
    },
    Achievement {
        id: AchievementId::FirstSteps,
        name: "First Steps",
        description: "Complete 10 habits",
        category: AchievementCategory::Completed,
        requirement: Requirement::Completed(10),
        points_bonus: 30,
    },
    Achievement {
        id: AchievementId::Consistency,
        name: "Consistency",
        description: "Complete 50 habits",
        category: AchievementCategory::Completed,
        requirement: Requirement::Completed(50),
        points_bonus: 150,
    },
    Achievement {
        id: AchievementId::Unstoppable,
        name: "Unstoppable",
        description: "Complete 100 habits",
        category: AchievementCategory::Completed,
        requirement: Requirement::Completed(100),
        points_bonus: 300,
    },
    Achievement {
        id: AchievementId::Champion,
        name: "Champion",
        description: "Complete 500 habits",
        category: AchievementCategory::Completed,
        requirement: Requirement::Completed(500),
        points_bonus: 1500,
    },
    Achievement {
        id: AchievementId::Rookie,
        name: "Rookie",
        description: "Reach 100 points",
        category: AchievementCategory::Points,
        requirement: Requirement::Points(100),
        points_bonus: 20,
    },
    Achievement {
        id: AchievementId::Competitor,
        name: "Competitor",
        description: "Reach 1000 points",
        category: AchievementCategory::Points,
        requirement: Requirement::Points(1000),
        points_bonus: 200,
    },
    Achievement {
        id: AchievementId::Master,
        name: "Master",
        description: "Reach 5000 points",
        category: AchievementCategory::Points,
        requirement: Requirement::Points(5000),
        points_bonus: 1000,
    },
    Achievement {
        id: AchievementId::PointsLegend,
        name: "Points Legend",
        description: "Reach 10000 points",
        category: AchievementCategory::Points,
        requirement: Requirement::Points(10000),
        points_bonus: 2500,
    },
];
