use super::domain::ComparisonOperator::{Equal, GreaterOrEqual, LessOrEqual, LessThan};
use super::domain::{Rule, RuleAction};
use super::engine::RuleSet;

impl RuleSet {
    /// Built-in scholarship policy used when no rule file is configured.
    pub fn standard() -> Self {
        RuleSet::new(vec![
            Rule::new(
                "Top merit candidate",
                100,
                RuleAction::new(
                    "AWARD_FULL",
                    "Excellent academic & co-curricular performance, with acceptable need",
                ),
            )
            .when("cgpa", GreaterOrEqual, 3.7)
            .when("co_curricular_score", GreaterOrEqual, 80.0)
            .when("family_income", LessOrEqual, 8000.0)
            .when("disciplinary_actions", Equal, 0.0),
            Rule::new(
                "Good candidate - partial scholarship",
                80,
                RuleAction::new(
                    "AWARD_PARTIAL",
                    "Good academic & involvement record with moderate need",
                ),
            )
            .when("cgpa", GreaterOrEqual, 3.3)
            .when("co_curricular_score", GreaterOrEqual, 60.0)
            .when("family_income", LessOrEqual, 12000.0)
            .when("disciplinary_actions", LessOrEqual, 1.0),
            Rule::new(
                "Need-based review",
                70,
                RuleAction::new("REVIEW", "High need but borderline academic score"),
            )
            .when("cgpa", GreaterOrEqual, 2.5)
            .when("family_income", LessOrEqual, 4000.0),
            Rule::new(
                "Low CGPA – not eligible",
                95,
                RuleAction::new("REJECT", "CGPA below minimum scholarship requirement"),
            )
            .when("cgpa", LessThan, 2.5),
            Rule::new(
                "Serious disciplinary record",
                90,
                RuleAction::new("REJECT", "Too many disciplinary records"),
            )
            .when("disciplinary_actions", GreaterOrEqual, 2.0),
        ])
    }
}
