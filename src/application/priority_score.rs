//! Priority score used to order invitations out of the waitlist.

use crate::domain::entities::company_size::CompanySize;

pub const BASE_SCORE: i32 = 50;

/// Inputs that influence the score. Borrowed from an already validated signup.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub company_size: CompanySize,
    pub monthly_revenue: Option<&'a str>,
    pub has_phone: bool,
    pub has_main_bank: bool,
}

/// Base 50 plus additive bonuses; always within `50..=100`.
/// Unrecognised revenue brackets add nothing.
pub fn priority_score(inputs: ScoreInputs<'_>) -> i32 {
    let mut score = BASE_SCORE;

    score += match inputs.company_size {
        CompanySize::Medium => 20,
        CompanySize::Small => 10,
        CompanySize::Micro => 0,
    };

    score += match inputs.monthly_revenue {
        Some("500k+") => 20,
        Some("200k-500k") => 15,
        Some("50k-200k") => 10,
        _ => 0,
    };

    if inputs.has_phone {
        score += 5;
    }
    if inputs.has_main_bank {
        score += 5;
    }

    score
}
