use serde::Serialize;

/// Self-reported company size bucket collected on the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(type_name = "company_size", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Micro => "micro",
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
        }
    }
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "micro" => Ok(CompanySize::Micro),
            "small" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            _ => Err(format!(
                "Invalid company size: {}. Must be 'micro', 'small' or 'medium'",
                s
            )),
        }
    }
}
