use serde::{Deserialize, Serialize};

/// Legal structure of the business being estimated.
///
/// Each variant carries its own marginal tax rate (applied in the open top
/// bracket) and optimization discount rate via [`crate::TaxRegime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    #[serde(rename = "proprietorship")]
    SoleProprietorship,
    Partnership,
    PrivateLimited,
    Llp,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoleProprietorship => "proprietorship",
            Self::Partnership => "partnership",
            Self::PrivateLimited => "private-limited",
            Self::Llp => "llp",
        }
    }

    /// Strict parse of the wire/form codes. Callers that want the
    /// fall-back-to-proprietorship default should handle `None` themselves
    /// so the substitution happens at the input boundary, not here.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proprietorship" => Some(Self::SoleProprietorship),
            "partnership" => Some(Self::Partnership),
            "private-limited" => Some(Self::PrivateLimited),
            "llp" => Some(Self::Llp),
            _ => None,
        }
    }

    pub const ALL: [EntityType; 4] = [
        Self::SoleProprietorship,
        Self::Partnership,
        Self::PrivateLimited,
        Self::Llp,
    ];
}

impl std::fmt::Display for EntityType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
