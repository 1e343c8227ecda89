use serde::{Deserialize, Serialize};

use super::domain::{normalize_code, Carrier, LoyaltyProgram};

/// How the operating carrier relates to the crediting program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    HomeCarrier,
    AlliancePartner,
    NonAlliancePartner,
}

impl Relationship {
    pub fn label(&self) -> &'static str {
        match self {
            Relationship::HomeCarrier => "home carrier",
            Relationship::AlliancePartner => "alliance partner",
            Relationship::NonAlliancePartner => "non-alliance partner",
        }
    }
}

/// Three-tier partner reduction applied to the resolved earning percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPolicy {
    pub alliance_partner_multiplier: f64,
    pub non_alliance_multiplier: f64,
}

impl Default for RelationshipPolicy {
    fn default() -> Self {
        Self {
            alliance_partner_multiplier: 0.85,
            non_alliance_multiplier: 0.75,
        }
    }
}

impl RelationshipPolicy {
    pub fn classify(&self, program: &LoyaltyProgram, carrier: &Carrier) -> Relationship {
        if normalize_code(&carrier.code) == normalize_code(&program.home_carrier) {
            return Relationship::HomeCarrier;
        }

        match (carrier.alliance, program.alliance) {
            (Some(operating), Some(crediting)) if operating == crediting => {
                Relationship::AlliancePartner
            }
            _ => Relationship::NonAlliancePartner,
        }
    }

    pub fn multiplier(&self, relationship: Relationship) -> f64 {
        match relationship {
            Relationship::HomeCarrier => 1.0,
            Relationship::AlliancePartner => self.alliance_partner_multiplier,
            Relationship::NonAlliancePartner => self.non_alliance_multiplier,
        }
    }

    /// Returns the relationship and the adjusted earning percentage.
    pub fn adjust(
        &self,
        earning_percentage: f64,
        program: &LoyaltyProgram,
        carrier: &Carrier,
    ) -> (Relationship, f64) {
        let relationship = self.classify(program, carrier);
        (
            relationship,
            earning_percentage * self.multiplier(relationship),
        )
    }
}
