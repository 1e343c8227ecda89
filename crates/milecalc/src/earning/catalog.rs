use std::collections::HashMap;

use super::domain::{
    normalize_code, Airport, BookingClass, Carrier, EarningRule, LoyaltyProgram, ProgramId,
};

/// Read-only reference data consumed by the engine.
///
/// `Ok(None)` is the normal not-found outcome; `Err` means the provider itself failed.
pub trait ReferenceCatalog: Send + Sync {
    fn airport(&self, code: &str) -> Result<Option<Airport>, CatalogError>;
    fn carrier(&self, code: &str) -> Result<Option<Carrier>, CatalogError>;
    fn program(&self, id: &ProgramId) -> Result<Option<LoyaltyProgram>, CatalogError>;
    fn booking_class(&self, code: &str) -> Result<Option<BookingClass>, CatalogError>;
    /// `carrier = None` looks up the rule that carries no carrier qualifier.
    fn earning_rule(
        &self,
        program: &ProgramId,
        carrier: Option<&str>,
        booking_class: &str,
    ) -> Result<Option<EarningRule>, CatalogError>;
    fn programs(&self) -> Result<Vec<LoyaltyProgram>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("reference catalog unavailable: {0}")]
    Unavailable(String),
}

type RuleKey = (ProgramId, Option<String>, String);

/// In-process catalog; immutable once shared, so concurrent reads need no locking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    airports: HashMap<String, Airport>,
    carriers: HashMap<String, Carrier>,
    programs: HashMap<ProgramId, LoyaltyProgram>,
    booking_classes: HashMap<String, BookingClass>,
    rules: HashMap<RuleKey, EarningRule>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_airport(mut self, mut airport: Airport) -> Self {
        airport.code = normalize_code(&airport.code);
        self.airports.insert(airport.code.clone(), airport);
        self
    }

    pub fn with_carrier(mut self, mut carrier: Carrier) -> Self {
        carrier.code = normalize_code(&carrier.code);
        self.carriers.insert(carrier.code.clone(), carrier);
        self
    }

    pub fn with_program(mut self, mut program: LoyaltyProgram) -> Self {
        program.id = ProgramId::new(&program.id.0);
        program.home_carrier = normalize_code(&program.home_carrier);
        self.programs.insert(program.id.clone(), program);
        self
    }

    pub fn with_booking_class(mut self, mut booking_class: BookingClass) -> Self {
        booking_class.code = normalize_code(&booking_class.code);
        self.booking_classes
            .insert(booking_class.code.clone(), booking_class);
        self
    }

    /// A later rule with the same key replaces the earlier one.
    pub fn with_rule(mut self, mut rule: EarningRule) -> Self {
        rule.program = ProgramId::new(&rule.program.0);
        rule.carrier = rule.carrier.as_deref().map(normalize_code);
        rule.booking_class = normalize_code(&rule.booking_class);
        let key = (
            rule.program.clone(),
            rule.carrier.clone(),
            rule.booking_class.clone(),
        );
        self.rules.insert(key, rule);
        self
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }
}

impl ReferenceCatalog for InMemoryCatalog {
    fn airport(&self, code: &str) -> Result<Option<Airport>, CatalogError> {
        Ok(self.airports.get(&normalize_code(code)).cloned())
    }

    fn carrier(&self, code: &str) -> Result<Option<Carrier>, CatalogError> {
        Ok(self.carriers.get(&normalize_code(code)).cloned())
    }

    fn program(&self, id: &ProgramId) -> Result<Option<LoyaltyProgram>, CatalogError> {
        Ok(self.programs.get(&ProgramId::new(&id.0)).cloned())
    }

    fn booking_class(&self, code: &str) -> Result<Option<BookingClass>, CatalogError> {
        Ok(self.booking_classes.get(&normalize_code(code)).cloned())
    }

    fn earning_rule(
        &self,
        program: &ProgramId,
        carrier: Option<&str>,
        booking_class: &str,
    ) -> Result<Option<EarningRule>, CatalogError> {
        let key = (
            ProgramId::new(&program.0),
            carrier.map(normalize_code),
            normalize_code(booking_class),
        );
        Ok(self.rules.get(&key).cloned())
    }

    fn programs(&self) -> Result<Vec<LoyaltyProgram>, CatalogError> {
        let mut programs: Vec<_> = self.programs.values().cloned().collect();
        programs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(programs)
    }
}
