// ── Unit domain types ──

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::CoreError;
use crate::module::Resource;

/// Postal address of a unit. Only the postal code and street number are
/// required; the rest is filled by the address-lookup service when
/// available, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: String,
    pub number: String,
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A managed unit (building or block). Top of the parent chain:
/// rooms reference a unit, devices reference a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u64,
    pub name: String,
    pub access_code: String,
    pub address: Address,
}

/// Unsaved form values for creating or updating a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitDraft {
    pub name: String,
    pub access_code: String,
    pub postal_code: String,
    pub number: String,
}

impl Resource for Unit {
    type Wire = voltra_api::types::UnidadeRecord;
    type Draft = UnitDraft;

    const COLLECTION: &'static str = "unidades";
    const SINGULAR: &'static str = "unit";

    fn id(&self) -> u64 {
        self.id
    }

    fn from_wire(wire: Self::Wire) -> Self {
        wire.into()
    }

    fn draft_to_wire(draft: &Self::Draft, id: Option<u64>) -> Self::Wire {
        convert::unit_wire(draft, id)
    }

    fn validate(draft: &Self::Draft) -> Result<(), CoreError> {
        let required = [
            ("name", &draft.name),
            ("access code", &draft.access_code),
            ("postal code", &draft.postal_code),
            ("number", &draft.number),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::validation(field, "is required"));
            }
        }
        Ok(())
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Access code", "Postal code"]
    }

    fn row(&self) -> Vec<String> {
        let cep = if self.address.postal_code.is_empty() {
            "-".to_string()
        } else {
            self.address.postal_code.clone()
        };
        vec![self.name.clone(), self.access_code.clone(), cep]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UnitDraft {
        UnitDraft {
            name: "Bloco A".into(),
            access_code: "123".into(),
            postal_code: "12345678".into(),
            number: "10".into(),
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert!(Unit::validate(&draft()).is_ok());
    }

    #[test]
    fn every_required_field_is_checked() {
        let cases: [fn(&mut UnitDraft); 4] = [
            |d| d.name.clear(),
            |d| d.access_code.clear(),
            |d| d.postal_code.clear(),
            |d| d.number = "   ".into(),
        ];
        for clear in cases {
            let mut d = draft();
            clear(&mut d);
            assert!(Unit::validate(&d).is_err(), "draft {d:?} should not validate");
        }
    }
}
