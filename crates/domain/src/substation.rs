//! Substation: a registered utility substation and the rules for admitting one.

use serde::Serialize;

use crate::catalog::{SubstationType, TypeCatalog};
use crate::error::ValidationError;
use crate::id::SubstationId;
use crate::time::{Date, parse_date};

/// A persisted substation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substation {
    pub id: SubstationId,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: SubstationType,
    pub apartments_count: u32,
    pub power: f64,
    pub last_repair_date: Date,
}

/// A validated, normalized substation that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubstation {
    pub address: String,
    pub kind: SubstationType,
    pub apartments_count: u32,
    pub power: f64,
    pub last_repair_date: Date,
}

impl NewSubstation {
    /// Attach the id handed out by the store.
    #[must_use]
    pub fn with_id(self, id: SubstationId) -> Substation {
        Substation {
            id,
            address: self.address,
            kind: self.kind,
            apartments_count: self.apartments_count,
            power: self.power,
            last_repair_date: self.last_repair_date,
        }
    }
}

/// A numeric field as submitted: either a number or its textual form.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Coerce to a finite float. Blank strings do not coerce.
    fn to_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                text.parse().ok()?
            }
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// An unvalidated creation payload.
///
/// Every field is optional so that a missing field surfaces as the matching
/// [`ValidationError`] rather than as a decoding failure.
#[derive(Debug, Clone, Default)]
pub struct SubstationDraft {
    pub address: Option<String>,
    pub kind: Option<String>,
    pub apartments_count: Option<RawNumber>,
    pub power: Option<RawNumber>,
    pub last_repair_date: Option<String>,
}

impl SubstationDraft {
    /// Check the draft and produce a normalized [`NewSubstation`].
    ///
    /// Rules are evaluated in a fixed order and the first failure is
    /// returned: address, type, apartments count, power, repair date.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first rule that fails.
    pub fn validate(&self, catalog: &TypeCatalog) -> Result<NewSubstation, ValidationError> {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .ok_or(ValidationError::EmptyAddress)?;

        let kind = self
            .kind
            .as_deref()
            .and_then(|kind| catalog.resolve(kind))
            .ok_or(ValidationError::InvalidType)?;

        let apartments_count = self
            .apartments_count
            .as_ref()
            .and_then(RawNumber::to_finite)
            .and_then(whole_positive)
            .ok_or(ValidationError::InvalidApartmentsCount)?;

        let power = self
            .power
            .as_ref()
            .and_then(RawNumber::to_finite)
            .filter(|power| *power > 0.0)
            .ok_or(ValidationError::InvalidPower)?;

        let last_repair_date = self
            .last_repair_date
            .as_deref()
            .and_then(parse_date)
            .ok_or(ValidationError::InvalidDate)?;

        Ok(NewSubstation {
            address: address.to_owned(),
            kind,
            apartments_count,
            power,
            last_repair_date,
        })
    }
}

// The cast is exact: the value is integral and within `1..=u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_positive(value: f64) -> Option<u32> {
    if value <= 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_draft() -> SubstationDraft {
        SubstationDraft {
            address: Some("  Шевченка 12 ".to_owned()),
            kind: Some(" Embedded ".to_owned()),
            apartments_count: Some(RawNumber::from("40")),
            power: Some(RawNumber::from(250.5)),
            last_repair_date: Some(" 2018-06-01 ".to_owned()),
        }
    }

    fn check(draft: &SubstationDraft) -> Result<NewSubstation, ValidationError> {
        draft.validate(&TypeCatalog::default())
    }

    #[test]
    fn should_normalize_valid_draft() {
        let record = check(&valid_draft()).unwrap();
        assert_eq!(record.address, "Шевченка 12");
        assert_eq!(record.kind.as_str(), "Embedded");
        assert_eq!(record.apartments_count, 40);
        assert!((record.power - 250.5).abs() < f64::EPSILON);
        assert_eq!(
            record.last_repair_date,
            NaiveDate::from_ymd_opt(2018, 6, 1).unwrap()
        );
    }

    #[test]
    fn should_reject_blank_or_missing_address() {
        let mut draft = valid_draft();
        draft.address = Some("   ".to_owned());
        assert_eq!(check(&draft), Err(ValidationError::EmptyAddress));

        draft.address = None;
        assert_eq!(check(&draft), Err(ValidationError::EmptyAddress));
    }

    #[test]
    fn should_reject_type_outside_catalog() {
        let mut draft = valid_draft();
        draft.kind = Some("Underground".to_owned());
        assert_eq!(check(&draft), Err(ValidationError::InvalidType));
    }

    #[test]
    fn should_reject_non_positive_or_non_numeric_apartments_count() {
        for bad in [
            RawNumber::from(0.0),
            RawNumber::from(-3.0),
            RawNumber::from(2.5),
            RawNumber::from("many"),
            RawNumber::from(""),
            RawNumber::from("NaN"),
            RawNumber::from("inf"),
        ] {
            let mut draft = valid_draft();
            draft.apartments_count = Some(bad.clone());
            assert_eq!(
                check(&draft),
                Err(ValidationError::InvalidApartmentsCount),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn should_reject_apartments_count_beyond_u32() {
        let mut draft = valid_draft();
        draft.apartments_count = Some(RawNumber::from(5_000_000_000.0));
        assert_eq!(check(&draft), Err(ValidationError::InvalidApartmentsCount));
    }

    #[test]
    fn should_reject_non_positive_power() {
        let mut draft = valid_draft();
        draft.power = Some(RawNumber::from("0"));
        assert_eq!(check(&draft), Err(ValidationError::InvalidPower));

        draft.power = None;
        assert_eq!(check(&draft), Err(ValidationError::InvalidPower));
    }

    #[test]
    fn should_reject_unparseable_date() {
        let mut draft = valid_draft();
        draft.last_repair_date = Some("31.02.2020".to_owned());
        assert_eq!(check(&draft), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn should_accept_future_repair_date() {
        let mut draft = valid_draft();
        draft.last_repair_date = Some("2999-01-01".to_owned());
        assert!(check(&draft).is_ok());
    }

    #[test]
    fn should_report_first_failing_rule_only() {
        let draft = SubstationDraft {
            address: Some("Main st. 1".to_owned()),
            kind: Some("bogus".to_owned()),
            apartments_count: Some(RawNumber::from(-1.0)),
            power: None,
            last_repair_date: None,
        };
        assert_eq!(check(&draft), Err(ValidationError::InvalidType));

        assert_eq!(
            check(&SubstationDraft::default()),
            Err(ValidationError::EmptyAddress)
        );
    }

    #[test]
    fn should_serialize_kind_as_type_field() {
        let substation = check(&valid_draft())
            .unwrap()
            .with_id(SubstationId::new(7));
        let json = serde_json::to_value(&substation).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "Embedded");
        assert_eq!(json["last_repair_date"], "2018-06-01");
    }
}
