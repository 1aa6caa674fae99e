//! Entity category labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity category label
///
/// Covers the built-in pattern-bank categories plus the NER categories the
/// pipeline reasons about (`PERSON`, `ORG`, `DATE`). Any other label coming
/// from the NER source is preserved verbatim in the `Other` variant, so the
/// merger and redactor handle it uniformly.
///
/// Labels serialize as their canonical uppercase string (`"EMAIL"`,
/// `"ID_PAN"`, ...) and deserialize back to the matching variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntityLabel {
    /// Email addresses
    Email,
    /// Indian mobile numbers, optional +91 prefix
    Phone,
    /// Indian permanent account numbers
    IdPan,
    /// Aadhaar numbers (12 digits, optionally space-grouped)
    IdAadhaar,
    /// Indian passport numbers
    IdPassport,
    /// Driving licence numbers
    DlNumber,
    /// Payment card numbers (13-16 digits with separators)
    CardNumber,
    /// Bank account numbers (9-18 digits, context-gated)
    BankAccount,
    /// US social security numbers
    Ssn,
    /// Student enrollment IDs
    StudentId,
    /// Vehicle registration plates
    VehicleReg,
    /// IPv4 addresses
    IpAddress,
    /// Blood groups
    BloodGroup,
    /// Trailing card-number suffixes ("ending in 1234")
    CardSuffix,
    /// Person names (NER)
    Person,
    /// Organization names (NER)
    Org,
    /// Dates (NER; excluded from redaction)
    Date,
    /// Any other label reported by the NER source
    Other(String),
}

impl EntityLabel {
    /// Get the canonical string form of the label
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::IdPan => "ID_PAN",
            Self::IdAadhaar => "ID_AADHAAR",
            Self::IdPassport => "ID_PASSPORT",
            Self::DlNumber => "DL_NUMBER",
            Self::CardNumber => "CARD_NUMBER",
            Self::BankAccount => "BANK_ACCOUNT",
            Self::Ssn => "SSN",
            Self::StudentId => "STUDENT_ID",
            Self::VehicleReg => "VEHICLE_REG",
            Self::IpAddress => "IP_ADDRESS",
            Self::BloodGroup => "BLOOD_GROUP",
            Self::CardSuffix => "CARD_SUFFIX",
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Date => "DATE",
            Self::Other(s) => s.as_str(),
        }
    }

    fn from_canonical(s: &str) -> Option<Self> {
        match s {
            "EMAIL" => Some(Self::Email),
            "PHONE" => Some(Self::Phone),
            "ID_PAN" => Some(Self::IdPan),
            "ID_AADHAAR" => Some(Self::IdAadhaar),
            "ID_PASSPORT" => Some(Self::IdPassport),
            "DL_NUMBER" => Some(Self::DlNumber),
            "CARD_NUMBER" => Some(Self::CardNumber),
            "BANK_ACCOUNT" => Some(Self::BankAccount),
            "SSN" => Some(Self::Ssn),
            "STUDENT_ID" => Some(Self::StudentId),
            "VEHICLE_REG" => Some(Self::VehicleReg),
            "IP_ADDRESS" => Some(Self::IpAddress),
            "BLOOD_GROUP" => Some(Self::BloodGroup),
            "CARD_SUFFIX" => Some(Self::CardSuffix),
            "PERSON" => Some(Self::Person),
            "ORG" => Some(Self::Org),
            "DATE" => Some(Self::Date),
            _ => None,
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntityLabel {
    fn from(s: &str) -> Self {
        Self::from_canonical(s).unwrap_or_else(|| Self::Other(s.to_string()))
    }
}

impl From<String> for EntityLabel {
    fn from(s: String) -> Self {
        Self::from_canonical(&s).unwrap_or(Self::Other(s))
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        match label {
            EntityLabel::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}
