use crate::LOG_TARGET;
use crate::models::{VerificationLink, VerifyType};
use crate::sanitize::clean_text;
use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;

pub const NAME: &str = "name";
pub const FILE: &str = "file";
pub const LINE: &str = "line";
pub const RESULT: &str = "result";
pub const TEST_TYPE: &str = "TestType";
pub const DERIVATION_TECHNIQUE: &str = "DerivationTechnique";
pub const RESULT_TEXT: &str = "result_text";
pub const PARTIALLY_VERIFIES: &str = "PartiallyVerifies";
pub const FULLY_VERIFIES: &str = "FullyVerifies";

/// A test case as reported by the test runner, before validation.
///
/// Every value is kept as text the way the XML report carries it. Keys follow
/// the report's own casing so persisted records diff cleanly against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    name: Option<String>,
    file: Option<String>,
    line: Option<String>,
    /// passed | failed | skipped | disabled
    result: Option<String>,
    #[serde(rename = "TestType")]
    test_type: Option<String>,
    #[serde(rename = "DerivationTechnique")]
    derivation_technique: Option<String>,
    result_text: Option<String>,
    #[serde(rename = "PartiallyVerifies")]
    partially_verifies: Option<String>,
    #[serde(rename = "FullyVerifies")]
    fully_verifies: Option<String>,
}

/// Why a record produces no links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingVerifies,
    MissingField(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingVerifies => write!(
                f,
                "Either '{PARTIALLY_VERIFIES}' or '{FULLY_VERIFIES}' must be provided."
            ),
            Rejection::MissingField(field) => {
                write!(f, "has a None value for the field: {field}.")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("TestCase: {name} in {file} has an invalid line '{line}': {source}")]
    InvalidLine {
        name: String,
        file: String,
        line: String,
        source: ParseIntError,
    },
}

impl TestCaseRecord {
    /// JSON keys a persisted record object must carry, in declaration order
    pub const KEYS: [&'static str; 9] = [
        NAME,
        FILE,
        LINE,
        RESULT,
        TEST_TYPE,
        DERIVATION_TECHNIQUE,
        RESULT_TEXT,
        PARTIALLY_VERIFIES,
        FULLY_VERIFIES,
    ];

    /// Build a record from the key/value properties of one reported test case.
    ///
    /// Missing keys stay absent and unknown keys are ignored. A non-empty
    /// `result_text` is cleaned with [`clean_text`].
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (key, value) in fields {
            let slot = match key.as_ref() {
                NAME => &mut record.name,
                FILE => &mut record.file,
                LINE => &mut record.line,
                RESULT => &mut record.result,
                TEST_TYPE => &mut record.test_type,
                DERIVATION_TECHNIQUE => &mut record.derivation_technique,
                RESULT_TEXT => &mut record.result_text,
                PARTIALLY_VERIFIES => &mut record.partially_verifies,
                FULLY_VERIFIES => &mut record.fully_verifies,
                _ => continue,
            };
            *slot = Some(value.into());
        }

        if let Some(text) = record.result_text.as_mut()
            && !text.is_empty()
        {
            *text = clean_text(text);
        }
        record
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn test_type(&self) -> Option<&str> {
        self.test_type.as_deref()
    }

    pub fn derivation_technique(&self) -> Option<&str> {
        self.derivation_technique.as_deref()
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result_text.as_deref()
    }

    pub fn partially_verifies(&self) -> Option<&str> {
        self.partially_verifies.as_deref()
    }

    pub fn fully_verifies(&self) -> Option<&str> {
        self.fully_verifies.as_deref()
    }

    /// Whether at least one of the verify fields is present. Logs the skip otherwise.
    pub fn check_verifies_fields(&self) -> bool {
        if self.partially_verifies.is_none() && self.fully_verifies.is_none() {
            self.report(Rejection::MissingVerifies);
            return false;
        }
        true
    }

    pub fn is_valid(&self) -> bool {
        self.check_verifies_fields() && self.validate().is_ok()
    }

    /// Check the record can be linked, logging the reason when it can't
    pub fn validate(&self) -> Result<ValidTestCase<'_>, Rejection> {
        ValidTestCase::try_from(self).inspect_err(|rejection| self.report(*rejection))
    }

    /// Expand into one link per need, partially verified needs first.
    ///
    /// Invalid records yield no links. A line that is present but not a
    /// number is an error.
    pub fn expand(&self) -> Result<Vec<VerificationLink>, LinkError> {
        match self.validate() {
            Ok(valid) => valid.links(),
            Err(_) => Ok(Vec::new()),
        }
    }

    fn report(&self, rejection: Rejection) {
        log::info!(
            target: LOG_TARGET,
            "TestCase: {} {rejection} This test case will be skipped and not linked.",
            self.name.as_deref().unwrap_or("<unnamed>"),
        );
    }
}

/// A record with every required field present.
///
/// Only obtainable through [`TestCaseRecord::validate`] or `TryFrom`, so link
/// expansion never has to recheck for missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTestCase<'a> {
    name: &'a str,
    file: &'a str,
    line: &'a str,
    result: &'a str,
    test_type: &'a str,
    derivation_technique: &'a str,
    result_text: &'a str,
    partially_verifies: Option<&'a str>,
    fully_verifies: Option<&'a str>,
}

impl<'a> TryFrom<&'a TestCaseRecord> for ValidTestCase<'a> {
    type Error = Rejection;

    fn try_from(record: &'a TestCaseRecord) -> Result<Self, Self::Error> {
        if record.partially_verifies.is_none() && record.fully_verifies.is_none() {
            return Err(Rejection::MissingVerifies);
        }

        let required = |value: &'a Option<String>, field: &'static str| {
            value.as_deref().ok_or(Rejection::MissingField(field))
        };

        Ok(Self {
            name: required(&record.name, NAME)?,
            file: required(&record.file, FILE)?,
            line: required(&record.line, LINE)?,
            result: required(&record.result, RESULT)?,
            test_type: required(&record.test_type, TEST_TYPE)?,
            derivation_technique: required(&record.derivation_technique, DERIVATION_TECHNIQUE)?,
            result_text: required(&record.result_text, RESULT_TEXT)?,
            partially_verifies: record.partially_verifies.as_deref(),
            fully_verifies: record.fully_verifies.as_deref(),
        })
    }
}

impl<'a> ValidTestCase<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn test_type(&self) -> &'a str {
        self.test_type
    }

    pub fn derivation_technique(&self) -> &'a str {
        self.derivation_technique
    }

    /// Needs named by the verify fields, in output order.
    ///
    /// Empty tokens left by stray commas are dropped.
    pub fn needs(&self) -> Vec<(&'a str, VerifyType)> {
        let fields = [
            (self.partially_verifies, VerifyType::Partially),
            (self.fully_verifies, VerifyType::Fully),
        ];

        let mut needs = Vec::new();
        for (field, verify_type) in fields {
            let Some(field) = field.filter(|f| !f.is_empty()) else {
                continue;
            };
            log::debug!(
                target: LOG_TARGET,
                "{} VERIFIES: {field}",
                verify_type.as_str().to_uppercase()
            );

            for need in field.split(',').map(str::trim) {
                if need.is_empty() {
                    log::info!(
                        target: LOG_TARGET,
                        "TestCase: {} has an empty need in '{field}', ignoring it.",
                        self.name
                    );
                    continue;
                }
                needs.push((need, verify_type));
            }
        }
        needs
    }

    pub fn links(&self) -> Result<Vec<VerificationLink>, LinkError> {
        let needs = self.needs();
        if needs.is_empty() {
            return Ok(Vec::new());
        }

        let line = self
            .line
            .trim()
            .parse::<u32>()
            .map_err(|source| LinkError::InvalidLine {
                name: self.name.to_string(),
                file: self.file.to_string(),
                line: self.line.to_string(),
                source,
            })?;
        let file = RelativePathBuf::from(self.file);

        Ok(needs
            .into_iter()
            .map(|(need, verify_type)| VerificationLink {
                name: self.name.to_string(),
                file: file.clone(),
                line,
                need: need.to_string(),
                verify_type,
                result: self.result.to_string(),
                result_text: self.result_text.to_string(),
            })
            .collect())
    }
}
