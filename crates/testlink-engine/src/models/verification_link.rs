use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How completely a test case claims to cover a need
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyType {
    Partially,
    Fully,
}

impl VerifyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyType::Partially => "partially",
            VerifyType::Fully => "fully",
        }
    }
}

impl fmt::Display for VerifyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One test case verifying one need.
///
/// Links are self-contained projections of a test case record and never point
/// back at it. Ordering follows the field order below.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerificationLink {
    pub name: String,
    pub file: RelativePathBuf,
    /// 1-based line in `file`. Reports with negative line numbers are rejected
    /// when the link is built.
    pub line: u32,
    pub need: String,
    pub verify_type: VerifyType,
    pub result: String,
    pub result_text: String,
}

impl VerificationLink {
    /// JSON keys a persisted link object must carry
    pub const KEYS: [&'static str; 7] = [
        "name",
        "file",
        "line",
        "need",
        "verify_type",
        "result",
        "result_text",
    ];
}
