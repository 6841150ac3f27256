pub mod test_case;
pub mod verification_link;

pub use test_case::{LinkError, Rejection, TestCaseRecord, ValidTestCase};
pub use verification_link::{VerificationLink, VerifyType};
