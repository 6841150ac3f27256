use crate::LOG_TARGET;
use crate::models::{LinkError, TestCaseRecord, VerificationLink};

/// Outcome of linking a batch of test cases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub links: Vec<VerificationLink>,
    /// Records that produced no links because they failed validation
    pub skipped: usize,
}

/// Expand every record into its links, keeping input order.
///
/// Records that fail validation are logged and counted, the rest of the batch
/// carries on. A malformed line number aborts the whole batch.
pub fn link_test_cases<'a, I>(records: I) -> Result<LinkReport, LinkError>
where
    I: IntoIterator<Item = &'a TestCaseRecord>,
{
    let mut report = LinkReport::default();
    for record in records {
        match record.validate() {
            Ok(valid) => report.links.extend(valid.links()?),
            Err(_) => report.skipped += 1,
        }
    }

    log::debug!(
        target: LOG_TARGET,
        "Linked {} needs, skipped {} test cases",
        report.links.len(),
        report.skipped
    );
    Ok(report)
}
