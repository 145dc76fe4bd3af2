use super::options::ValidateOptions;
use arazzo_core::StructuredIssue;

/// State of one validation run: the options in force and every issue
/// recorded so far, in evaluation order.
#[derive(Debug)]
pub(crate) struct Validation {
    options: ValidateOptions,
    issues: Vec<StructuredIssue>,
}

impl Validation {
    pub(crate) fn new(options: ValidateOptions) -> Self {
        Self {
            options,
            issues: Vec::new(),
        }
    }

    pub(crate) fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub(crate) fn push(&mut self, issue: StructuredIssue) {
        self.issues.push(issue);
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.issues.len()
    }

    /// True when nothing was recorded after `checkpoint`.
    pub(crate) fn clean_since(&self, checkpoint: usize) -> bool {
        self.issues.len() == checkpoint
    }

    pub(crate) fn into_issues(self) -> Vec<StructuredIssue> {
        self.issues
    }
}
