//! Traversal of open pull requests.
//!
//! [`Labeler::run`] reads the label configuration and then walks the open pull requests
//! page by page, most recently updated first. For every pull request it fetches the
//! changed files, decides which labels apply and adds the ones that are missing.
//!
//! Calls are made strictly one after the other. Every call is charged against the
//! run's [`OperationBudget`], and the run stops as soon as the budget is used up.

use github_client::{PullRequestClient, PullRequestSummary, MAX_PAGE_SIZE};
use tracing::{debug, info, instrument, warn};

use crate::budget::OperationBudget;
use crate::decision::{decide, is_subset_of_existing};
use crate::errors::{LabelerError, LabelerResult};
use crate::rules::{self, RuleMapping};
use crate::settings::{LabelerSettings, RunContext};

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;

/// Number of pull requests requested per page.
pub const PAGE_SIZE: u8 = MAX_PAGE_SIZE;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every open pull request was visited.
    Completed,
    /// The run stopped early to stay within its operation budget.
    BudgetExhausted,
}

/// Counters describing what a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub pages_fetched: u32,
    /// Pull requests seen on the fetched pages, including skipped ones.
    pub pull_requests_examined: usize,
    pub pull_requests_skipped: usize,
    pub pull_requests_labeled: usize,
    /// Remote calls made, including the configuration read.
    pub operations_used: i64,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            outcome: RunOutcome::Completed,
            pages_fetched: 0,
            pull_requests_examined: 0,
            pull_requests_skipped: 0,
            pull_requests_labeled: 0,
            operations_used: 0,
        }
    }
}

enum TraversalState {
    FetchingPage(u32),
    Done(RunOutcome),
}

enum PullRequestStep {
    Continue,
    Stop,
}

/// Applies labels to the open pull requests of one repository.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient};
/// use pr_labeler_core::{Labeler, LabelerSettings, RunContext};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitHubClient::new(create_token_client("ghp_example", None)?);
/// let context = RunContext::from_repository("octo-org/octo-repo", None)?;
/// let settings = LabelerSettings::from_inputs(None, Some("false"), Some("30"))?;
///
/// let summary = Labeler::new(&client, &context, &settings).run().await?;
/// println!("Labeled {} pull requests", summary.pull_requests_labeled);
/// # Ok(())
/// # }
/// ```
pub struct Labeler<'a> {
    client: &'a dyn PullRequestClient,
    context: &'a RunContext,
    settings: &'a LabelerSettings,
}

impl<'a> Labeler<'a> {
    pub fn new(
        client: &'a dyn PullRequestClient,
        context: &'a RunContext,
        settings: &'a LabelerSettings,
    ) -> Self {
        Self {
            client,
            context,
            settings,
        }
    }

    /// Performs a complete run: reads the configuration, then labels pull requests.
    ///
    /// Running out of budget is a successful run with outcome
    /// [`RunOutcome::BudgetExhausted`].
    ///
    /// # Errors
    ///
    /// - `LabelerError::Config` if the configuration file is malformed
    /// - `LabelerError::RemoteCall` if any GitHub call fails; the run is not retried
    #[instrument(skip(self), fields(owner = %self.context.owner, repo = %self.context.repo))]
    pub async fn run(&self) -> LabelerResult<RunSummary> {
        let mut budget = OperationBudget::new(self.settings.operations_per_run);

        if budget.exhausted() {
            self.warn_budget_exhausted();
            let mut summary = RunSummary::new();
            summary.outcome = RunOutcome::BudgetExhausted;
            return Ok(summary);
        }

        let rules = self.load_rules(&mut budget).await?;
        info!(
            label_count = rules.len(),
            labels = ?rules.labels().collect::<Vec<_>>(),
            "Loaded label configuration"
        );

        self.label_pull_requests(&rules, &mut budget).await
    }

    /// Reads and parses the label configuration file. Charges one operation.
    pub async fn load_rules(&self, budget: &mut OperationBudget) -> LabelerResult<RuleMapping> {
        let path = self.settings.configuration_path.as_str();
        debug!(path, reference = ?self.context.reference, "Fetching label configuration");

        let contents = self
            .client
            .get_file_contents(
                &self.context.owner,
                &self.context.repo,
                path,
                self.context.reference.as_deref(),
            )
            .await
            .map_err(|e| {
                LabelerError::remote(format!("read configuration file '{}'", path), e)
            })?;
        budget.charge_one();

        let text = rules::decode_contents(&contents)?;
        Ok(rules::parse(&text)?)
    }

    /// Walks the open pull requests until they run out or the budget does.
    pub async fn label_pull_requests(
        &self,
        rules: &RuleMapping,
        budget: &mut OperationBudget,
    ) -> LabelerResult<RunSummary> {
        let mut summary = RunSummary::new();
        let mut state = TraversalState::FetchingPage(1);

        let outcome = loop {
            state = match state {
                TraversalState::FetchingPage(page) => {
                    self.process_page(page, rules, budget, &mut summary).await?
                }
                TraversalState::Done(outcome) => break outcome,
            };
        };

        if outcome == RunOutcome::BudgetExhausted {
            self.warn_budget_exhausted();
        }

        summary.outcome = outcome;
        summary.operations_used = budget.spent();
        info!(
            pages = summary.pages_fetched,
            examined = summary.pull_requests_examined,
            skipped = summary.pull_requests_skipped,
            labeled = summary.pull_requests_labeled,
            operations = summary.operations_used,
            "Finished labeling pull requests"
        );
        Ok(summary)
    }

    async fn process_page(
        &self,
        page: u32,
        rules: &RuleMapping,
        budget: &mut OperationBudget,
        summary: &mut RunSummary,
    ) -> LabelerResult<TraversalState> {
        if budget.exhausted() {
            return Ok(TraversalState::Done(RunOutcome::BudgetExhausted));
        }

        let prs = self
            .client
            .list_open_pull_requests(&self.context.owner, &self.context.repo, page, PAGE_SIZE)
            .await
            .map_err(|e| LabelerError::remote("list open pull requests", e))?;
        budget.charge_one();
        summary.pages_fetched += 1;

        if prs.is_empty() {
            debug!(page, "No more open pull requests");
            return Ok(TraversalState::Done(RunOutcome::Completed));
        }
        if budget.exhausted() {
            return Ok(TraversalState::Done(RunOutcome::BudgetExhausted));
        }

        for pr in &prs {
            summary.pull_requests_examined += 1;
            let step = self
                .process_pull_request(pr, rules, budget, summary)
                .await?;
            if let PullRequestStep::Stop = step {
                return Ok(TraversalState::Done(RunOutcome::BudgetExhausted));
            }
            if budget.exhausted() {
                return Ok(TraversalState::Done(RunOutcome::BudgetExhausted));
            }
        }

        Ok(TraversalState::FetchingPage(page + 1))
    }

    async fn process_pull_request(
        &self,
        pr: &PullRequestSummary,
        rules: &RuleMapping,
        budget: &mut OperationBudget,
        summary: &mut RunSummary,
    ) -> LabelerResult<PullRequestStep> {
        info!(number = pr.number, title = pr.title.as_str(), "Found pull request");

        if self.settings.skip_labeled_prs && pr.is_labeled() {
            info!(number = pr.number, "Pull request already has labels, skipping");
            summary.pull_requests_skipped += 1;
            return Ok(PullRequestStep::Continue);
        }

        debug!(number = pr.number, "Fetching changed files");
        let changed_files = self
            .client
            .list_changed_files(&self.context.owner, &self.context.repo, pr.number)
            .await
            .map_err(|e| {
                LabelerError::remote(format!("list changed files of pull request #{}", pr.number), e)
            })?;
        budget.charge_one();
        if budget.exhausted() {
            return Ok(PullRequestStep::Stop);
        }

        for file in &changed_files {
            debug!(number = pr.number, file = file.as_str(), "Changed file");
        }

        let desired = decide(&changed_files, rules);
        if desired.is_empty() {
            debug!(number = pr.number, "No label patterns matched");
            return Ok(PullRequestStep::Continue);
        }

        if is_subset_of_existing(desired.iter().map(String::as_str), pr.label_names()) {
            info!(
                number = pr.number,
                labels = ?desired,
                "Pull request already has all matching labels"
            );
            return Ok(PullRequestStep::Continue);
        }

        let labels: Vec<String> = desired.into_iter().collect();
        info!(number = pr.number, labels = ?labels, "Adding labels to pull request");
        self.client
            .add_labels(&self.context.owner, &self.context.repo, pr.number, &labels)
            .await
            .map_err(|e| {
                LabelerError::remote(format!("add labels to pull request #{}", pr.number), e)
            })?;
        budget.charge_one();
        summary.pull_requests_labeled += 1;

        Ok(PullRequestStep::Continue)
    }

    fn warn_budget_exhausted(&self) {
        warn!(
            "performed {} operations, exiting to avoid rate limit",
            self.settings.operations_per_run
        );
    }
}
