use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One month of ledger totals, as handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// Calendar month, 1-12.
    pub month: u32,
    pub sales: i64,
    pub expenses: i64,
}

/// Plain snapshot of the business figures the narrative is grounded on.
///
/// Deliberately decoupled from the finance crate's types so this crate never
/// grows a domain dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSnapshot {
    pub total_income: i64,
    pub total_expenses: i64,
    pub net: i64,
    pub months: Vec<MonthSnapshot>,
}

/// A user's request for a narrative analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    /// Free-text question or focus ("how did exports do this quarter?").
    pub question: String,
}

/// The generated narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSummary {
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("empty question")]
    EmptyQuestion,

    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

/// Opaque text-generation collaborator: context blob in, analysis out.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Assemble the plain-text context blob (figures summary + user request)
/// that is handed to the generator.
pub fn build_prompt(snapshot: &FinanceSnapshot, request: &NarrativeRequest) -> String {
    let mut prompt = String::new();
    prompt.push_str("Business figures (amounts in smallest currency unit):\n");
    prompt.push_str(&format!(
        "total income: {}\ntotal expenses: {}\nnet: {}\n",
        snapshot.total_income, snapshot.total_expenses, snapshot.net
    ));
    for m in &snapshot.months {
        prompt.push_str(&format!(
            "month {:02}: sales {}, expenses {}\n",
            m.month, m.sales, m.expenses
        ));
    }
    prompt.push_str("\nQuestion: ");
    prompt.push_str(request.question.trim());
    prompt
}

/// Run a narrative request through a generator.
pub fn summarize<G: TextGenerator + ?Sized>(
    generator: &G,
    snapshot: &FinanceSnapshot,
    request: &NarrativeRequest,
) -> Result<NarrativeSummary, NarrativeError> {
    if request.question.trim().is_empty() {
        return Err(NarrativeError::EmptyQuestion);
    }

    let prompt = build_prompt(snapshot, request);
    let text = generator.generate(&prompt)?;
    Ok(NarrativeSummary {
        text,
        generated_at: Utc::now(),
    })
}

/// Deterministic generator for tests and offline development: restates the
/// headline figures instead of calling a hosted model.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateGenerator;

impl TextGenerator for TemplateGenerator {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let headline = prompt
            .lines()
            .find(|line| line.starts_with("net: "))
            .unwrap_or("net: unknown");
        Ok(format!(
            "Summary based on the supplied ledger figures ({headline}). \
             Review the monthly breakdown for trends."
        ))
    }
}
