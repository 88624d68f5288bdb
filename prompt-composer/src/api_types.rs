//! Public API types for the ask pipeline.

/// Per-question overrides. A `None` field falls back to the value from the
/// environment-driven config.
#[derive(Clone, Copy, Debug, Default)]
pub struct AskOptions {
    /// Ground the prompt in the loaded table. `None` => `INCLUDE_CONTEXT`.
    pub include_context: Option<bool>,
    /// Byte budget for the context block. `None` => `CONTEXT_BUDGET_BYTES`.
    pub budget_bytes: Option<usize>,
}

/// The model's answer together with what happened to the context block,
/// so the caller can tell the user when the table was cut or left out.
#[derive(Clone, Debug)]
pub struct Answer {
    /// The completion text.
    pub text: String,
    /// A table excerpt was part of the prompt.
    pub context_included: bool,
    /// Trailing rows were dropped to fit the budget.
    pub truncated: bool,
    /// Context was requested but even the header exceeded the budget.
    pub context_omitted: bool,
}
