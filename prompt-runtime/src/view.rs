use std::fmt;

pub const HEADLINE: &str = "There you go... a canvas for your next Celo project!";
pub const DISCONNECTED_PLACEHOLDER: &str = "No Wallet Connected";

/// What the prompt page shows for a given controller and wallet state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Disconnected,
    Connected(PromptForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptForm {
    pub address: String,
    pub input: String,
    pub submit_enabled: bool,
    pub pending: bool,
    /// Text of the current result; `None` until something resolves.
    pub result_text: Option<String>,
}

impl View {
    pub fn result_text(&self) -> Option<&str> {
        match self {
            View::Connected(form) => form.result_text.as_deref(),
            View::Disconnected => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADLINE}")?;
        let form = match self {
            View::Disconnected => return writeln!(f, "{DISCONNECTED_PLACEHOLDER}"),
            View::Connected(form) => form,
        };

        writeln!(f, "Your address: {}", form.address)?;
        writeln!(f, "Input your prompt")?;
        writeln!(f, "> {}", form.input)?;
        if form.submit_enabled {
            writeln!(f, "[Fetch Prompt]")?;
        } else {
            writeln!(f, "[Fetch Prompt] (disabled)")?;
        }
        if form.pending {
            writeln!(f, "Waiting for response...")?;
        }
        if let Some(text) = &form.result_text {
            writeln!(f, "Haiku: {text}")?;
        }
        Ok(())
    }
}
