//! Prompt templates for vidnotes.
//!
//! Prompts can be customized by placing a `prompts.toml` file in the custom
//! prompts directory. Any prompt left out of that file keeps its default.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// Prefix placed directly in front of the transcript to request notes.
    pub summary: String,
    /// Prefix placed directly in front of the notes to request a fact-check.
    pub fact_check: String,
    /// Template for follow-up questions; uses {{transcript}} and {{question}}.
    pub query: String,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            summary: "You are a YouTube video summarizer. You will be taking the transcript text
and summarizing the entire video and providing the important summary in points
within 250 words. Please provide the summary of the text given here: "
                .to_string(),

            fact_check: "You are to fact-check the information I have given here. Check if it is valid and
 give the appropriate response. Also, if fact-checking is not possible for the given text,
 give the proper reason for the same: "
                .to_string(),

            query: "You are an assistant who answers questions based on the provided transcript of a YouTube video. Here is the transcript:
{{transcript}}
Now, please answer the following question: {{question}}. If the question is not answerable from the transcript then answer off the internet.
Don't use the word transcript instead use video. Act like a chatbot in that scenario:"
                .to_string(),

            variables: HashMap::new(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying an optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let path = PathBuf::from(shellexpand::tilde(dir).to_string()).join("prompts.toml");
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                prompts = toml::from_str(&content)?;
            }
        }

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        Ok(prompts)
    }

    /// Render a template in a single pass.
    ///
    /// Substituted values are not scanned again, so a transcript that happens
    /// to contain `{{question}}` is embedded verbatim. Unknown placeholders are
    /// left untouched.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Summary prefix with custom variables applied.
    pub fn summary_prefix(&self) -> String {
        self.render_with_custom(&self.summary, &HashMap::new())
    }

    /// Fact-check prefix with custom variables applied.
    pub fn fact_check_prefix(&self) -> String {
        self.render_with_custom(&self.fact_check, &HashMap::new())
    }

    /// Build the follow-up question prompt.
    pub fn query_prompt(&self, transcript: &str, question: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        vars.insert("question".to_string(), question.to_string());
        self.render_with_custom(&self.query, &vars)
    }
}
