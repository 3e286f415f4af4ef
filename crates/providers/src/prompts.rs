//! Prompt templates in the `[INST]` instruction format.

/// Separator placed between retrieved fragments in the context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

const RETRIEVAL_PREAMBLE: &str = "<s>[INST] You are a technical assistant good at searching documents. \
If you do not have an answer from the provided information, say so. [/INST] </s>";

const DIRECT_PREAMBLE: &str =
    "<s>[INST] You are a technical assistant good at answering the queries asked to you. [/INST] </s>";

const DIRECT_CONTEXT: &str =
    "\"You are an AI Assistant, known for better and concise responses for the given query.\"";

/// Join retrieved fragment texts into a single context block.
pub fn join_context<'a>(fragments: impl IntoIterator<Item = &'a str>) -> String {
    fragments
        .into_iter()
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Prompt for answering `input` from retrieved `context`.
pub fn retrieval_prompt(input: &str, context: &str) -> String {
    render(RETRIEVAL_PREAMBLE, input, context)
}

/// Prompt for answering `input` with no retrieved context.
pub fn direct_prompt(input: &str) -> String {
    render(DIRECT_PREAMBLE, input, DIRECT_CONTEXT)
}

fn render(preamble: &str, input: &str, context: &str) -> String {
    format!("{preamble}\n[INST] {input}\nContext: {context}\nAnswer:\n[/INST]\n")
}
