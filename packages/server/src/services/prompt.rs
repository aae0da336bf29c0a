//! Linearizes conversation history and the current query into a model prompt.

/// One `User:` / `Assistant:` line pair per `(query, response)` turn, oldest first.
pub fn format_history<'a>(turns: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    turns
        .into_iter()
        .map(|(query, response)| format!("User: {query}\nAssistant: {response}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the prompt. `document_text` of `None` leaves out the content section.
pub fn compose_prompt(history: &str, query: &str, document_text: Option<&str>) -> String {
    match document_text {
        Some(text) => format!("{history}\nUser: {query}\n\nPDF Content:\n{text}\nAssistant:"),
        None => format!("{history}\nUser: {query}\n\nAssistant:"),
    }
}
