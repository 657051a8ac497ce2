//! Prompt templates for the mood analysis call
//!
//! These templates use basic `format!()` interpolation; the recommendation
//! clauses are only present when the matching count is non-zero.

const ASSISTANT_ROLE: &str = "You are an empathetic wellness assistant. Your task is to analyze \
the user's text, determine their mood, provide two helpful health and wellness tips tailored to \
that mood";

const RESPONSE_RULES: &str = "You must return the entire response in a single JSON object that \
strictly adheres to the provided schema. If a recommendation type was not requested (count is \
0), return an empty list for that field.";

/// Build the clause asking for `count` recommendations of `kind`, or `None`
/// when nothing of that kind was requested.
///
/// # Example
/// ```
/// use mood_compass::llm::prompts::recommendation_clause;
///
/// assert_eq!(
///     recommendation_clause(2, "movies").as_deref(),
///     Some("and suggest exactly 2 relevant movies")
/// );
/// assert!(recommendation_clause(0, "books").is_none());
/// ```
pub fn recommendation_clause(count: u32, kind: &str) -> Option<String> {
    (count > 0).then(|| format!("and suggest exactly {count} relevant {kind}"))
}

/// Generate the system instruction for one analysis.
///
/// Always asks for a mood classification and exactly two wellness tips. The
/// movie clause precedes the book clause; omitted clauses leave no separator
/// behind.
///
/// # Example
/// ```
/// use mood_compass::llm::prompts::system_instruction;
///
/// let instruction = system_instruction(0, 3);
/// assert!(instruction.contains("tailored to that mood, and suggest exactly 3 relevant books."));
/// assert!(!instruction.contains("movies"));
/// ```
pub fn system_instruction(num_movies: u32, num_books: u32) -> String {
    let clauses: Vec<String> = [
        recommendation_clause(num_movies, "movies"),
        recommendation_clause(num_books, "books"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if clauses.is_empty() {
        format!("{ASSISTANT_ROLE}. {RESPONSE_RULES}")
    } else {
        format!("{ASSISTANT_ROLE}, {}. {RESPONSE_RULES}", clauses.join(", "))
    }
}

/// Wrap the user's raw text, verbatim, in the analysis request.
///
/// # Example
/// ```
/// use mood_compass::llm::prompts::analysis_prompt;
///
/// let prompt = analysis_prompt("I just got a promotion");
/// assert!(prompt.ends_with("'I just got a promotion'"));
/// ```
pub fn analysis_prompt(user_text: &str) -> String {
    format!("Analyze my current situation and provide advice based on this: '{user_text}'")
}
