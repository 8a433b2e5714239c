//! Default prompt templates for every pattern.
//!
//! Prompt text is a parameter everywhere in this crate; these are the
//! out-of-the-box defaults. Templates use `{name}` placeholders filled by
//! [`render`].

/// Fill `{name}` placeholders in a template.
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in params {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Default four-stage chain: extract, normalize, sort, tabulate.
pub const CHAIN_DEFAULT_STAGES: [&str; 4] = [
    "Extract only the numerical values and their associated metrics from the text.\n\
     Format each one as 'value: metric' on a new line.\n\
     Example format:\n\
     92: customer satisfaction\n\
     45%: revenue growth",
    "Convert all numerical values to percentages where possible.\n\
     If a value is not a percentage or points, convert it (e.g. 92 points -> 92%).\n\
     Keep one number per line.\n\
     Example format:\n\
     92%: customer satisfaction\n\
     45%: revenue growth",
    "Sort all lines in descending order by numerical value.\n\
     Keep the 'value: metric' format on each line.\n\
     Example:\n\
     92%: customer satisfaction\n\
     87%: employee satisfaction",
    "Format the sorted data as a markdown table with the columns:\n\
     | Metric | Value |\n\
     |:--|--:|\n\
     | Customer Satisfaction | 92% |",
];

/// Classifier prompt for the routing pattern.
pub const ROUTE_SELECTOR: &str = "\
Analyze the input and select the most appropriate support team from these options: {options}
First explain your reasoning, then provide your selection in this JSON format:

{\"reason\": \"Brief explanation of why this ticket should be routed to a specific team. \
Consider key terms, user intent, and urgency level.\", \"next\": \"The chosen team name\"}

Input: {input}";

/// Generator prompt for the refine loop.
pub const GENERATOR: &str = "\
Your goal is to complete the task based on the input. If there is feedback from \
previous generations, reflect on it to improve your solution.

Respond with a SINGLE LINE of valid JSON in exactly this shape:
{\"thoughts\":\"Brief description here\",\"response\":\"Your solution here\"}

Rules for the response field:
1. ALL line breaks must use \\n
2. ALL quotes must use \\\"
3. NO literal line breaks or tabs - everything on a single line
4. The solution must be complete and properly escaped";

/// Evaluator prompt for the refine loop.
pub const EVALUATOR: &str = "\
Evaluate this implementation for correctness, time complexity, and best practices. \
Ensure the code is properly documented.
Respond with EXACTLY this JSON format on a single line:

{\"verdict\":\"PASS, NEEDS_IMPROVEMENT, or FAIL\", \"feedback\":\"Your feedback here\"}

The verdict field must be one of: \"PASS\", \"NEEDS_IMPROVEMENT\", \"FAIL\"
Use \"PASS\" only if all criteria are met with no improvements needed.";

/// Task-decomposition prompt for the orchestrator-workers pattern.
pub const TASK_ANALYZER: &str = "\
Analyze this task and break it down into 2-3 distinct approaches:

Task: {task}

Return your response in this JSON format:
{\"analysis\": \"Explain your understanding of the task and which variations would be \
valuable. Focus on how each approach serves different aspects of the task.\", \
\"tasks\": [{\"kind\": \"formal\", \"description\": \"Write a precise, technical version \
that emphasizes specifications\"}, {\"kind\": \"conversational\", \"description\": \"Write \
an engaging, friendly version that connects with readers\"}]}";

/// Per-subtask worker prompt for the orchestrator-workers pattern.
pub const TASK_WORKER: &str = "\
Generate content based on:
Task: {original_task}
Style: {task_kind}
Guidelines: {task_description}";

/// Top-level decision prompt for the hierarchical team.
pub const SUPERVISOR: &str = "\
You are a SUPERVISOR. Analyze the user goal and the current state.
Decide the next step among: \"RESEARCH_TEAM\", \"DOCUMENT_AUTHORING\", \"FINISH\".
Respond with EXACTLY one line of JSON:
{\"next\":\"RESEARCH_TEAM|DOCUMENT_AUTHORING|FINISH\",\"reason\":\"brief reason\"}
Context:
- User goal: {goal}
- Current notes: {notes}
- Current draft: {draft}
- Citations: {cites}
- Charts: {charts}";

/// Research-team router prompt.
pub const RESEARCH_ROUTER: &str = "\
You lead the RESEARCH TEAM. Decide the next worker: \"SEARCHER\", \"WEB_SCRAPER\" or \"RETURN\".
\"RETURN\" hands control back to the Supervisor. Respond with one line of JSON:
{\"next\":\"SEARCHER|WEB_SCRAPER|RETURN\",\"reason\":\"brief reason\"}
Goal: {goal}
Current notes: {notes}";

/// Document-authoring router prompt.
pub const DOCUMENT_ROUTER: &str = "\
You lead DOCUMENT AUTHORING. Decide the next worker: \"WRITER\", \"NOTE_TAKER\", \
\"CHART_GENERATOR\" or \"RETURN\".
\"RETURN\" hands control back to the Supervisor. One line of JSON:
{\"next\":\"WRITER|NOTE_TAKER|CHART_GENERATOR|RETURN\",\"reason\":\"brief reason\"}
Goal: {goal}
Current draft: {draft}
Notes: {notes}
Citations: {cites}";

pub const SEARCHER: &str = "\
Role: SEARCHER. Produce a factual summary and 3-5 key points that advance the goal.
Clear Markdown output. Do not invent links.
Goal: {goal}";

pub const WEB_SCRAPER: &str = "\
Role: WEB_SCRAPER. List potential relevant public sources (titles and why they are useful).
Do NOT invent URLs. Format: bulleted list.
Goal: {goal}";

pub const NOTE_TAKER: &str = "\
Role: NOTE_TAKER. Convert the content below into concise, sectioned bullet notes.
Prioritize clarity and traceability.
Content: {content}";

pub const WRITER: &str = "\
Role: WRITER. Produce a document draft (Markdown) with:
- Title
- Executive summary
- Thematic sections (use the notes)
- Conclusion and next steps
Goal: {goal}
Notes: {notes}";

pub const CHART_GENERATOR: &str = "\
Role: CHART_GENERATOR. Propose up to 2 useful charts, describing for each:
- Chart title
- Type (bar, line, pie...)
- Expected data (columns and examples)
- The insight the chart communicates
Goal: {goal}
Notes: {notes}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_placeholders() {
        let out = render("Goal: {goal}, again: {goal} - {other}", &[("goal", "ship it"), ("other", "x")]);
        assert_eq!(out, "Goal: ship it, again: ship it - x");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let out = render("{known} {unknown}", &[("known", "v")]);
        assert_eq!(out, "v {unknown}");
    }
}
